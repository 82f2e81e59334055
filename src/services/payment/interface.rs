use std::fmt;

use crate::models::reservation::PaymentStatus;

/// What the booking flow needs back from any provider: a reference string and
/// the status the persisted reservation should carry.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub reference: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone)]
pub enum PaymentError {
    /// The provider answered and said no; the message is customer-facing.
    Declined(String),
    /// The round trip itself failed (configuration, network, bad response).
    Provider(String),
}

impl fmt::Display for PaymentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentError::Declined(msg) => write!(f, "payment declined: {}", msg),
            PaymentError::Provider(msg) => write!(f, "payment provider error: {}", msg),
        }
    }
}

/// One polymorphic capability over the three structurally similar payment
/// round trips (card, PayPal, cash). Provider-specific inputs belong to the
/// provider's constructor, not to this call.
pub trait PaymentCollaborator {
    async fn initiate(
        &self,
        amount_eur: f64,
        description: &str,
    ) -> Result<PaymentOutcome, PaymentError>;
}
