use crate::models::reservation::PaymentStatus;
use crate::services::payment::interface::{PaymentCollaborator, PaymentError, PaymentOutcome};

/// Cash on arrival. No round trip and no provider reference: the reservation
/// persists immediately with a pending payment status and the driver collects
/// later. Deliberate business decision, not a shortcut.
pub struct CashProvider;

impl PaymentCollaborator for CashProvider {
    async fn initiate(
        &self,
        amount_eur: f64,
        description: &str,
    ) -> Result<PaymentOutcome, PaymentError> {
        println!(
            "Registering cash booking for {:.2}€ ({})",
            amount_eur, description
        );

        Ok(PaymentOutcome {
            reference: String::new(),
            status: PaymentStatus::Pending,
        })
    }
}
