use std::str::FromStr;
use std::sync::Arc;

use crate::models::reservation::PaymentStatus;
use crate::services::payment::interface::{PaymentCollaborator, PaymentError, PaymentOutcome};

/// Card payments via Stripe. The customer's payment method id comes in with
/// the pay request and is bound at construction so `initiate` keeps the
/// uniform amount + description shape.
pub struct StripeProvider {
    client: Arc<stripe::Client>,
    payment_method_id: String,
}

impl StripeProvider {
    pub fn new(client: Arc<stripe::Client>, payment_method_id: String) -> Self {
        Self {
            client,
            payment_method_id,
        }
    }
}

impl PaymentCollaborator for StripeProvider {
    async fn initiate(
        &self,
        amount_eur: f64,
        description: &str,
    ) -> Result<PaymentOutcome, PaymentError> {
        println!("Creating payment intent...");

        // Stripe amounts are integral cents.
        let amount_cents = (amount_eur * 100.0).round() as i64;

        let payment_method = stripe::PaymentMethodId::from_str(&self.payment_method_id)
            .map_err(|_| PaymentError::Provider("Invalid payment method ID".to_string()))?;

        let mut create_intent = stripe::CreatePaymentIntent::new(amount_cents, stripe::Currency::EUR);
        create_intent.description = Some(description);
        create_intent.payment_method = Some(payment_method);
        create_intent.confirm = Some(true);

        match stripe::PaymentIntent::create(self.client.as_ref(), create_intent).await {
            Ok(intent) => match intent.status {
                stripe::PaymentIntentStatus::Succeeded => Ok(PaymentOutcome {
                    reference: intent.id.to_string(),
                    status: PaymentStatus::Completed,
                }),
                status => Err(PaymentError::Declined(format!(
                    "Card payment was not completed (status: {:?})",
                    status
                ))),
            },
            Err(e) => {
                eprintln!("Error creating payment intent: {:?}", e);
                Err(PaymentError::Provider(format!(
                    "Failed to create payment intent: {}",
                    e
                )))
            }
        }
    }
}
