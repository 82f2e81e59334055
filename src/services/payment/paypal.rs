use serde::Deserialize;
use std::env;

use crate::models::reservation::PaymentStatus;
use crate::services::payment::interface::{PaymentCollaborator, PaymentError, PaymentOutcome};

const DEFAULT_API_BASE: &str = "https://api-m.paypal.com";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    status: String,
}

/// PayPal orders over the REST API: a client-credentials token, then one
/// order creation in EUR.
pub struct PayPalProvider {
    http_client: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_base: String,
}

impl PayPalProvider {
    pub fn from_env() -> Result<Self, PaymentError> {
        let client_id = env::var("PAYPAL_CLIENT_ID")
            .map_err(|_| PaymentError::Provider("PAYPAL_CLIENT_ID not configured".to_string()))?;
        let client_secret = env::var("PAYPAL_CLIENT_SECRET").map_err(|_| {
            PaymentError::Provider("PAYPAL_CLIENT_SECRET not configured".to_string())
        })?;
        let api_base = env::var("PAYPAL_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());

        Ok(Self {
            http_client: reqwest::Client::new(),
            client_id,
            client_secret,
            api_base,
        })
    }

    async fn access_token(&self) -> Result<String, PaymentError> {
        let response = self
            .http_client
            .post(format!("{}/v1/oauth2/token", self.api_base))
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| PaymentError::Provider(format!("PayPal token request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(PaymentError::Provider(format!(
                "PayPal token request returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(format!("Failed to parse PayPal token: {}", e)))?;

        Ok(token.access_token)
    }
}

impl PaymentCollaborator for PayPalProvider {
    async fn initiate(
        &self,
        amount_eur: f64,
        description: &str,
    ) -> Result<PaymentOutcome, PaymentError> {
        let token = self.access_token().await?;

        let body = serde_json::json!({
            "intent": "CAPTURE",
            "purchase_units": [{
                "amount": {
                    "currency_code": "EUR",
                    "value": format!("{:.2}", amount_eur),
                },
                "description": description,
            }],
        });

        let response = self
            .http_client
            .post(format!("{}/v2/checkout/orders", self.api_base))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::Provider(format!("PayPal order request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            eprintln!("PayPal order creation failed ({}): {}", status, detail);
            return Err(PaymentError::Declined(format!(
                "PayPal refused the order ({})",
                status
            )));
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| PaymentError::Provider(format!("Failed to parse PayPal order: {}", e)))?;

        println!("PayPal order {} created with status {}", order.id, order.status);

        Ok(PaymentOutcome {
            reference: order.id,
            status: PaymentStatus::Completed,
        })
    }
}
