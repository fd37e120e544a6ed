//! Razorpay orders and signature verification

use crate::config::RazorpayConfig;
use crate::payments::{gateway_failure, CustomerDetails, PaymentError};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde_json::{json, Value};
use sha2::Sha256;
use std::time::Duration;

type HmacSha256 = Hmac<Sha256>;

/// Sign `"{order_id}|{payment_id}"` with the key secret, hex encoded
pub fn sign(key_secret: &str, order_id: &str, payment_id: &str) -> Result<String, PaymentError> {
    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).map_err(|_| PaymentError::InvalidKey)?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Check a signature Razorpay handed back after checkout.
///
/// Comparison happens inside `verify_slice`, which is constant-time.
pub fn verify(
    key_secret: &str,
    order_id: &str,
    payment_id: &str,
    signature: &str,
) -> Result<(), PaymentError> {
    let expected = hex::decode(signature)?;

    let mut mac =
        HmacSha256::new_from_slice(key_secret.as_bytes()).map_err(|_| PaymentError::InvalidKey)?;
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    mac.verify_slice(&expected)
        .map_err(|_| PaymentError::SignatureMismatch)
}

/// Client for the Razorpay Orders API
#[derive(Debug, Clone)]
pub struct RazorpayClient {
    client: Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayClient {
    pub fn new(config: &RazorpayConfig) -> Result<Self, PaymentError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            key_id: config.key_id.clone(),
            key_secret: config.key_secret.clone(),
        })
    }

    /// Create an order, converting the amount to paise.
    /// The order object comes back verbatim for the checkout widget.
    pub async fn create_order(
        &self,
        order_id: &str,
        amount: f64,
        currency: &str,
        customer: &CustomerDetails,
    ) -> Result<Value, PaymentError> {
        let body = json!({
            "amount": to_paise(amount),
            "currency": currency,
            "receipt": order_id,
            "notes": {
                "customerName": customer.customer_name,
                "customerEmail": customer.customer_email,
            },
        });

        let response = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(gateway_failure(response).await);
        }

        Ok(response.json().await?)
    }

    /// Verify a checkout signature with this client's key secret
    pub fn verify_signature(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), PaymentError> {
        verify(&self.key_secret, order_id, payment_id, signature)
    }
}

/// Razorpay wants amounts in the smallest currency unit
fn to_paise(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
