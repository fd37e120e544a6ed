//! Payment gateway clients

pub mod cashfree;
pub mod razorpay;

pub use cashfree::CashfreeClient;
pub use razorpay::RazorpayClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Payment gateway returned {status}: {message}")]
    Gateway { status: u16, message: String },
    #[error("Signature is not valid hex: {0}")]
    SignatureFormat(#[from] hex::FromHexError),
    #[error("Invalid signature")]
    SignatureMismatch,
    #[error("Signing key was rejected")]
    InvalidKey,
}

/// Customer fields both gateways want, camelCase on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
}

/// Turn a non-2xx gateway reply into an error with a short message
pub(crate) async fn gateway_failure(response: reqwest::Response) -> PaymentError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let body = body.trim();
    let message = if body.is_empty() {
        status.to_string()
    } else {
        body.chars().take(512).collect()
    };

    PaymentError::Gateway {
        status: status.as_u16(),
        message,
    }
}
