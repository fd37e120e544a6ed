//! Cashfree hosted checkout sessions

use crate::config::CashfreeConfig;
use crate::payments::{gateway_failure, CustomerDetails, PaymentError};
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::time::Duration;

const API_VERSION: &str = "2022-09-01";

/// Client for the Cashfree PG orders API
#[derive(Debug, Clone)]
pub struct CashfreeClient {
    client: Client,
    base_url: String,
    app_id: String,
    secret_key: String,
}

impl CashfreeClient {
    pub fn new(config: &CashfreeConfig) -> Result<Self, PaymentError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(Self {
            client,
            base_url: config.api_base(),
            app_id: config.app_id.clone(),
            secret_key: config.secret_key.clone(),
        })
    }

    /// Create an order and payment session.
    ///
    /// When the caller's origin is known, an `order_meta.return_url` is
    /// included; the literal `{order_id}` placeholder in it is substituted
    /// by Cashfree at redirect time.
    pub async fn create_order(
        &self,
        order_id: &str,
        amount: f64,
        currency: &str,
        customer: &CustomerDetails,
        return_origin: Option<&str>,
    ) -> Result<Value, PaymentError> {
        let mut body = json!({
            "order_id": order_id,
            "order_amount": amount,
            "order_currency": currency,
            "customer_details": {
                "customer_id": customer.customer_id,
                "customer_email": customer.customer_email,
                "customer_phone": customer.customer_phone,
                "customer_name": customer.customer_name,
            },
        });
        if let Some(origin) = return_origin {
            body["order_meta"] = json!({
                "return_url": format!("{origin}/payment/callback?order_id={{order_id}}"),
            });
        }

        let response = self
            .with_auth(self.client.post(format!("{}/orders", self.base_url)))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(gateway_failure(response).await);
        }

        Ok(response.json().await?)
    }

    /// Fetch an order, including its payment status
    pub async fn order_status(&self, order_id: &str) -> Result<Value, PaymentError> {
        let response = self
            .with_auth(
                self.client
                    .get(format!("{}/orders/{}", self.base_url, order_id)),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(gateway_failure(response).await);
        }

        Ok(response.json().await?)
    }

    fn with_auth(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("x-api-version", API_VERSION)
            .header("x-client-id", &self.app_id)
            .header("x-client-secret", &self.secret_key)
    }
}
