//! Client for the upstream ConsultPro REST API

use crate::config::UpstreamConfig;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Upstream rejected the request: {0}")]
    Unauthorized(String),
    #[error("Upstream has no such resource: {0}")]
    NotFound(String),
    #[error("Invalid response from upstream: {0}")]
    InvalidResponse(String),
    #[error("Upstream returned {status}: {message}")]
    Upstream { status: u16, message: String },
}

/// Reply from POST /users/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginReply {
    pub token: String,
}

/// HTTP client for the ConsultPro Workers API.
///
/// Most endpoints are proxied as opaque JSON: the gateway adds the bearer
/// token and maps error statuses, the payload shapes belong to upstream.
#[derive(Debug, Clone)]
pub struct ConsultApi {
    client: Client,
    base_url: String,
}

impl ConsultApi {
    /// Create a client for the configured upstream
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Exchange credentials for a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginReply, UpstreamError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let value = self
            .send(self.request(Method::POST, "/users/login", None).json(&body))
            .await?;
        serde_json::from_value(value).map_err(|e| UpstreamError::InvalidResponse(e.to_string()))
    }

    /// Bookings belonging to one user
    pub async fn user_bookings(
        &self,
        bearer: Option<&str>,
        subject_id: &str,
    ) -> Result<Value, UpstreamError> {
        let path = format!("/bookings/user/{subject_id}");
        self.send(self.request(Method::GET, &path, bearer)).await
    }

    /// Create a booking
    pub async fn create_booking(
        &self,
        bearer: Option<&str>,
        booking: &Value,
    ) -> Result<Value, UpstreamError> {
        self.send(self.request(Method::POST, "/bookings", bearer).json(booking))
            .await
    }

    /// Every booking in the system
    pub async fn list_bookings(&self, bearer: Option<&str>) -> Result<Value, UpstreamError> {
        self.send(self.request(Method::GET, "/bookings", bearer))
            .await
    }

    /// Move a booking to a new status
    pub async fn update_booking_status(
        &self,
        bearer: Option<&str>,
        booking_id: &str,
        status: &str,
    ) -> Result<Value, UpstreamError> {
        let path = format!("/bookings/{booking_id}");
        let body = serde_json::json!({ "status": status });
        self.send(self.request(Method::PATCH, &path, bearer).json(&body))
            .await
    }

    /// Every registered user
    pub async fn list_users(&self, bearer: Option<&str>) -> Result<Value, UpstreamError> {
        self.send(self.request(Method::GET, "/users", bearer)).await
    }

    /// Ask upstream to start a password reset for `email`
    pub async fn forgot_password(&self, email: &str) -> Result<Value, UpstreamError> {
        let body = serde_json::json!({ "email": email });
        self.send(
            self.request(Method::POST, "/auth/forgot-password", None)
                .json(&body),
        )
        .await
    }

    /// Complete a password reset with the token upstream issued
    pub async fn reset_password(
        &self,
        token: &str,
        new_password: &str,
    ) -> Result<Value, UpstreamError> {
        let body = serde_json::json!({ "token": token, "newPassword": new_password });
        self.send(
            self.request(Method::POST, "/auth/reset-password", None)
                .json(&body),
        )
        .await
    }

    /// Probe the upstream; returns the HTTP status it answered with
    pub async fn ping(&self) -> Result<u16, UpstreamError> {
        let response = self.client.get(&self.base_url).send().await?;
        Ok(response.status().as_u16())
    }

    fn request(&self, method: Method, path: &str, bearer: Option<&str>) -> RequestBuilder {
        let mut builder = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, UpstreamError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Value>().await?);
        }

        let body = response.bytes().await.unwrap_or_default();
        Err(error_from(status, &body))
    }
}

/// Map a non-2xx upstream reply onto an error, pulling the message out of
/// the `{"error": "..."}` body shape when present
fn error_from(status: StatusCode, body: &[u8]) -> UpstreamError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string());
    let message = if message.is_empty() {
        status.to_string()
    } else {
        message
    };

    match status.as_u16() {
        401 => UpstreamError::Unauthorized(message),
        404 => UpstreamError::NotFound(message),
        code => UpstreamError::Upstream {
            status: code,
            message,
        },
    }
}
