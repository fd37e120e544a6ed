//! Error types for the ConsultPro gateway

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::auth::claims::DecodeError;
use crate::payments::PaymentError;
use crate::upstream::UpstreamError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config file not found. Run 'consultpro init' first.")]
    ConfigNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream issued an unreadable session token: {0}")]
    TokenDecode(#[from] DecodeError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("{0} is not configured")]
    ProviderNotConfigured(&'static str),

    #[error("Unknown error: {0}")]
    Other(String),
}

impl Error {
    /// HTTP status this error maps to at the API surface
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::InvalidCredentials | Error::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Upstream(UpstreamError::Unauthorized(_)) => StatusCode::UNAUTHORIZED,
            Error::Upstream(UpstreamError::NotFound(_)) => StatusCode::NOT_FOUND,
            Error::Upstream(_) | Error::Http(_) | Error::TokenDecode(_) => StatusCode::BAD_GATEWAY,
            Error::Payment(PaymentError::SignatureMismatch)
            | Error::Payment(PaymentError::SignatureFormat(_)) => StatusCode::BAD_REQUEST,
            Error::Payment(_) => StatusCode::BAD_GATEWAY,
            Error::ProviderNotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        }
        let body = json!({
            "success": false,
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn validation_errors_are_bad_requests() {
        let error = Error::from(ValidationError::new("email", "Email is required"));
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn credential_errors_are_unauthorized() {
        assert_eq!(
            Error::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn upstream_statuses_pass_through_the_mapping() {
        let unauthorized = Error::from(UpstreamError::Unauthorized("bad token".to_string()));
        assert_eq!(unauthorized.status_code(), StatusCode::UNAUTHORIZED);

        let missing = Error::from(UpstreamError::NotFound("no such booking".to_string()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);

        let broken = Error::from(UpstreamError::Upstream {
            status: 500,
            message: "boom".to_string(),
        });
        assert_eq!(broken.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn signature_mismatches_are_bad_requests() {
        let error = Error::from(PaymentError::SignatureMismatch);
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unconfigured_providers_are_unavailable() {
        let error = Error::ProviderNotConfigured("razorpay");
        assert_eq!(error.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.to_string(), "razorpay is not configured");
    }
}
