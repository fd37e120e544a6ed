//! Session token decoding

use crate::auth::models::Role;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ways a stored token can fail to decode
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("expected 3 token segments, found {0}")]
    SegmentCount(usize),
    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not a claims object: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Claims carried in the payload segment of a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id issued by the upstream API)
    #[serde(alias = "uuid")]
    pub subject_id: String,
    /// Role as issued; an open set of strings
    pub role: String,
    /// Expiration time (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Role claim parsed into the role model
    pub fn role(&self) -> Role {
        Role::from(self.role.as_str())
    }

    /// Whether the token is expired at `now`; the expiry instant counts as expired
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp <= now
    }
}

/// Decode the payload segment of a session token.
///
/// The upstream API mints and verifies tokens; the gateway only reads the
/// claims, so the signature segment is carried but never checked here.
/// Expiry is likewise left to the caller.
pub fn decode(token: &str) -> Result<Claims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::SegmentCount(segments.len()));
    }
    let payload = URL_SAFE_NO_PAD.decode(segments[1].trim_end_matches('='))?;
    let claims = serde_json::from_slice(&payload)?;
    Ok(claims)
}
