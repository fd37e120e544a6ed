//! API route handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::server::SharedState;
use crate::auth::{claims, Role, Session, TokenStore};
use crate::error::{Error, Result};
use crate::upstream::UpstreamError;
use crate::validation;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub role: Role,
    pub redirect_to: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub admin: bool,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
    pub confirm_password: String,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(json!({ "success": true, "status": "healthy" }))
}

// Auth routes

/// The fixed development logins, gated by `auth.dev_logins`
fn dev_login(email: &str, password: &str) -> Option<Role> {
    match (email, password) {
        ("admin@test.com", "Admin@123") => Some(Role::Admin),
        ("user@test.com", "User@123") => Some(Role::User),
        _ => None,
    }
}

pub async fn login(
    State(state): State<SharedState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    validation::validate_email(&req.email)?;
    validation::validate_login_password(&req.password)?;

    let store = TokenStore::new(jar, state.config.auth.cookie_secure);

    if state.config.auth.dev_logins {
        if let Some(role) = dev_login(req.email.trim(), &req.password) {
            tracing::info!(email = %req.email.trim(), %role, "development login");
            let store = store.set_legacy_role(role.as_str());
            let body = LoginResponse {
                success: true,
                redirect_to: role.home_path().to_string(),
                role,
            };
            return Ok((store.into_jar(), Json(body)));
        }
    }

    let reply = state
        .upstream
        .login(req.email.trim(), &req.password)
        .await
        .map_err(|error| match error {
            UpstreamError::Unauthorized(_) => Error::InvalidCredentials,
            other => Error::from(other),
        })?;

    let claims = claims::decode(&reply.token)?;
    let role = claims.role();
    tracing::info!(subject = %claims.subject_id, %role, "login");

    let store = store.set_token(&reply.token).set_legacy_role(role.as_str());
    let body = LoginResponse {
        success: true,
        redirect_to: role.home_path().to_string(),
        role,
    };
    Ok((store.into_jar(), Json(body)))
}

pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    let store = TokenStore::new(jar, state.config.auth.cookie_secure).clear();
    let body = MessageResponse {
        success: true,
        message: "Logged out successfully".to_string(),
    };
    (store.into_jar(), Json(body))
}

pub async fn session(headers: HeaderMap) -> impl IntoResponse {
    let store = TokenStore::from_headers(&headers);
    let session = Session::resolve(&store);
    let now = chrono::Utc::now().timestamp();

    Json(SessionResponse {
        authenticated: session.is_authenticated(now),
        admin: session.is_admin(),
        subject: session.subject().map(str::to_string),
        role: session.role(),
    })
}

pub async fn forgot_password(
    State(state): State<SharedState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    validation::validate_email(&req.email)?;

    let reply = state.upstream.forgot_password(req.email.trim()).await?;
    Ok(Json(reply))
}

pub async fn reset_password(
    State(state): State<SharedState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<Value>> {
    validation::validate_reset_token(&req.token)?;
    validation::validate_password_strength(&req.password)?;
    validation::validate_passwords_match(&req.password, &req.confirm_password)?;

    let reply = state
        .upstream
        .reset_password(&req.token, &req.password)
        .await?;
    Ok(Json(reply))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_logins_match_exact_pairs_only() {
        assert_eq!(dev_login("admin@test.com", "Admin@123"), Some(Role::Admin));
        assert_eq!(dev_login("user@test.com", "User@123"), Some(Role::User));
        assert_eq!(dev_login("admin@test.com", "wrong"), None);
        assert_eq!(dev_login("someone@else.com", "Admin@123"), None);
        assert_eq!(dev_login("Admin@test.com", "Admin@123"), None);
    }
}
