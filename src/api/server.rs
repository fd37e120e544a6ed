//! HTTP API server

use axum::middleware;
use axum::routing::{get, patch, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::guard;
use crate::config::Config;
use crate::error::Result;
use crate::payments::{CashfreeClient, RazorpayClient};
use crate::upstream::ConsultApi;

use super::{bookings, payments, routes};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub upstream: ConsultApi,
    pub razorpay: Option<RazorpayClient>,
    pub cashfree: Option<CashfreeClient>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Build the state and its HTTP clients from configuration
    pub fn from_config(config: Config) -> Result<Self> {
        let upstream = ConsultApi::new(&config.upstream)?;
        let razorpay = config
            .razorpay
            .as_ref()
            .map(RazorpayClient::new)
            .transpose()?;
        let cashfree = config
            .cashfree
            .as_ref()
            .map(CashfreeClient::new)
            .transpose()?;

        Ok(Self {
            config,
            upstream,
            razorpay,
            cashfree,
        })
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::from_config(config)?);

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Gateway listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let authed = Router::new()
        .route("/api/dashboard/bookings", get(bookings::dashboard_bookings))
        .route("/api/bookings", post(bookings::create_booking))
        .route_layer(middleware::from_fn(guard::require_auth));

    let admin = Router::new()
        .route("/api/admin/bookings", get(bookings::admin_bookings))
        .route(
            "/api/admin/bookings/{id}",
            patch(bookings::update_booking_status),
        )
        .route("/api/admin/users", get(bookings::admin_users))
        .route_layer(middleware::from_fn(guard::require_admin));

    Router::new()
        // Public routes
        .route("/api/health", get(routes::health))
        .route("/api/auth/login", post(routes::login))
        .route("/api/auth/logout", post(routes::logout))
        .route("/api/auth/session", get(routes::session))
        .route("/api/auth/forgot-password", post(routes::forgot_password))
        .route("/api/auth/reset-password", post(routes::reset_password))
        // Payment routes
        .route(
            "/api/payments/razorpay/create-order",
            post(payments::create_razorpay_order),
        )
        .route(
            "/api/payments/razorpay/verify",
            post(payments::verify_razorpay_payment),
        )
        .route(
            "/api/payments/cashfree/create-session",
            post(payments::create_cashfree_session),
        )
        .route("/api/payments/verify", post(payments::verify_cashfree_payment))
        // Guarded routes
        .merge(authed)
        .merge(admin)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
