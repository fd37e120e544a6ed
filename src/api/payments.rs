//! Payment route handlers

use axum::extract::State;
use axum::http::header::ORIGIN;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use super::routes::MessageResponse;
use super::server::SharedState;
use crate::error::{Error, Result};
use crate::payments::{CashfreeClient, CustomerDetails, RazorpayClient};
use crate::validation;

// Request types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_id: String,
    pub amount: f64,
    pub currency: String,
    pub customer_details: CustomerDetails,
}

/// Razorpay posts these back snake_cased after checkout
#[derive(Debug, Deserialize)]
pub struct VerifyOrderRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub order_id: String,
    pub order_amount: f64,
    pub order_currency: String,
    pub customer_details: CustomerDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub order_id: String,
}

fn razorpay(state: &SharedState) -> Result<&RazorpayClient> {
    state
        .razorpay
        .as_ref()
        .ok_or(Error::ProviderNotConfigured("razorpay"))
}

fn cashfree(state: &SharedState) -> Result<&CashfreeClient> {
    state
        .cashfree
        .as_ref()
        .ok_or(Error::ProviderNotConfigured("cashfree"))
}

// Razorpay routes

pub async fn create_razorpay_order(
    State(state): State<SharedState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<Json<Value>> {
    validation::validate_order_id(&req.order_id)?;
    validation::validate_amount(req.amount)?;
    validation::validate_currency(&req.currency)?;
    validation::validate_email(&req.customer_details.customer_email)?;

    let order = razorpay(&state)?
        .create_order(&req.order_id, req.amount, &req.currency, &req.customer_details)
        .await?;
    Ok(Json(order))
}

pub async fn verify_razorpay_payment(
    State(state): State<SharedState>,
    Json(req): Json<VerifyOrderRequest>,
) -> Result<Json<MessageResponse>> {
    razorpay(&state)?.verify_signature(
        &req.razorpay_order_id,
        &req.razorpay_payment_id,
        &req.razorpay_signature,
    )?;

    tracing::info!(order_id = %req.razorpay_order_id, "payment signature verified");

    Ok(Json(MessageResponse {
        success: true,
        message: "Payment verified successfully".to_string(),
    }))
}

// Cashfree routes

pub async fn create_cashfree_session(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<Value>> {
    validation::validate_order_id(&req.order_id)?;
    validation::validate_amount(req.order_amount)?;
    validation::validate_currency(&req.order_currency)?;
    validation::validate_email(&req.customer_details.customer_email)?;

    let origin = headers.get(ORIGIN).and_then(|value| value.to_str().ok());
    let order = cashfree(&state)?
        .create_order(
            &req.order_id,
            req.order_amount,
            &req.order_currency,
            &req.customer_details,
            origin,
        )
        .await?;
    Ok(Json(order))
}

pub async fn verify_cashfree_payment(
    State(state): State<SharedState>,
    Json(req): Json<VerifyPaymentRequest>,
) -> Result<Json<Value>> {
    validation::validate_order_id(&req.order_id)?;

    let order = cashfree(&state)?.order_status(&req.order_id).await?;
    Ok(Json(order))
}
