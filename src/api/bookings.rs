//! Booking and user proxy handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::server::SharedState;
use crate::auth::SessionContext;
use crate::error::{Error, Result};
use crate::validation;

// Request types

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "calendarDate")]
    pub calendar_date: String,
    pub fileurl: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: String,
}

// Dashboard routes

pub async fn dashboard_bookings(
    State(state): State<SharedState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<Value>> {
    // Marker sessions pass the guard but carry no subject to look up.
    let Some(subject) = ctx.subject() else {
        return Err(Error::Unauthorized(
            "session has no subject; log in with credentials to continue".to_string(),
        ));
    };

    let bookings = state
        .upstream
        .user_bookings(ctx.bearer.as_deref(), subject)
        .await?;
    Ok(Json(bookings))
}

pub async fn create_booking(
    State(state): State<SharedState>,
    Extension(ctx): Extension<SessionContext>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<Value>> {
    validation::validate_name(&req.name)?;
    validation::validate_email(&req.email)?;
    validation::validate_calendar_date(&req.calendar_date)?;
    validation::validate_file_url(&req.fileurl)?;

    let body = serde_json::to_value(&req)?;
    let booking = state
        .upstream
        .create_booking(ctx.bearer.as_deref(), &body)
        .await?;
    Ok(Json(booking))
}

// Admin routes

pub async fn admin_bookings(
    State(state): State<SharedState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<Value>> {
    let bookings = state.upstream.list_bookings(ctx.bearer.as_deref()).await?;
    Ok(Json(bookings))
}

pub async fn update_booking_status(
    State(state): State<SharedState>,
    Extension(ctx): Extension<SessionContext>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookingStatusRequest>,
) -> Result<Json<Value>> {
    validation::validate_booking_status(&req.status)?;

    let booking = state
        .upstream
        .update_booking_status(ctx.bearer.as_deref(), &id, &req.status)
        .await?;
    Ok(Json(booking))
}

pub async fn admin_users(
    State(state): State<SharedState>,
    Extension(ctx): Extension<SessionContext>,
) -> Result<Json<Value>> {
    let users = state.upstream.list_users(ctx.bearer.as_deref()).await?;
    Ok(Json(users))
}
