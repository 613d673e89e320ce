// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{AppointmentsResponse, User, UserRole};
use crate::services::TimeWindow;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/appointments", get(get_appointments))
}

/// Load the caller's profile or 404.
async fn load_profile(state: &AppState, auth: &AuthUser) -> Result<User> {
    state
        .users
        .get_user(&auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth.user_id)))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub role: UserRole,
    /// Whether a CRM user ID is on file.
    pub crm_linked: bool,
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let user = load_profile(&state, &auth).await?;

    Ok(Json(UserResponse {
        crm_linked: user
            .ghl_user_id
            .as_deref()
            .is_some_and(|id| !id.trim().is_empty()),
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        email: user.email,
        role: user.role,
    }))
}

// ─── Appointments ────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
struct AppointmentsQuery {
    /// Days before now to include (defaults to config)
    #[validate(range(max = 365))]
    days_back: Option<u32>,
    /// Days after now to include (defaults to config)
    #[validate(range(max = 365))]
    days_ahead: Option<u32>,
}

/// Get the appointments the caller may see.
///
/// CRM failures and unresolved CRM identities yield an empty list, not an error.
async fn get_appointments(
    State(state): State<Arc<AppState>>,
    Extension(auth): Extension<AuthUser>,
    Query(params): Query<AppointmentsQuery>,
) -> Result<Json<AppointmentsResponse>> {
    params
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let user = load_profile(&state, &auth).await?;

    let window = TimeWindow::around(
        chrono::Utc::now(),
        params.days_back.unwrap_or(state.config.appointment_days_back),
        params
            .days_ahead
            .unwrap_or(state.config.appointment_days_ahead),
    );

    tracing::debug!(
        user_id = %user.id,
        role = ?user.role,
        start = %window.start,
        end = %window.end,
        "Fetching appointments"
    );

    let response = state.appointment_service.list_for_user(&user, &window).await;
    Ok(Json(response))
}
