// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment read path: resolve who is asking, fetch from the CRM, filter.
//!
//! This path never surfaces a CRM failure to the caller. The worst case is
//! an empty list.

use crate::db::UserStore;
use crate::models::{AppointmentsResponse, CrmAppointment, User, UserRole};
use crate::services::crm::{AppointmentScope, AppointmentSource, TimeWindow, UserDirectory};
use crate::services::identity::resolve_crm_identity;
use crate::services::visibility::{resolve_visible_appointments, Viewer};
use std::sync::Arc;

/// Appointment listing with its collaborators wired in.
#[derive(Clone)]
pub struct AppointmentService {
    directory: Arc<dyn UserDirectory>,
    source: Arc<dyn AppointmentSource>,
    store: Arc<dyn UserStore>,
}

impl AppointmentService {
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        source: Arc<dyn AppointmentSource>,
        store: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            directory,
            source,
            store,
        }
    }

    /// Appointments `user` may see within `window`.
    pub async fn list_for_user(&self, user: &User, window: &TimeWindow) -> AppointmentsResponse {
        visible_appointments_for(
            user,
            window,
            self.directory.as_ref(),
            self.source.as_ref(),
            self.store.as_ref(),
        )
        .await
    }
}

/// Appointments `user` may see within `window`.
///
/// Admins read the whole location and skip identity resolution. Everyone
/// else needs a CRM user ID; without one the result is empty.
pub async fn visible_appointments_for(
    user: &User,
    window: &TimeWindow,
    directory: &dyn UserDirectory,
    source: &dyn AppointmentSource,
    store: &dyn UserStore,
) -> AppointmentsResponse {
    let (viewer, scope) = if user.role == UserRole::Admin {
        (Viewer::Admin, AppointmentScope::Location)
    } else {
        let identity = resolve_crm_identity(user, directory, store).await;
        let Some(viewer) = Viewer::new(
            user.role,
            identity.crm_user_id(),
            user.ghl_team_id.as_deref(),
        ) else {
            tracing::info!(
                user_id = %user.id,
                "No CRM identity for user, returning no appointments"
            );
            return AppointmentsResponse::empty();
        };
        let scope = match &viewer {
            Viewer::Surveyor { crm_user_id, .. } | Viewer::Member { crm_user_id } => {
                AppointmentScope::AssignedTo(crm_user_id.clone())
            }
            Viewer::Admin => AppointmentScope::Location,
        };
        (viewer, scope)
    };

    let records = fetch_with_fallback(source, &scope, window).await;
    let visible = resolve_visible_appointments(&records, &viewer);

    tracing::debug!(
        user_id = %user.id,
        role = ?user.role,
        fetched = records.len(),
        visible = visible.len(),
        "Resolved visible appointments"
    );

    visible.into()
}

/// Fetch records for `scope`; if a per-user fetch fails, fetch the whole
/// location instead (the caller re-applies the visibility rule either way).
async fn fetch_with_fallback(
    source: &dyn AppointmentSource,
    scope: &AppointmentScope,
    window: &TimeWindow,
) -> Vec<CrmAppointment> {
    let first_error = match source.fetch(scope, window).await {
        Ok(records) => return records,
        Err(e) => e,
    };

    if *scope == AppointmentScope::Location {
        log_fetch_failure(&first_error, "Location appointment fetch failed");
        return Vec::new();
    }

    log_fetch_failure(
        &first_error,
        "Per-user appointment fetch failed, falling back to location-wide fetch",
    );

    match source.fetch(&AppointmentScope::Location, window).await {
        Ok(records) => records,
        Err(e) => {
            log_fetch_failure(&e, "Fallback appointment fetch failed");
            Vec::new()
        }
    }
}

fn log_fetch_failure(error: &crate::error::AppError, message: &str) {
    if error.is_crm_token_error() {
        // Bad API key: every request will fail until someone fixes config.
        tracing::error!(error = %error, "{}", message);
    } else {
        tracing::warn!(
            error = %error,
            rate_limited = error.is_crm_rate_limited(),
            "{}",
            message
        );
    }
}
