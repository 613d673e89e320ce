// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use solarops_api::config::Config;
use solarops_api::db::{FirestoreDb, MemoryUserStore, UserStore};
use solarops_api::error::AppError;
use solarops_api::models::{CrmAppointment, CrmContact, CrmUser, User, UserRole};
use solarops_api::routes::create_router;
use solarops_api::services::{
    AppointmentScope, AppointmentService, AppointmentSource, TimeWindow, UserDirectory,
};
use solarops_api::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// A profile with the given role and CRM linkage.
#[allow(dead_code)]
pub fn test_user(id: &str, role: UserRole, ghl_user_id: Option<&str>, ghl_team_id: Option<&str>) -> User {
    User {
        id: id.to_string(),
        email: Some(format!("{}@example.com", id)),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role,
        ghl_user_id: ghl_user_id.map(str::to_string),
        ghl_team_id: ghl_team_id.map(str::to_string),
        created_at: "2025-01-01T00:00:00Z".to_string(),
        updated_at: "2025-01-01T00:00:00Z".to_string(),
    }
}

#[allow(dead_code)]
pub fn crm_user(id: &str, name: &str) -> CrmUser {
    CrmUser {
        id: id.to_string(),
        name: Some(name.to_string()),
        ..Default::default()
    }
}

/// A CRM appointment with just the fields the visibility rule reads.
#[allow(dead_code)]
pub fn appointment(
    id: &str,
    assigned: Option<&str>,
    team: Option<&str>,
    contact_owner: Option<&str>,
) -> CrmAppointment {
    CrmAppointment {
        id: Some(id.to_string()),
        title: Some(format!("Survey {}", id)),
        assigned_user_id: assigned.map(str::to_string),
        team_id: team.map(str::to_string),
        contact: contact_owner.map(|owner| CrmContact {
            assigned_to: Some(owner.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// The four-record scenario used across the visibility tests:
/// A → U1, B → U2/T1, C → U2/T2, D → unassigned with contact owned by U1.
#[allow(dead_code)]
pub fn scenario_records() -> Vec<CrmAppointment> {
    vec![
        appointment("A", Some("U1"), None, None),
        appointment("B", Some("U2"), Some("T1"), None),
        appointment("C", Some("U2"), Some("T2"), None),
        appointment("D", None, None, Some("U1")),
    ]
}

/// In-memory stand-in for the CRM that can be told to fail.
#[allow(dead_code)]
#[derive(Default)]
pub struct FakeCrm {
    users: Vec<CrmUser>,
    users_fail: bool,
    per_user: HashMap<String, Vec<CrmAppointment>>,
    per_user_fail: bool,
    location: Vec<CrmAppointment>,
    location_fail: bool,
    calls: Mutex<Vec<AppointmentScope>>,
}

#[allow(dead_code)]
impl FakeCrm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, users: Vec<CrmUser>) -> Self {
        self.users = users;
        self
    }

    pub fn with_user_events(mut self, crm_user_id: &str, events: Vec<CrmAppointment>) -> Self {
        self.per_user.insert(crm_user_id.to_string(), events);
        self
    }

    pub fn with_location_events(mut self, events: Vec<CrmAppointment>) -> Self {
        self.location = events;
        self
    }

    pub fn failing_users(mut self) -> Self {
        self.users_fail = true;
        self
    }

    pub fn failing_user_events(mut self) -> Self {
        self.per_user_fail = true;
        self
    }

    pub fn failing_location_events(mut self) -> Self {
        self.location_fail = true;
        self
    }

    /// Appointment fetches made so far, in order.
    pub fn calls(&self) -> Vec<AppointmentScope> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserDirectory for FakeCrm {
    async fn list_users(&self) -> Result<Vec<CrmUser>, AppError> {
        if self.users_fail {
            return Err(AppError::CrmApi("connection reset".to_string()));
        }
        Ok(self.users.clone())
    }
}

#[async_trait]
impl AppointmentSource for FakeCrm {
    async fn fetch(
        &self,
        scope: &AppointmentScope,
        _window: &TimeWindow,
    ) -> Result<Vec<CrmAppointment>, AppError> {
        self.calls.lock().unwrap().push(scope.clone());
        match scope {
            AppointmentScope::AssignedTo(_) if self.per_user_fail => {
                Err(AppError::CrmApi("HTTP 500 Internal Server Error".to_string()))
            }
            AppointmentScope::AssignedTo(id) => {
                Ok(self.per_user.get(id).cloned().unwrap_or_default())
            }
            AppointmentScope::Location if self.location_fail => {
                Err(AppError::CrmApi("operation timed out".to_string()))
            }
            AppointmentScope::Location => Ok(self.location.clone()),
        }
    }
}

/// Create a test app backed by an in-memory store and a fake CRM.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app(store: MemoryUserStore, crm: Arc<FakeCrm>) -> (axum::Router, Arc<AppState>) {
    let config = Config::default();
    let users: Arc<dyn UserStore> = Arc::new(store);
    let appointment_service = AppointmentService::new(crm.clone(), crm, users.clone());

    let state = Arc::new(AppState {
        config,
        users,
        appointment_service,
    });

    (create_router(state.clone()), state)
}

/// Create a session token the auth middleware accepts.
#[allow(dead_code)]
pub fn create_test_jwt(user_id: &str, signing_key: &[u8]) -> String {
    solarops_api::middleware::auth::create_jwt(user_id, signing_key)
        .expect("Failed to create JWT")
}
