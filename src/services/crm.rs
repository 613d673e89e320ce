// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Narrow capabilities the appointment path needs from the CRM.
//!
//! `GhlClient` is the production implementation; tests plug in fakes.

use crate::error::AppError;
use crate::models::{CrmAppointment, CrmUser};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Which appointments to ask the CRM for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppointmentScope {
    /// Appointments the CRM associates with one CRM user.
    AssignedTo(String),
    /// Every appointment in the configured location.
    Location,
}

/// Half-open time range `[start, end)` for appointment queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window spanning `days_back` before `now` to `days_ahead` after it.
    pub fn around(now: DateTime<Utc>, days_back: u32, days_ahead: u32) -> Self {
        Self {
            start: now - Duration::days(i64::from(days_back)),
            end: now + Duration::days(i64::from(days_ahead)),
        }
    }
}

/// Lists the CRM users of the location.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<CrmUser>, AppError>;
}

/// Fetches raw appointment records from the CRM.
#[async_trait]
pub trait AppointmentSource: Send + Sync {
    async fn fetch(
        &self,
        scope: &AppointmentScope,
        window: &TimeWindow,
    ) -> Result<Vec<CrmAppointment>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_around() {
        let now = DateTime::from_timestamp(1_741_080_600, 0).unwrap();
        let window = TimeWindow::around(now, 2, 3);

        assert_eq!(window.end - window.start, Duration::days(5));
        assert_eq!(now - window.start, Duration::days(2));
    }
}
