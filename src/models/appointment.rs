// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment models: the loosely-typed CRM records we read, and the
//! normalized shape we return to the frontend.
//!
//! The CRM payloads are uncontrolled, so every wire field is optional and
//! unknown fields are ignored.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Placeholder used when no customer name can be derived.
pub const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Treat `None`, `""` and whitespace-only strings the same way.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Calendar event as returned by the CRM.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmAppointment {
    pub id: Option<String>,
    pub title: Option<String>,
    pub assigned_user_id: Option<String>,
    pub team_id: Option<String>,
    pub contact: Option<CrmContact>,
    /// Newer payloads carry `appointmentStatus`; older ones only `status`.
    pub appointment_status: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub address: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl CrmAppointment {
    pub fn record_id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    pub fn assigned_user_id(&self) -> Option<&str> {
        non_empty(&self.assigned_user_id)
    }

    pub fn assigned_team_id(&self) -> Option<&str> {
        non_empty(&self.team_id)
    }

    pub fn contact_assigned_user_id(&self) -> Option<&str> {
        self.contact
            .as_ref()
            .and_then(|c| non_empty(&c.assigned_to))
    }

    pub fn raw_status(&self) -> &str {
        non_empty(&self.appointment_status)
            .or_else(|| non_empty(&self.status))
            .unwrap_or("")
    }
}

/// Contact embedded in a CRM appointment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmContact {
    pub id: Option<String>,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address1: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    /// CRM user the contact is assigned to.
    pub assigned_to: Option<String>,
}

impl CrmContact {
    /// `name`, else "first last".
    pub fn full_name(&self) -> Option<String> {
        if let Some(name) = non_empty(&self.name) {
            return Some(name.to_string());
        }
        let parts: Vec<&str> = [non_empty(&self.first_name), non_empty(&self.last_name)]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    /// Single-line postal address, if any part of it is known.
    pub fn postal_address(&self) -> Option<String> {
        let street = non_empty(&self.address1);
        let state_zip: Vec<&str> = [non_empty(&self.state), non_empty(&self.postal_code)]
            .into_iter()
            .flatten()
            .collect();
        let state_zip = (!state_zip.is_empty()).then(|| state_zip.join(" "));

        let parts: Vec<&str> = [street, non_empty(&self.city), state_zip.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// User entry from the CRM location user list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmUser {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl CrmUser {
    pub fn display_name(&self) -> String {
        if let Some(name) = non_empty(&self.name) {
            return name.to_string();
        }
        [non_empty(&self.first_name), non_empty(&self.last_name)]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Internal appointment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// Map a free-form CRM status onto our three states.
    ///
    /// Substring match on the lower-cased value; anything unrecognized is
    /// still scheduled.
    pub fn from_crm(raw: &str) -> Self {
        let status = raw.to_lowercase();
        if status.contains("completed") || status.contains("done") {
            AppointmentStatus::Completed
        } else if status.contains("cancelled") {
            AppointmentStatus::Cancelled
        } else {
            AppointmentStatus::Scheduled
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

/// Appointment as exposed by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NormalizedAppointment {
    pub id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub address: Option<String>,
    /// RFC3339 UTC; `None` when the CRM timestamp could not be parsed.
    pub scheduled_at: Option<String>,
    pub ends_at: Option<String>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub ghl_appointment_id: String,
}

/// Response body for `GET /api/appointments`.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AppointmentsResponse {
    pub appointments: Vec<NormalizedAppointment>,
    pub total: u32,
}

impl AppointmentsResponse {
    pub fn empty() -> Self {
        Self {
            appointments: Vec::new(),
            total: 0,
        }
    }
}

impl From<Vec<NormalizedAppointment>> for AppointmentsResponse {
    fn from(appointments: Vec<NormalizedAppointment>) -> Self {
        let total = appointments.len() as u32;
        Self {
            appointments,
            total,
        }
    }
}
