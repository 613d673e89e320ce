// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Appointment visibility rule and normalization.
//!
//! Precedence: an explicit assignment on the appointment beats the
//! contact's assignment, so an appointment assigned to one user never
//! leaks to another user who happens to own the same contact. Surveyors
//! additionally see anything assigned to their team.

use crate::models::appointment::{non_empty, UNKNOWN_CUSTOMER};
use crate::models::{AppointmentStatus, CrmAppointment, CrmContact, NormalizedAppointment, UserRole};
use crate::time_utils::{format_utc_rfc3339, parse_crm_timestamp};
use std::cmp::Ordering;
use std::collections::HashSet;

/// The requesting user, reduced to what the visibility rule looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Viewer {
    /// Sees every appointment.
    Admin,
    /// Sees own appointments plus anything assigned to their team.
    Surveyor {
        crm_user_id: String,
        crm_team_id: Option<String>,
    },
    /// Any other role: own appointments only.
    Member { crm_user_id: String },
}

impl Viewer {
    /// Build a viewer from a role and the user's resolved CRM identity.
    ///
    /// Returns `None` for a non-admin without a CRM user ID: there is
    /// nothing such a user can be shown.
    pub fn new(
        role: UserRole,
        crm_user_id: Option<&str>,
        crm_team_id: Option<&str>,
    ) -> Option<Self> {
        if role == UserRole::Admin {
            return Some(Viewer::Admin);
        }

        let crm_user_id = crm_user_id.map(str::trim).filter(|s| !s.is_empty())?;
        let crm_user_id = crm_user_id.to_string();

        Some(match role {
            UserRole::Surveyor => Viewer::Surveyor {
                crm_user_id,
                crm_team_id: crm_team_id
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            },
            _ => Viewer::Member { crm_user_id },
        })
    }

    /// Whether this viewer may see the record.
    pub fn can_see(&self, record: &CrmAppointment) -> bool {
        match self {
            Viewer::Admin => true,
            Viewer::Surveyor {
                crm_user_id,
                crm_team_id,
            } => {
                let team_match = match (record.assigned_team_id(), crm_team_id.as_deref()) {
                    (Some(record_team), Some(own_team)) => record_team == own_team,
                    _ => false,
                };
                let owner_match = match record.assigned_user_id() {
                    Some(assigned) => assigned == crm_user_id.as_str(),
                    None => record.contact_assigned_user_id() == Some(crm_user_id.as_str()),
                };
                owner_match || team_match
            }
            Viewer::Member { crm_user_id } => match record.assigned_user_id() {
                Some(assigned) => assigned == crm_user_id.as_str(),
                None => record.contact_assigned_user_id() == Some(crm_user_id.as_str()),
            },
        }
    }
}

/// Filter `records` down to what `viewer` may see, normalized.
///
/// Records without an ID are dropped, and each ID appears at most once
/// (first visible occurrence wins). Output is ordered by start time,
/// unparseable times last.
pub fn resolve_visible_appointments(
    records: &[CrmAppointment],
    viewer: &Viewer,
) -> Vec<NormalizedAppointment> {
    let mut seen = HashSet::new();

    let mut visible: Vec<NormalizedAppointment> = records
        .iter()
        .filter(|record| viewer.can_see(record))
        .filter_map(normalize)
        .filter(|appointment| seen.insert(appointment.ghl_appointment_id.clone()))
        .collect();

    visible.sort_by(|a, b| match (&a.scheduled_at, &b.scheduled_at) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    visible
}

/// Convert a CRM record to the API shape. `None` if the record has no ID.
pub fn normalize(record: &CrmAppointment) -> Option<NormalizedAppointment> {
    let id = record.record_id()?.to_string();
    let contact = record.contact.as_ref();

    let customer_name = contact
        .and_then(CrmContact::full_name)
        .or_else(|| contact.and_then(|c| non_empty(&c.email)).map(str::to_string))
        .or_else(|| non_empty(&record.title).map(str::to_string))
        .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());

    let address = non_empty(&record.address)
        .or_else(|| non_empty(&record.location))
        .map(str::to_string)
        .or_else(|| contact.and_then(CrmContact::postal_address));

    let timestamp = |raw: &Option<String>| {
        raw.as_deref()
            .and_then(parse_crm_timestamp)
            .map(format_utc_rfc3339)
    };

    Some(NormalizedAppointment {
        id: id.clone(),
        customer_name,
        customer_phone: contact
            .and_then(|c| non_empty(&c.phone))
            .map(str::to_string),
        customer_email: contact
            .and_then(|c| non_empty(&c.email))
            .map(str::to_string),
        address,
        scheduled_at: timestamp(&record.start_time),
        ends_at: timestamp(&record.end_time),
        status: AppointmentStatus::from_crm(record.raw_status()),
        notes: non_empty(&record.notes).map(str::to_string),
        ghl_appointment_id: id,
    })
}
