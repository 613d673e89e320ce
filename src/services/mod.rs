// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod appointments;
pub mod crm;
pub mod ghl;
pub mod identity;
pub mod visibility;

pub use appointments::{visible_appointments_for, AppointmentService};
pub use crm::{AppointmentScope, AppointmentSource, TimeWindow, UserDirectory};
pub use ghl::GhlClient;
pub use identity::{find_by_name, resolve_crm_identity, CrmIdentity};
pub use visibility::{normalize, resolve_visible_appointments, Viewer};
