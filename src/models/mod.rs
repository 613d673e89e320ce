// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod appointment;
pub mod user;

pub use appointment::{
    AppointmentStatus, AppointmentsResponse, CrmAppointment, CrmContact, CrmUser,
    NormalizedAppointment,
};
pub use user::{User, UserRole};
