// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SolarOps API: field appointments for a solar installation sales team.
//!
//! This crate serves the appointment calendar for surveyors, sales reps
//! and admins. Appointments live in GoHighLevel; each caller sees the
//! subset their role and CRM assignment entitle them to.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::UserStore;
use services::AppointmentService;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserStore>,
    pub appointment_service: AppointmentService,
}
