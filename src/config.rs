// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Cloud Run injects secrets (`GHL_API_KEY`, `JWT_SIGNING_KEY`) as
//! environment variables via secret bindings, so everything is read from
//! the environment once at startup.

use std::env;
use std::str::FromStr;

/// Default GoHighLevel v2 API host.
pub const DEFAULT_GHL_BASE_URL: &str = "https://services.leadconnectorhq.com";
/// API version header value expected by the GoHighLevel v2 API.
pub const DEFAULT_GHL_API_VERSION: &str = "2021-04-15";
/// Largest appointment window, in days, on either side of now.
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// GoHighLevel location (sub-account) the organization lives in
    pub ghl_location_id: String,
    /// GoHighLevel API base URL (overridable for tests)
    pub ghl_base_url: String,
    /// Value of the `Version` header sent to GoHighLevel
    pub ghl_api_version: String,
    /// Per-request timeout for CRM calls, in seconds
    pub ghl_timeout_secs: u64,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Default number of past days included in the appointment window
    pub appointment_days_back: u32,
    /// Default number of future days included in the appointment window
    pub appointment_days_ahead: u32,

    // --- Secrets ---
    /// GoHighLevel private integration token
    pub ghl_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            ghl_location_id: "test_location".to_string(),
            ghl_base_url: "http://127.0.0.1:9".to_string(),
            ghl_api_version: DEFAULT_GHL_API_VERSION.to_string(),
            ghl_timeout_secs: 5,
            frontend_url: "http://localhost:5173".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            appointment_days_back: 30,
            appointment_days_ahead: 90,
            ghl_api_key: "test_api_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            ghl_location_id: required("GHL_LOCATION_ID")?,
            ghl_base_url: env::var("GHL_API_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GHL_BASE_URL.to_string()),
            ghl_api_version: env::var("GHL_API_VERSION")
                .unwrap_or_else(|_| DEFAULT_GHL_API_VERSION.to_string()),
            ghl_timeout_secs: parsed_or("GHL_TIMEOUT_SECS", 15)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: parsed_or("PORT", 8080)?,
            appointment_days_back: window_days("APPOINTMENT_DAYS_BACK", 30)?,
            appointment_days_ahead: window_days("APPOINTMENT_DAYS_AHEAD", 90)?,

            ghl_api_key: required("GHL_API_KEY")?,
            jwt_signing_key: required("JWT_SIGNING_KEY")?.into_bytes(),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .map(|v| v.trim().to_string())
        .map_err(|_| ConfigError::Missing(name))
}

fn parsed_or<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// A window length in days, at most `MAX_WINDOW_DAYS`.
fn window_days(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    let days = parsed_or(name, default)?;
    if days > MAX_WINDOW_DAYS {
        return Err(ConfigError::Invalid(name, days.to_string()));
    }
    Ok(days)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}
