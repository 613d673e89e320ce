// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GoHighLevel API client.
//!
//! Handles:
//! - Listing the users of a location
//! - Listing calendar events for one user or the whole location
//! - Rate limit / credential error detection

use crate::config::Config;
use crate::error::AppError;
use crate::models::{CrmAppointment, CrmUser};
use crate::services::crm::{AppointmentScope, AppointmentSource, TimeWindow, UserDirectory};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// GoHighLevel API client bound to one location.
#[derive(Clone)]
pub struct GhlClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    api_version: String,
    location_id: String,
}

impl GhlClient {
    /// Create a new client from application config.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.ghl_timeout_secs))
            .build()
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            http,
            base_url: config.ghl_base_url.trim_end_matches('/').to_string(),
            api_key: config.ghl_api_key.clone(),
            api_version: config.ghl_api_version.clone(),
            location_id: config.ghl_location_id.clone(),
        })
    }

    /// List users of the location.
    ///
    /// Entries without an ID are dropped.
    pub async fn list_users(&self) -> Result<Vec<CrmUser>, AppError> {
        let url = format!("{}/users/", self.base_url);
        let query = [("locationId", self.location_id.clone())];

        let body: UsersEnvelope = self.get_json(&url, &query).await?;
        Ok(body
            .users
            .into_iter()
            .filter(|u| !u.id.trim().is_empty())
            .collect())
    }

    /// List calendar events in a time window, optionally for one CRM user.
    pub async fn list_events(
        &self,
        user_id: Option<&str>,
        window: &TimeWindow,
    ) -> Result<Vec<CrmAppointment>, AppError> {
        let url = format!("{}/calendars/events", self.base_url);

        let mut query = vec![
            ("locationId", self.location_id.clone()),
            ("startTime", window.start.timestamp_millis().to_string()),
            ("endTime", window.end.timestamp_millis().to_string()),
        ];
        if let Some(user_id) = user_id {
            query.push(("userId", user_id.to_string()));
        }

        let body: EventsEnvelope = self.get_json(&url, &query).await?;
        Ok(body.events)
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .bearer_auth(&self.api_key)
            .header("Version", &self.api_version)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::CrmApi(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// Check response and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("GoHighLevel rate limit hit (429)");
                return Err(AppError::CrmApi(AppError::CRM_RATE_LIMIT.to_string()));
            }

            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(AppError::CrmApi(AppError::CRM_TOKEN_ERROR.to_string()));
            }

            return Err(AppError::CrmApi(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::CrmApi(format!("JSON parse error: {}", e)))
    }
}

#[async_trait]
impl UserDirectory for GhlClient {
    async fn list_users(&self) -> Result<Vec<CrmUser>, AppError> {
        GhlClient::list_users(self).await
    }
}

#[async_trait]
impl AppointmentSource for GhlClient {
    async fn fetch(
        &self,
        scope: &AppointmentScope,
        window: &TimeWindow,
    ) -> Result<Vec<CrmAppointment>, AppError> {
        match scope {
            AppointmentScope::AssignedTo(user_id) => {
                self.list_events(Some(user_id.as_str()), window).await
            }
            AppointmentScope::Location => self.list_events(None, window).await,
        }
    }
}

/// `GET /users/` response.
#[derive(Debug, Deserialize)]
struct UsersEnvelope {
    #[serde(default)]
    users: Vec<CrmUser>,
}

/// `GET /calendars/events` response.
#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    #[serde(default)]
    events: Vec<CrmAppointment>,
}
