// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// Role assigned to an internal user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Surveyor,
    SalesRep,
    Installer,
    Manager,
}

/// User profile stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal user ID (also used as document ID)
    pub id: String,
    /// Email address
    pub email: Option<String>,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    pub role: UserRole,
    /// GoHighLevel user ID, once resolved
    #[serde(default)]
    pub ghl_user_id: Option<String>,
    /// GoHighLevel team ID, if the user belongs to one
    #[serde(default)]
    pub ghl_team_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl User {
    /// Name shown in the UI, and the one matched against the CRM user list.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }
}
