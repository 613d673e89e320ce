// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory user store backing the test suites; the server always uses Firestore.

use crate::db::UserStore;
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

/// User profiles keyed by internal ID.
#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<DashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a profile.
    pub fn insert(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    /// Snapshot of a profile.
    pub fn get(&self, user_id: &str) -> Option<User> {
        self.users.get(user_id).map(|entry| entry.value().clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        Ok(self.get(user_id))
    }

    async fn set_ghl_user_id(&self, user_id: &str, ghl_user_id: &str) -> Result<(), AppError> {
        let mut entry = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if entry.ghl_user_id.as_deref() != Some(ghl_user_id) {
            entry.ghl_user_id = Some(ghl_user_id.to_string());
            entry.updated_at = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
        }
        Ok(())
    }
}
