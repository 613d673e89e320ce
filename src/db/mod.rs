// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (Firestore, plus an in-memory store used by tests).

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryUserStore;

use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
}

/// User profile storage used by the request path.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Get a user by internal ID.
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError>;

    /// Record the user's CRM user ID. Idempotent.
    async fn set_ghl_user_id(&self, user_id: &str, ghl_user_id: &str) -> Result<(), AppError>;
}
