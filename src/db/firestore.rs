// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations on user profiles.

use crate::db::{collections, UserStore};
use crate::error::AppError;
use crate::models::User;
use async_trait::async_trait;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: firestore::FirestoreDb,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self { client })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self { client })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by internal ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.client
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Store the CRM user ID on a profile.
    ///
    /// Fetch-modify-write; a no-op if the ID is already set. Concurrent
    /// callers for the same user write the same value.
    pub async fn set_ghl_user_id(&self, user_id: &str, ghl_user_id: &str) -> Result<(), AppError> {
        let mut user = self
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;

        if user.ghl_user_id.as_deref() == Some(ghl_user_id) {
            return Ok(());
        }

        user.ghl_user_id = Some(ghl_user_id.to_string());
        user.updated_at = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
        self.upsert_user(&user).await?;

        tracing::info!(user_id, ghl_user_id, "Cached CRM user ID on profile");
        Ok(())
    }
}

#[async_trait]
impl UserStore for FirestoreDb {
    async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        FirestoreDb::get_user(self, user_id).await
    }

    async fn set_ghl_user_id(&self, user_id: &str, ghl_user_id: &str) -> Result<(), AppError> {
        FirestoreDb::set_ghl_user_id(self, user_id, ghl_user_id).await
    }
}
