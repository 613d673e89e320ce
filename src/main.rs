// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SolarOps API Server
//!
//! Serves role-filtered GoHighLevel appointments to the field team.

use solarops_api::{
    config::Config,
    db::{FirestoreDb, UserStore},
    services::{AppointmentService, GhlClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        location = %config.ghl_location_id,
        "Starting SolarOps API"
    );

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;
    let users: Arc<dyn UserStore> = Arc::new(db);

    // One client serves both the user directory and the appointment source
    let ghl = Arc::new(GhlClient::new(&config)?);
    tracing::info!(base_url = %config.ghl_base_url, "GoHighLevel client initialized");

    let appointment_service = AppointmentService::new(ghl.clone(), ghl, users.clone());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        users,
        appointment_service,
    });

    // Build router
    let app = solarops_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("solarops_api=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
