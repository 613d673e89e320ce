// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API authentication and CORS tests.
//!
//! These tests verify that:
//! 1. Protected routes reject requests without valid tokens
//! 2. Protected routes accept bearer tokens and the session cookie
//! 3. CORS preflight requests return correct headers

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use solarops_api::db::MemoryUserStore;
use solarops_api::middleware::SESSION_COOKIE;
use solarops_api::models::UserRole;
use std::sync::Arc;
use tower::ServiceExt;

mod common;

use common::{create_test_app, create_test_jwt, test_user, FakeCrm};

fn app_with_user(user_id: &str) -> (axum::Router, Vec<u8>) {
    let store = MemoryUserStore::new();
    store.insert(test_user(user_id, UserRole::SalesRep, Some("U1"), None));
    let crm = Arc::new(FakeCrm::new().with_users(vec![common::crm_user("U1", "Test User")]));
    let (app, state) = create_test_app(store, crm);
    (app, state.config.jwt_signing_key.clone())
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let (app, _) = app_with_user("user_1");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/appointments")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_invalid_token() {
    let (app, _) = app_with_user("user_1");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/appointments")
                .header(header::AUTHORIZATION, "Bearer invalid.token.here")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_key_rejected() {
    let (app, _) = app_with_user("user_1");
    let token = create_test_jwt("user_1", b"some_other_key_that_is_long_enough");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_valid_token() {
    let (app, signing_key) = app_with_user("user_1");
    let token = create_test_jwt("user_1", &signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/appointments")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_protected_route_with_session_cookie() {
    let (app, signing_key) = app_with_user("user_1");
    let token = create_test_jwt("user_1", &signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/me")
                .header(header::COOKIE, format!("{}={}", SESSION_COOKIE, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_valid_token_for_unknown_user_is_not_found() {
    let (app, signing_key) = app_with_user("user_1");
    let token = create_test_jwt("ghost", &signing_key);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/appointments")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = app_with_user("user_1");

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/appointments")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // OPTIONS should return 200 (CORS preflight success)
    assert_eq!(response.status(), StatusCode::OK);

    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
}

#[tokio::test]
async fn test_public_route_no_auth_required() {
    let (app, _) = app_with_user("user_1");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}
