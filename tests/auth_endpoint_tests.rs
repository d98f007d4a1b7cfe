// SPDX-License-Identifier: MIT

//! Mock authentication endpoint tests.
//!
//! Login must succeed only for the one fixed demo pair; registration
//! enforces field presence and the password policy; `me` always answers
//! with the fixed demo user.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn login_succeeds_for_the_demo_pair() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "demo@frenup.com", "password": "demo123" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["data"]["token"], "demo-jwt-token-12345");
    assert_eq!(body["data"]["user"]["email"], "demo@frenup.com");
    assert_eq!(body["data"]["user"]["username"], "demouser");
}

#[tokio::test]
async fn login_rejects_anything_else_with_401() {
    let (app, _) = common::create_test_app();

    for (email, password) in [
        ("demo@frenup.com", "wrong"),
        ("someone@frenup.com", "demo123"),
        ("", ""),
    ] {
        let response = app
            .clone()
            .oneshot(common::json_request(
                "POST",
                "/api/auth/login",
                json!({ "email": email, "password": password }),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = common::body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Invalid credentials");
    }
}

#[tokio::test]
async fn login_requires_both_fields() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "demo@frenup.com" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Email and password are required");
}

#[tokio::test]
async fn register_requires_all_fields() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({ "email": "new@frenup.com", "password": "secret1" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn register_rejects_short_passwords() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "new@frenup.com",
                "password": "12345",
                "name": "New User",
                "username": "newuser",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = common::body_json(response).await;
    assert_eq!(body["message"], "Password must be at least 6 characters");
}

#[tokio::test]
async fn register_returns_a_fresh_user_and_token() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({
                "email": "new@frenup.com",
                "password": "secret1",
                "name": "New User",
                "username": "newuser",
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["email"], "new@frenup.com");
    assert_eq!(body["data"]["user"]["username"], "newuser");

    let token = body["data"]["token"].as_str().unwrap();
    assert!(token.starts_with("demo-jwt-token-"));
    assert_ne!(token, "demo-jwt-token-12345");
}

#[tokio::test]
async fn me_always_returns_the_fixed_demo_user() {
    let (app, _) = common::create_test_app();

    // No token supplied at all; the demo backend does not verify
    let response = app
        .oneshot(common::empty_request("GET", "/api/auth/me"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["username"], "demouser");
    assert_eq!(body["data"]["name"], "Demo User");
}

#[tokio::test]
async fn logout_is_acknowledged() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(common::json_request("POST", "/api/auth/logout", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = common::body_json(response).await;
    assert_eq!(body["success"], true);
}
