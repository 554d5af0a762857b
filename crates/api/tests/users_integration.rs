//! Integration tests for registration, login and session endpoints.
//!
//! Tests cover:
//! - POST /api/v1/users/otp
//! - POST /api/v1/users/register
//! - POST /api/v1/users/login
//! - POST /api/v1/users/logout
//! - GET /api/v1/users/me and /api/v1/users/:id

mod common;

use axum::http::{Method, StatusCode};
use common::{
    get_request, get_request_with_auth, json_request, json_request_with_auth,
    parse_response_body, register_and_login, registration_body, request_otp, setup, unique_phone,
};
use serde_json::json;
use tower::ServiceExt;

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_login_and_fetch_profile() {
    let (_pool, app) = setup().await;

    let user = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/users/me", &user.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["id"].as_i64(), Some(user.id));
    assert_eq!(body["telphone"].as_str(), Some(user.telphone.as_str()));
    assert!(body.get("encryptPassword").is_none());

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/users/{}", user.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_with_wrong_code() {
    let (_pool, app) = setup().await;
    let telphone = unique_phone();
    let code = request_otp(&app, &telphone).await;
    let wrong = if code == "000000" { "111111" } else { "000000" };

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/register",
            registration_body(&telphone, wrong, "pw"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 10001);

    // The code was consumed by the failed attempt.
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/register",
            registration_body(&telphone, &code, "pw"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_without_requesting_code() {
    let (_pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/register",
            registration_body(&unique_phone(), "123456", "pw"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_otp_for_registered_phone_rejected() {
    let (_pool, app) = setup().await;
    let user = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/otp",
            json!({ "telphone": user.telphone }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 10001);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_unknown_phone() {
    let (_pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/login",
            json!({ "telphone": unique_phone(), "password": "whatever" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 20001);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let (_pool, app) = setup().await;
    let user = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/login",
            json!({ "telphone": user.telphone, "password": "not it" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 20002);
}

#[tokio::test]
async fn test_login_response_shape() {
    let (_pool, app) = setup().await;
    let user = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users/login",
            json!({ "telphone": user.telphone, "password": user.password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 3600);
    assert_eq!(body["user"]["id"].as_i64(), Some(user.id));
    assert_ne!(body["token"].as_str(), Some(user.token.as_str()));
}

// =============================================================================
// Logout
// =============================================================================

#[tokio::test]
async fn test_logout_invalidates_session() {
    let (_pool, app) = setup().await;
    let user = register_and_login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request_with_auth(
            Method::POST,
            "/api/v1/users/logout",
            json!({}),
            &user.token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/users/me", &user.token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 20003);
}

#[tokio::test]
async fn test_get_missing_user() {
    let (_pool, app) = setup().await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/users/2147483647"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = parse_response_body(response).await;
    assert_eq!(body["businessCode"], 20001);
}
