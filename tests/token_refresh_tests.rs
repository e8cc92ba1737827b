// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Token refresh against a mock Strava OAuth endpoint.

use chrono::{TimeZone, Utc};
use strava_club_tracker::error::AppError;
use strava_club_tracker::models::Credentials;
use strava_club_tracker::services::{StravaClient, TokenManager};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::{credentials_text, token_body, TestEnv, TOKEN_PATH};

#[tokio::test]
async fn test_expired_token_is_refreshed_and_all_fields_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .and(body_string_contains("client_id=1001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body(
            "new-access",
            "new-refresh",
            1_900_000_000,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&server);
    let client = StravaClient::new(&env.config).unwrap();
    let mut creds = Credentials::from_key_values(&credentials_text(Some(1_000))).unwrap();

    let refreshed = TokenManager::new(&client, &mut creds)
        .ensure_valid()
        .await
        .expect("refresh should succeed");

    assert!(refreshed);
    assert_eq!(creds.access_token, "new-access");
    assert_eq!(creds.refresh_token, "new-refresh");
    assert_eq!(creds.expires_at, Some(1_900_000_000));
    assert_eq!(creds.expires_in, Some(21600));
    assert_eq!(creds.club_id, common::CLUB_ID);
}

#[tokio::test]
async fn test_missing_expiry_forces_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("a", "r", 1_900_000_000)))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&server);
    let client = StravaClient::new(&env.config).unwrap();
    let mut creds = Credentials::from_key_values(&credentials_text(None)).unwrap();

    assert!(TokenManager::new(&client, &mut creds).ensure_valid().await.unwrap());
    assert_eq!(creds.access_token, "a");
}

#[tokio::test]
async fn test_valid_token_skips_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let env = TestEnv::new(&server);
    let client = StravaClient::new(&env.config).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let mut creds =
        Credentials::from_key_values(&credentials_text(Some(now.timestamp() + 60))).unwrap();
    let before = creds.clone();

    let refreshed = TokenManager::new(&client, &mut creds)
        .ensure_valid_at(now)
        .await
        .unwrap();

    assert!(!refreshed);
    assert_eq!(creds, before);
}

#[tokio::test]
async fn test_rejected_refresh_is_authentication_error_and_leaves_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string(
            r#"{"message":"Bad Request","errors":[{"resource":"RefreshToken","code":"invalid"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let env = TestEnv::new(&server);
    let client = StravaClient::new(&env.config).unwrap();
    let mut creds = Credentials::from_key_values(&credentials_text(Some(1_000))).unwrap();
    let before = creds.clone();

    let err = TokenManager::new(&client, &mut creds)
        .ensure_valid()
        .await
        .unwrap_err();

    match err {
        AppError::Authentication { reason, body } => {
            assert_eq!(reason, "Unauthorized");
            assert!(body.contains("RefreshToken"));
        }
        other => panic!("expected authentication error, got {:?}", other),
    }
    assert_eq!(creds, before);
}

#[tokio::test]
async fn test_incomplete_token_response_leaves_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "new-access",
            "refresh_token": "new-refresh"
        })))
        .mount(&server)
        .await;

    let env = TestEnv::new(&server);
    let client = StravaClient::new(&env.config).unwrap();
    let mut creds = Credentials::from_key_values(&credentials_text(Some(1_000))).unwrap();
    let before = creds.clone();

    let result = TokenManager::new(&client, &mut creds).ensure_valid().await;

    assert!(matches!(result, Err(AppError::Authentication { .. })));
    assert_eq!(creds, before);
}
