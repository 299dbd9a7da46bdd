//! Integration tests for the 401 → refresh → replay flow
//!
//! Every test runs the real client against a wiremock backend. Protected
//! endpoints answer 401 for the stale token and 200 for the refreshed one.

mod support;

use std::time::Duration;

use fincontrol_common::auth::CredentialStore;
use fincontrol_common::testing::MockCredentialStore;
use fincontrol_infra::http::{ApiError, RefreshError};
use serde_json::{json, Value};
use support::Harness;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_protected(harness: &Harness, stale: &str, fresh: &str) {
    Mock::given(method("GET"))
        .and(path("/despesas/1"))
        .and(header("Authorization", format!("Bearer {stale}").as_str()))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&harness.server)
        .await;

    Mock::given(method("GET"))
        .and(path("/despesas/1"))
        .and(header("Authorization", format!("Bearer {fresh}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::despesa_json(1, "Aluguel")))
        .mount(&harness.server)
        .await;
}

#[tokio::test]
async fn test_concurrent_401s_share_one_refresh() {
    let harness = Harness::signed_in("stale", "r1").await;
    mount_protected(&harness, "stale", "fresh").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_json(json!({ "refreshToken": "r1" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "fresh", "refreshToken": "r2" }))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = &harness.client;
    let (a, b, c) = tokio::join!(
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
    );

    for result in [a, b, c] {
        assert_eq!(result.unwrap()["descricao"], "Aluguel");
    }
    assert_eq!(harness.store.access_token().unwrap().as_deref(), Some("fresh"));
    assert_eq!(harness.store.refresh_token().unwrap().as_deref(), Some("r2"));
    assert_eq!(harness.store.clear_calls(), 0);
    assert_eq!(harness.session.calls(), 0);
    assert!(!client.coordinator().is_refreshing());
}

#[tokio::test]
async fn test_failed_refresh_rejects_every_waiter_and_ends_session_once() {
    let harness = Harness::signed_in("stale", "r1").await;
    mount_protected(&harness, "stale", "fresh").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("refresh expired")
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = &harness.client;
    let (a, b, c) = tokio::join!(
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
    );

    let expected = ApiError::RefreshFailed(RefreshError::Rejected {
        status: 401,
        body: "refresh expired".to_string(),
    });
    for result in [a, b, c] {
        assert_eq!(result.unwrap_err(), expected);
    }

    assert_eq!(harness.store.clear_calls(), 1);
    assert_eq!(harness.store.access_token().unwrap(), None);
    assert_eq!(harness.session.calls(), 1);
    assert_eq!(harness.session.last_path().as_deref(), Some("/login"));
}

#[tokio::test]
async fn test_refresh_without_rotated_refresh_token_keeps_the_old_one() {
    let harness = Harness::signed_in("stale", "r1").await;
    mount_protected(&harness, "stale", "fresh").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let despesa: Value = harness.client.get("/despesas/1").await.unwrap();

    assert_eq!(despesa["id"], 1);
    assert_eq!(harness.store.access_token().unwrap().as_deref(), Some("fresh"));
    assert_eq!(harness.store.refresh_token().unwrap().as_deref(), Some("r1"));
    assert_eq!(harness.store.set_refresh_calls(), 0);
}

#[tokio::test]
async fn test_forbidden_is_not_refreshed() {
    let harness = Harness::signed_in("valid", "r1").await;

    Mock::given(method("GET"))
        .and(path("/usuarios"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "x" })))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = harness.client.get::<Value>("/usuarios").await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 403, body: "forbidden".to_string() });
    assert_eq!(harness.store.clear_calls(), 0);
    assert_eq!(harness.session.calls(), 0);
}

#[tokio::test]
async fn test_replayed_request_is_not_refreshed_again() {
    let harness = Harness::signed_in("stale", "r1").await;

    Mock::given(method("GET"))
        .and(path("/metas"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/metas"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(401).set_body_string("still unauthorized"))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let err = harness.client.get::<Value>("/metas").await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 401, body: "still unauthorized".to_string() });
    assert_eq!(harness.store.clear_calls(), 0);
    assert_eq!(harness.session.calls(), 0);
}

#[tokio::test]
async fn test_missing_refresh_token_returns_original_401() {
    let harness = Harness::new(MockCredentialStore::access_only("stale")).await;

    Mock::given(method("GET"))
        .and(path("/despesas/1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "x" })))
        .expect(0)
        .mount(&harness.server)
        .await;

    let err = harness.client.get::<Value>("/despesas/1").await.unwrap_err();

    assert_eq!(err, ApiError::Status { status: 401, body: "token expired".to_string() });
    assert_eq!(harness.store.clear_calls(), 1);
    assert_eq!(harness.session.calls(), 1);
    assert!(!harness.client.coordinator().is_refreshing());
}

#[tokio::test]
async fn test_late_401_after_refresh_replays_with_rotated_token() {
    let harness = Harness::signed_in("stale", "r1").await;
    mount_protected(&harness, "stale", "fresh").await;

    // Rejected for the stale token, but only after the refresh settled
    Mock::given(method("GET"))
        .and(path("/despesas/2"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("token expired")
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/despesas/2"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(support::despesa_json(2, "Internet")))
        .expect(1)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh", "refreshToken": "r2" })),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let client = &harness.client;
    let (slow, fast) =
        tokio::join!(client.get::<Value>("/despesas/2"), client.get::<Value>("/despesas/1"));

    assert_eq!(fast.unwrap()["descricao"], "Aluguel");
    assert_eq!(slow.unwrap()["descricao"], "Internet");
    assert_eq!(harness.store.access_token().unwrap().as_deref(), Some("fresh"));
    assert_eq!(harness.store.clear_calls(), 0);
    assert_eq!(harness.session.calls(), 0);
    assert!(!client.coordinator().is_refreshing());
}

#[tokio::test]
async fn test_missing_refresh_token_ends_session_once_for_concurrent_401s() {
    let harness = Harness::new(MockCredentialStore::access_only("stale")).await;

    Mock::given(method("GET"))
        .and(path("/despesas/1"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string("token expired")
                .set_delay(Duration::from_millis(100)),
        )
        .expect(3)
        .mount(&harness.server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "x" })))
        .expect(0)
        .mount(&harness.server)
        .await;

    let client = &harness.client;
    let (a, b, c) = tokio::join!(
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
        client.get::<Value>("/despesas/1"),
    );
    let errors: Vec<ApiError> = [a, b, c].into_iter().map(Result::unwrap_err).collect();

    let original = ApiError::Status { status: 401, body: "token expired".to_string() };
    let missing = ApiError::RefreshFailed(RefreshError::MissingRefreshToken);
    assert_eq!(errors.iter().filter(|e| **e == original).count(), 1);
    assert_eq!(errors.iter().filter(|e| **e == missing).count(), 2);
    assert_eq!(harness.store.clear_calls(), 1);
    assert_eq!(harness.session.calls(), 1);
    assert!(!client.coordinator().is_refreshing());
}

#[tokio::test]
async fn test_unstorable_refresh_ends_session() {
    let harness = Harness::signed_in("stale", "r1").await;
    mount_protected(&harness, "stale", "fresh").await;

    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": "fresh" })))
        .mount(&harness.server)
        .await;

    harness.store.fail_writes(true);
    let err = harness.client.get::<Value>("/despesas/1").await.unwrap_err();

    assert!(matches!(err, ApiError::RefreshFailed(RefreshError::Store(_))));
    assert_eq!(harness.store.clear_calls(), 1);
    assert_eq!(harness.session.calls(), 1);
}

#[tokio::test]
async fn test_server_errors_pass_through_without_refresh() {
    let harness = Harness::signed_in("valid", "r1").await;

    Mock::given(method("GET"))
        .and(path("/dashboard/saldo"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&harness.server)
        .await;

    let err = harness.client.get::<Value>("/dashboard/saldo").await.unwrap_err();

    assert_eq!(err.http_status(), Some(503));
    assert!(err.should_retry());
    assert_eq!(harness.store.set_access_calls(), 0);
}
