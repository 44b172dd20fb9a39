// src/server/mod.rs

//! Stand-in license endpoint used for local runs and tests.
//!
//! This module contains:
//! - `store`    → In-memory license table keyed by client/key pair
//! - `handlers` → Axum handlers for `POST`/`OPTIONS`/`GET /api`
//! - `routes`   → Router builder and background spawn helper
//! - `logging`  → Request-id logging middleware
//! - `admin`    → License create/list/update API (requires `admin-api` feature)

#[cfg(feature = "admin-api")]
pub mod admin;
pub mod handlers;
pub mod logging;
pub mod routes;
pub mod store;

pub use handlers::{
    check_license_handler, method_not_allowed_handler, preflight_handler, AppState,
    CheckDecision,
};
pub use routes::{build_router, spawn_server, LICENSE_PATH};
pub use store::{LicenseRecord, LicenseStore};

#[cfg(feature = "admin-api")]
pub use admin::{
    create_license_handler, list_licenses_handler, update_validity_handler, AdminError,
    CreateLicenseRequest, LicenseResponse, ListLicensesResponse, UpdateValidityRequest,
    UpdateValidityResponse,
};

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Method, Request, StatusCode},
        Router,
    };
    use chrono::{Duration, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    fn test_router() -> Router {
        let store = LicenseStore::new();
        store
            .insert("TEST_NEW_CLIENT", "NEW_TEST_KEY_123", Utc::now() + Duration::days(10))
            .unwrap();
        store
            .insert("OLD_CLIENT", "OLD_KEY", Utc::now() - Duration::days(10))
            .unwrap();

        build_router(AppState {
            store: Arc::new(store),
        })
    }

    async fn call(method: Method, body: &str) -> (StatusCode, Value, header::HeaderMap) {
        let request = Request::builder()
            .method(method)
            .uri(LICENSE_PATH)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = test_router().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json, headers)
    }

    #[tokio::test]
    async fn valid_pair_returns_200() {
        let (status, body, headers) = call(
            Method::POST,
            r#"{"client_id":"TEST_NEW_CLIENT","license_key":"NEW_TEST_KEY_123"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "valid");
        assert!(body["valid_until"].is_string());
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers.contains_key(logging::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn expired_pair_returns_403_with_status() {
        let (status, body, _) =
            call(Method::POST, r#"{"client_id":"OLD_CLIENT","license_key":"OLD_KEY"}"#).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], "expired");
    }

    #[tokio::test]
    async fn unknown_pair_returns_403() {
        let (status, body, _) = call(
            Method::POST,
            r#"{"client_id":"TEST_NEW_CLIENT","license_key":"FAKE_KEY_99999"}"#,
        )
        .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "Subscription expired or invalid key.");
    }

    #[tokio::test]
    async fn missing_or_empty_fields_return_400() {
        for payload in [
            r#"{"license_key":"NEW_TEST_KEY_123"}"#,
            r#"{"client_id":"TEST_NEW_CLIENT"}"#,
            r#"{"client_id":"TEST_NEW_CLIENT","license_key":""}"#,
            r#"{"client_id":null,"license_key":"NEW_TEST_KEY_123"}"#,
        ] {
            let (status, body, _) = call(Method::POST, payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert_eq!(body["error"], "Missing client_id or license_key.");
        }
    }

    #[tokio::test]
    async fn non_string_fields_count_as_missing() {
        for payload in [
            r#"{"client_id":123,"license_key":"NEW_TEST_KEY_123"}"#,
            r#"{"client_id":"TEST_NEW_CLIENT","license_key":true}"#,
            r#"{"client_id":["TEST_NEW_CLIENT"],"license_key":"NEW_TEST_KEY_123"}"#,
        ] {
            let (status, body, _) = call(Method::POST, payload).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "payload: {payload}");
            assert_eq!(body["error"], "Missing client_id or license_key.");
        }
    }

    #[tokio::test]
    async fn decision_is_attached_for_the_request_log() {
        let cases = [
            (
                r#"{"client_id":"TEST_NEW_CLIENT","license_key":"NEW_TEST_KEY_123"}"#,
                CheckDecision::Valid,
            ),
            (
                r#"{"client_id":"OLD_CLIENT","license_key":"OLD_KEY"}"#,
                CheckDecision::Expired,
            ),
            (
                r#"{"client_id":"TEST_NEW_CLIENT","license_key":"FAKE_KEY_99999"}"#,
                CheckDecision::UnknownLicense,
            ),
            (r#"{"license_key":"NEW_TEST_KEY_123"}"#, CheckDecision::MissingFields),
            ("not json", CheckDecision::MalformedBody),
        ];

        for (payload, expected) in cases {
            let request = Request::builder()
                .method(Method::POST)
                .uri(LICENSE_PATH)
                .body(Body::from(payload))
                .unwrap();

            let response = test_router().oneshot(request).await.unwrap();
            assert_eq!(
                response.extensions().get::<CheckDecision>(),
                Some(&expected),
                "payload: {payload}"
            );
        }
    }

    #[tokio::test]
    async fn unreadable_body_returns_400() {
        let (status, body, _) = call(Method::POST, "client_id=TEST_NEW_CLIENT").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid JSON body.");
    }

    #[tokio::test]
    async fn preflight_and_get() {
        let (status, body, headers) = call(Method::OPTIONS, "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({}));
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_METHODS],
            "POST, OPTIONS"
        );

        let (status, body, _) = call(Method::GET, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method Not Allowed");
    }
}
