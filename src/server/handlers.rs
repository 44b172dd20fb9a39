use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{error, info, warn};

use crate::errors::{ProbeError, ProbeResult};
use crate::server::store::LicenseStore;

/// Shared application state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<LicenseStore>,
}

/// CORS headers attached to every response so browser-based clients can call the endpoint.
const CORS_HEADERS: [(header::HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
];

/// How `POST /api` decided a request.
///
/// Attached to the response as an extension so the request logger can
/// record it next to the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckDecision {
    Valid,
    Expired,
    UnknownLicense,
    MissingFields,
    MalformedBody,
    StoreFailure,
}

impl std::fmt::Display for CheckDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CheckDecision::Valid => "valid",
            CheckDecision::Expired => "expired",
            CheckDecision::UnknownLicense => "unknown_license",
            CheckDecision::MissingFields => "missing_fields",
            CheckDecision::MalformedBody => "malformed_body",
            CheckDecision::StoreFailure => "store_failure",
        };
        write!(f, "{}", s)
    }
}

fn json_response(status: StatusCode, body: Value) -> Response {
    (status, CORS_HEADERS, Json(body)).into_response()
}

fn decided(decision: CheckDecision, status: StatusCode, body: Value) -> Response {
    let mut response = json_response(status, body);
    response.extensions_mut().insert(decision);
    response
}

/// Store failures surface as a generic 500; details only go to the log.
impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        error!(error = %self, "Unexpected server error");
        decided(
            CheckDecision::StoreFailure,
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "An unexpected server error occurred." }),
        )
    }
}

/// Pull a non-empty string field out of the request body.
///
/// Non-string values count as missing.
fn required_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// Handler for `POST /api`.
///
/// Behavior:
/// - Body is not JSON → 400.
/// - `client_id` or `license_key` missing/empty → 400.
/// - No record for the pair → 403.
/// - Record still valid → 200 with `valid_until`.
/// - Record expired → 403 with `valid_until`.
pub async fn check_license_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> ProbeResult<Response> {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Rejecting unreadable request body");
            return Ok(decided(
                CheckDecision::MalformedBody,
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid JSON body." }),
            ));
        }
    };

    let (Some(client_id), Some(license_key)) = (
        required_str(&body, "client_id"),
        required_str(&body, "license_key"),
    ) else {
        warn!("Rejecting request with missing client_id or license_key");
        return Ok(decided(
            CheckDecision::MissingFields,
            StatusCode::BAD_REQUEST,
            json!({ "error": "Missing client_id or license_key." }),
        ));
    };

    let Some(valid_until) = state.store.valid_until(client_id, license_key)? else {
        info!(client_id = %client_id, "No matching license");
        return Ok(decided(
            CheckDecision::UnknownLicense,
            StatusCode::FORBIDDEN,
            json!({ "error": "Subscription expired or invalid key." }),
        ));
    };

    if valid_until > Utc::now() {
        info!(client_id = %client_id, "License valid");
        Ok(decided(
            CheckDecision::Valid,
            StatusCode::OK,
            json!({ "status": "valid", "valid_until": valid_until.to_rfc3339() }),
        ))
    } else {
        info!(client_id = %client_id, "License expired");
        Ok(decided(
            CheckDecision::Expired,
            StatusCode::FORBIDDEN,
            json!({ "status": "expired", "valid_until": valid_until.to_rfc3339() }),
        ))
    }
}

/// Handler for `OPTIONS /api` (CORS preflight).
pub async fn preflight_handler() -> Response {
    json_response(StatusCode::OK, json!({}))
}

/// Handler for `GET /api`.
pub async fn method_not_allowed_handler() -> Response {
    json_response(
        StatusCode::METHOD_NOT_ALLOWED,
        json!({ "error": "Method Not Allowed" }),
    )
}
