//! Admin API handlers for license management.
//!
//! # Endpoints
//!
//! - `POST /api/admin/licenses` - Create a license
//! - `GET /api/admin/licenses` - List all licenses, latest expiry first
//! - `PATCH /api/admin/licenses/:client_id` - Set `valid_until` on every license of a client

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::ProbeError;
use crate::server::handlers::AppState;
use crate::server::store::LicenseRecord;

/// Validity given to new licenses when the request does not name one.
pub const DEFAULT_VALIDITY_DAYS: i64 = 30;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a license.
#[derive(Debug, Deserialize)]
pub struct CreateLicenseRequest {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub license_key: String,
    /// RFC 3339 timestamp or `YYYY-MM-DD`; defaults to 30 days from now
    pub valid_until: Option<String>,
}

/// Request body for updating a client's validity.
#[derive(Debug, Deserialize)]
pub struct UpdateValidityRequest {
    pub valid_until: String,
}

/// License as returned by the admin API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LicenseResponse {
    pub client_id: String,
    pub license_key: String,
    /// RFC 3339
    pub valid_until: String,
}

impl From<LicenseRecord> for LicenseResponse {
    fn from(record: LicenseRecord) -> Self {
        Self {
            client_id: record.client_id,
            license_key: record.license_key,
            valid_until: record.valid_until.to_rfc3339(),
        }
    }
}

/// Response for listing licenses.
#[derive(Debug, Serialize, Deserialize)]
pub struct ListLicensesResponse {
    pub licenses: Vec<LicenseResponse>,
    pub total: usize,
}

/// Response for a validity update.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateValidityResponse {
    pub client_id: String,
    pub updated: usize,
    pub valid_until: String,
}

// ============================================================================
// Error Type
// ============================================================================

/// Admin API errors.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("store error: {0}")]
    StoreError(String),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AdminError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            AdminError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            AdminError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            AdminError::StoreError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "code": code,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ProbeError> for AdminError {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::InvalidInput(msg) => AdminError::BadRequest(msg),
            ProbeError::AlreadyExists(msg) => AdminError::Conflict(msg),
            other => AdminError::StoreError(other.to_string()),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Parse an RFC 3339 timestamp, or a bare date taken as the end of that day (UTC).
pub fn parse_valid_until(s: &str) -> Result<DateTime<Utc>, AdminError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(23, 59, 59))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AdminError::BadRequest(format!(
                "invalid valid_until '{s}': expected RFC 3339 or YYYY-MM-DD"
            ))
        })
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a license.
///
/// `POST /api/admin/licenses`
pub async fn create_license_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLicenseRequest>,
) -> Result<(StatusCode, Json<LicenseResponse>), AdminError> {
    let valid_until = match payload.valid_until.as_deref() {
        Some(s) => parse_valid_until(s)?,
        None => Utc::now() + Duration::days(DEFAULT_VALIDITY_DAYS),
    };

    let record = state
        .store
        .create(&payload.client_id, &payload.license_key, valid_until)?;

    info!(client_id = %record.client_id, "Created license");

    Ok((StatusCode::CREATED, Json(record.into())))
}

/// List all licenses, latest `valid_until` first.
///
/// `GET /api/admin/licenses`
pub async fn list_licenses_handler(
    State(state): State<AppState>,
) -> Result<Json<ListLicensesResponse>, AdminError> {
    let licenses: Vec<LicenseResponse> = state
        .store
        .list()?
        .into_iter()
        .map(LicenseResponse::from)
        .collect();

    Ok(Json(ListLicensesResponse {
        total: licenses.len(),
        licenses,
    }))
}

/// Set `valid_until` on every license held by a client.
///
/// `PATCH /api/admin/licenses/:client_id`
pub async fn update_validity_handler(
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<UpdateValidityRequest>,
) -> Result<Json<UpdateValidityResponse>, AdminError> {
    let valid_until = parse_valid_until(&payload.valid_until)?;

    let updated = state.store.update_validity(&client_id, valid_until)?;
    if updated == 0 {
        return Err(AdminError::NotFound(format!(
            "no licenses for client_id={client_id}"
        )));
    }

    info!(client_id = %client_id, updated, "Updated license validity");

    Ok(Json(UpdateValidityResponse {
        client_id,
        updated,
        valid_until: valid_until.to_rfc3339(),
    }))
}
