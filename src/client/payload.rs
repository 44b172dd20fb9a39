//! Wire types for the license-check exchange.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request payload for the license endpoint.
///
/// Leaving `client_id` as `None` omits the field entirely, which the server
/// treats as a malformed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub license_key: String,
}

impl LicenseRequest {
    pub fn new(client_id: Option<&str>, license_key: &str) -> Self {
        Self {
            client_id: client_id.map(str::to_string),
            license_key: license_key.to_string(),
        }
    }

    /// Compact JSON rendering used in progress output.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "<unserializable payload>".to_string())
    }
}

/// What came back from the endpoint.
///
/// The body schema belongs to the server; it is kept as opaque JSON and only
/// logged. `body` is `None` when the response was empty or not JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl LicenseResponse {
    /// Build a response from a status and raw body bytes, tolerating non-JSON bodies.
    pub fn from_bytes(status: u16, bytes: &[u8]) -> Self {
        Self {
            status,
            body: serde_json::from_slice(bytes).ok(),
        }
    }
}
