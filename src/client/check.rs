use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::client::outcome::ValidationOutcome;
use crate::client::payload::{LicenseRequest, LicenseResponse};
use crate::config::ClientConfig;
use crate::errors::{ProbeError, ProbeResult};

/// Timeout applied to every license check unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends license-check requests and classifies the responses.
///
/// Each call is a single, independent POST: no retries and no memory of
/// earlier calls.
#[derive(Debug, Clone)]
pub struct LicenseCheckClient {
    http: Client,
    timeout: Duration,
}

impl LicenseCheckClient {
    /// Build a client whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> ProbeResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProbeError::ConfigError(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, timeout })
    }

    pub fn from_config(config: &ClientConfig) -> ProbeResult<Self> {
        Self::new(Duration::from_secs(config.timeout_secs))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// POST `request` as JSON to `url` and collect the status and body.
    ///
    /// Returns:
    /// - `Ok(LicenseResponse)` for any HTTP status, with `body` set only if it decoded as JSON.
    /// - `Err(NetworkError)` if the request could not be sent or timed out.
    pub async fn send(&self, url: &str, request: &LicenseRequest) -> ProbeResult<LicenseResponse> {
        let resp = self.http.post(url).json(request).send().await?; // → ProbeError::NetworkError

        let status = resp.status().as_u16();

        // The status is already known; a body that cannot be read counts as undecodable.
        let response = match resp.bytes().await {
            Ok(bytes) => LicenseResponse::from_bytes(status, &bytes),
            Err(e) => {
                warn!(url = %url, status, error = %e, "Failed to read response body");
                LicenseResponse { status, body: None }
            }
        };

        Ok(response)
    }

    /// Check a license against `url` and classify the result.
    ///
    /// Pass `client_id = None` to deliberately send a payload without
    /// `client_id`. Progress is printed to stdout at every stage. Transport
    /// failures are reported as [`ValidationOutcome::NetworkError`] and never
    /// propagate.
    pub async fn check_license(
        &self,
        url: &str,
        client_id: Option<&str>,
        license_key: &str,
    ) -> ValidationOutcome {
        let request = LicenseRequest::new(client_id, license_key);

        println!("\n--- Checking URL: {url} ---");
        println!("[info] Testing Client: {}", client_id.unwrap_or("None"));
        println!("[info] Request Payload: {}", request.to_json_string());

        debug!(url = %url, has_client_id = client_id.is_some(), "Sending license check");

        let outcome = match self.send(url, &request).await {
            Ok(response) => {
                println!(
                    "[info] Server responded with status code: {}",
                    response.status
                );
                match &response.body {
                    Some(body) => println!("[info] Server Response Body: {body}"),
                    None => println!("[info] Server Response Body: (Could not decode JSON)"),
                }
                ValidationOutcome::from_status(response.status)
            }
            Err(e) => {
                warn!(url = %url, error = %e, "License check could not reach server");
                ValidationOutcome::NetworkError(e.to_string())
            }
        };

        println!("{} {}", outcome.tag(), outcome);
        info!(url = %url, outcome = %outcome.kind(), "License check finished");

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_keeps_configured_timeout() {
        let client = LicenseCheckClient::from_config(&ClientConfig { timeout_secs: 7 }).unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(7));
    }

    #[tokio::test]
    async fn malformed_url_is_a_network_error() {
        let client = LicenseCheckClient::new(DEFAULT_TIMEOUT).unwrap();
        let outcome = client
            .check_license("not-a-url", Some("TEST_NEW_CLIENT"), "NEW_TEST_KEY_123")
            .await;

        assert!(matches!(outcome, ValidationOutcome::NetworkError(_)));
        assert!(!outcome.is_valid());
    }
}
