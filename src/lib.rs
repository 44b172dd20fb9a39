//! License Probe - scenario runner for a remote license-validation endpoint
//!
//! The probe POSTs `{"client_id", "license_key"}` payloads to a license
//! endpoint and classifies each HTTP status into a
//! [`ValidationOutcome`](client::outcome::ValidationOutcome).
//!
//! # Features
//!
//! - `server` - Local stand-in for the license endpoint (axum, in-memory store). Enabled by default.
//!
//! # Example
//!
//! ```rust,no_run
//! use license_probe::client::check::LicenseCheckClient;
//! use license_probe::client::check::DEFAULT_TIMEOUT;
//!
//! # async fn run() -> license_probe::errors::ProbeResult<()> {
//! let client = LicenseCheckClient::new(DEFAULT_TIMEOUT)?;
//! let outcome = client
//!     .check_license("http://localhost:3001/api", Some("TEST_NEW_CLIENT"), "NEW_TEST_KEY_123")
//!     .await;
//! println!("valid: {}", outcome.is_valid());
//! # Ok(())
//! # }
//! ```

// Core modules (always available)
pub mod config;
pub mod errors;
pub mod logging;
pub mod scenarios;

// Client-related modules (always available)
pub mod client {
    pub mod check;
    pub mod outcome;
    pub mod payload;

    pub use check::LicenseCheckClient;
    pub use outcome::{OutcomeKind, ValidationOutcome};
    pub use payload::{LicenseRequest, LicenseResponse};
}

// Server-related modules (requires "server" feature)
#[cfg(feature = "server")]
#[path = "server/mod.rs"]
pub mod server;
