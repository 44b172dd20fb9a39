//! Configuration system for the license probe.
//!
//! Configuration is loaded from multiple sources with the following precedence:
//! 1. Environment variables (highest priority)
//! 2. `probe.toml` file
//! 3. Default values (lowest priority)
//!
//! # Environment Variables
//!
//! - `PROBE_LOCAL_URL` - License endpoint of the local development server
//! - `PROBE_DEPLOYED_URL` - License endpoint of the deployed server
//! - `PROBE_VALID_CLIENT_ID` / `PROBE_VALID_LICENSE_KEY` - Credentials expected to validate
//! - `PROBE_INVALID_CLIENT_ID` / `PROBE_INVALID_LICENSE_KEY` - Credentials expected to be rejected
//! - `PROBE_TIMEOUT_SECS` - Per-request timeout in seconds
//! - `PROBE_LOGGING_ENABLED` - Enable structured tracing output
//! - `PROBE_LOG_LEVEL` - Log level (trace, debug, info, warn, error)
//! - `PROBE_SERVER_HOST` / `PROBE_SERVER_PORT` - Bind address of the stand-in server
//!
//! The loaded [`ProbeConfig`] is handed to the entry points explicitly; there
//! is no process-wide instance.

use config::Config;
use reqwest::Url;
use serde::Deserialize;
use std::env;

use crate::errors::{ProbeError, ProbeResult};

/// Default config file name (without extension), resolved relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "probe";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Endpoints the scenarios are run against
    pub endpoints: EndpointsConfig,
    /// Credentials used to build the scenario payloads
    pub credentials: CredentialsConfig,
    /// HTTP client settings
    pub client: ClientConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Stand-in server configuration
    pub server: ServerConfig,
}

/// License endpoint addresses.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EndpointsConfig {
    pub local_url: String,
    pub deployed_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            local_url: "http://localhost:3001/api".to_string(),
            deployed_url: "https://your-domain.vercel.app/api".to_string(),
        }
    }
}

/// Test credentials.
///
/// The valid pair must exist (and be unexpired) on the server under test;
/// the invalid pair must not.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub valid_client_id: String,
    pub valid_license_key: String,
    pub invalid_client_id: String,
    pub invalid_license_key: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            valid_client_id: "TEST_NEW_CLIENT".to_string(),
            valid_license_key: "NEW_TEST_KEY_123".to_string(),
            invalid_client_id: "CLIENT_Z999".to_string(),
            invalid_license_key: "FAKE_KEY_99999".to_string(),
        }
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable structured tracing output
    pub enabled: bool,
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

/// Stand-in server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3001,
        }
    }
}

fn config_err(e: config::ConfigError) -> ProbeError {
    ProbeError::ConfigError(e.to_string())
}

impl ProbeConfig {
    /// Load configuration from `probe.toml` (optional) and the environment,
    /// then validate it.
    pub fn load() -> ProbeResult<Self> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load configuration using `file_name` as the optional config file.
    ///
    /// Sources are layered in this order (later sources override earlier):
    /// 1. Default values
    /// 2. `file_name` (any extension the `config` crate understands)
    /// 3. Environment variables
    pub fn load_from(file_name: &str) -> ProbeResult<Self> {
        let defaults = ProbeConfig::default();

        let builder = Config::builder()
            // Start with defaults
            .set_default("endpoints.local_url", defaults.endpoints.local_url)
            .map_err(config_err)?
            .set_default("endpoints.deployed_url", defaults.endpoints.deployed_url)
            .map_err(config_err)?
            .set_default("credentials.valid_client_id", defaults.credentials.valid_client_id)
            .map_err(config_err)?
            .set_default(
                "credentials.valid_license_key",
                defaults.credentials.valid_license_key,
            )
            .map_err(config_err)?
            .set_default(
                "credentials.invalid_client_id",
                defaults.credentials.invalid_client_id,
            )
            .map_err(config_err)?
            .set_default(
                "credentials.invalid_license_key",
                defaults.credentials.invalid_license_key,
            )
            .map_err(config_err)?
            .set_default("client.timeout_secs", defaults.client.timeout_secs as i64)
            .map_err(config_err)?
            .set_default("logging.enabled", defaults.logging.enabled)
            .map_err(config_err)?
            .set_default("logging.level", defaults.logging.level)
            .map_err(config_err)?
            .set_default("server.host", defaults.server.host)
            .map_err(config_err)?
            .set_default("server.port", i64::from(defaults.server.port))
            .map_err(config_err)?
            // Load from config file (optional)
            .add_source(config::File::with_name(file_name).required(false))
            // Override with environment variables
            .set_override_option("endpoints.local_url", env::var("PROBE_LOCAL_URL").ok())
            .map_err(config_err)?
            .set_override_option(
                "endpoints.deployed_url",
                env::var("PROBE_DEPLOYED_URL").ok(),
            )
            .map_err(config_err)?
            .set_override_option(
                "credentials.valid_client_id",
                env::var("PROBE_VALID_CLIENT_ID").ok(),
            )
            .map_err(config_err)?
            .set_override_option(
                "credentials.valid_license_key",
                env::var("PROBE_VALID_LICENSE_KEY").ok(),
            )
            .map_err(config_err)?
            .set_override_option(
                "credentials.invalid_client_id",
                env::var("PROBE_INVALID_CLIENT_ID").ok(),
            )
            .map_err(config_err)?
            .set_override_option(
                "credentials.invalid_license_key",
                env::var("PROBE_INVALID_LICENSE_KEY").ok(),
            )
            .map_err(config_err)?
            .set_override_option(
                "client.timeout_secs",
                env::var("PROBE_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(config_err)?
            .set_override_option(
                "logging.enabled",
                env::var("PROBE_LOGGING_ENABLED")
                    .ok()
                    .and_then(|v| v.parse::<bool>().ok()),
            )
            .map_err(config_err)?
            .set_override_option("logging.level", env::var("PROBE_LOG_LEVEL").ok())
            .map_err(config_err)?
            .set_override_option("server.host", env::var("PROBE_SERVER_HOST").ok())
            .map_err(config_err)?
            .set_override_option(
                "server.port",
                env::var("PROBE_SERVER_PORT")
                    .ok()
                    .and_then(|v| v.parse::<i64>().ok()),
            )
            .map_err(config_err)?;

        let settings = builder
            .build()
            .map_err(|e| ProbeError::ConfigError(format!("failed to build config: {e}")))?;

        let config: ProbeConfig = settings
            .try_deserialize()
            .map_err(|e| ProbeError::ConfigError(format!("failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ProbeResult<()> {
        validate_endpoint("endpoints.local_url", &self.endpoints.local_url)?;
        validate_endpoint("endpoints.deployed_url", &self.endpoints.deployed_url)?;

        if self.credentials.valid_client_id.is_empty() {
            return Err(ProbeError::ConfigError(
                "credentials.valid_client_id cannot be empty".to_string(),
            ));
        }
        if self.credentials.valid_license_key.is_empty() {
            return Err(ProbeError::ConfigError(
                "credentials.valid_license_key cannot be empty".to_string(),
            ));
        }

        if self.client.timeout_secs == 0 {
            return Err(ProbeError::ConfigError(
                "client.timeout_secs must be greater than 0".to_string(),
            ));
        }

        // Validate log level
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(ProbeError::ConfigError(format!(
                    "logging.level must be one of: trace, debug, info, warn, error. Got '{other}'"
                )));
            }
        }

        if self.server.port == 0 {
            return Err(ProbeError::ConfigError(
                "server.port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_endpoint(field: &str, value: &str) -> ProbeResult<()> {
    let url = Url::parse(value)
        .map_err(|e| ProbeError::ConfigError(format!("{field} is not a valid URL: {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ProbeError::ConfigError(format!(
            "{field} must use http or https, got '{other}'"
        ))),
    }
}
