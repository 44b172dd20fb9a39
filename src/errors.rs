//! Error types shared by the probe client, configuration and server.

/// Errors surfaced by license-probe operations.
///
/// `check_license` never returns these; it folds them into a
/// [`ValidationOutcome`](crate::client::outcome::ValidationOutcome).
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::NetworkError(err.to_string())
    }
}

pub type ProbeResult<T> = Result<T, ProbeError>;
