//! Classification of license-check responses.

use std::fmt;

/// Result of a single license check.
///
/// Derived solely from the HTTP status code, or from the request failing to
/// go out at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// 200: the license is valid
    Valid,
    /// 403: expired subscription, unknown key or unknown client
    Invalid,
    /// 400: missing or malformed input parameters
    BadRequest,
    /// Any other status code
    Unexpected(u16),
    /// The request could not be sent or timed out
    NetworkError(String),
}

/// Data-less view of [`ValidationOutcome`], used for expectations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutcomeKind {
    Valid,
    Invalid,
    BadRequest,
    Unexpected,
    NetworkError,
}

impl ValidationOutcome {
    /// Map an HTTP status code to an outcome.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 => ValidationOutcome::Valid,
            403 => ValidationOutcome::Invalid,
            400 => ValidationOutcome::BadRequest,
            other => ValidationOutcome::Unexpected(other),
        }
    }

    /// Boolean view: `true` only for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationOutcome::Valid)
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            ValidationOutcome::Valid => OutcomeKind::Valid,
            ValidationOutcome::Invalid => OutcomeKind::Invalid,
            ValidationOutcome::BadRequest => OutcomeKind::BadRequest,
            ValidationOutcome::Unexpected(_) => OutcomeKind::Unexpected,
            ValidationOutcome::NetworkError(_) => OutcomeKind::NetworkError,
        }
    }

    /// Console tag the outcome is printed under.
    pub fn tag(&self) -> &'static str {
        match self {
            ValidationOutcome::NetworkError(_) => "[ERROR]",
            _ => "[RESULT]",
        }
    }
}

impl fmt::Display for ValidationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationOutcome::Valid => {
                write!(f, "✅ License validated successfully (Status 200).")
            }
            ValidationOutcome::Invalid => write!(
                f,
                "❌ License check failed: Subscription expired or invalid key (Status 403)."
            ),
            ValidationOutcome::BadRequest => {
                write!(f, "⚠️ Bad Request: Missing input parameters (Status 400).")
            }
            ValidationOutcome::Unexpected(status) => {
                write!(f, "❓ Unexpected Status: Server returned {status}.")
            }
            ValidationOutcome::NetworkError(reason) => write!(
                f,
                "❌ License check failed: Network error contacting server. {reason}"
            ),
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutcomeKind::Valid => "valid",
            OutcomeKind::Invalid => "invalid",
            OutcomeKind::BadRequest => "bad_request",
            OutcomeKind::Unexpected => "unexpected",
            OutcomeKind::NetworkError => "network_error",
        };
        write!(f, "{}", s)
    }
}
