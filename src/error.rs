//! Error types
//!
//! Every failure in the crate is a [`BdccError`]. The provider layer wraps it in an
//! [`OperationError`] carrying a human-readable summary before it reaches the user.

use thiserror::Error;

pub type Result<T, E = BdccError> = std::result::Result<T, E>;

/// Errors raised by the transport, the resource client and the populate action
#[derive(Debug, Error)]
pub enum BdccError {
    /// Network failure or per-call timeout
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with anything other than 200 OK
    #[error("status: {status}, body: {body}")]
    Remote { status: u16, body: String },

    /// Response body did not match the expected shape
    #[error("malformed response payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// One item write failed mid-sequence; later items were abandoned
    #[error("item at position {position} failed: {source}")]
    Sequence {
        position: usize,
        #[source]
        source: Box<BdccError>,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl BdccError {
    /// Whether the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            BdccError::Remote { status, .. } => *status == 404,
            BdccError::Sequence { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            BdccError::Transport(e) => e.is_timeout(),
            BdccError::Sequence { source, .. } => source.is_timeout(),
            _ => false,
        }
    }
}

/// Problems with host or API key, detected before any call is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing API key: set it in the configuration or via BDCC_API_KEY")]
    MissingApiKey,

    #[error("invalid host URL '{host}': {reason}")]
    InvalidHost { host: String, reason: String },
}

/// An error as surfaced to the orchestrator: a summary plus the underlying cause
#[derive(Debug, Error)]
#[error("{summary}: {source}")]
pub struct OperationError {
    pub summary: String,
    #[source]
    pub source: BdccError,
}

impl OperationError {
    pub fn new(summary: impl Into<String>, source: BdccError) -> Self {
        Self {
            summary: summary.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_display_keeps_raw_body() {
        let err = BdccError::Remote {
            status: 500,
            body: "server error".to_string(),
        };
        assert_eq!(err.to_string(), "status: 500, body: server error");
    }

    #[test]
    fn not_found_is_detected_through_sequence() {
        let inner = BdccError::Remote {
            status: 404,
            body: String::new(),
        };
        let err = BdccError::Sequence {
            position: 3,
            source: Box::new(inner),
        };
        assert!(err.is_not_found());
        assert!(!err.is_timeout());
    }

    #[test]
    fn operation_error_includes_summary_and_cause() {
        let err = OperationError::new("Error deleting database", ConfigError::MissingApiKey.into());
        let text = err.to_string();
        assert!(text.starts_with("Error deleting database: "));
        assert!(text.contains("missing API key"));
    }
}
