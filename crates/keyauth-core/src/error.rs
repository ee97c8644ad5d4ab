//! # Error Types
//!
//! Two kinds of failure with different lifetimes:
//!
//! - [`ConfigError`] is raised once, while the scheme is being registered.
//! - [`AuthenticationFailure`] is produced per request and carried inside
//!   [`AuthOutcome::Failure`](crate::AuthOutcome::Failure).

use thiserror::Error;

/// Reason reported for every rejected request, whether the parameter was
/// missing, empty, or blank.
pub const KEY_NOT_FOUND_OR_NOT_VALID: &str = "Key not found or not valid";

/// Setup-time configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option was empty or whitespace.
    #[error("invalid option `{field}`: must be non-blank")]
    BlankOption {
        /// Name of the offending option.
        field: &'static str,
    },

    /// An options file could not be read.
    #[error("cannot read options file {path}: {reason}")]
    Unreadable {
        /// Path that was opened.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// Options could not be deserialized.
    #[error("invalid options document: {0}")]
    Malformed(String),

    /// A policy was built with nothing to require.
    #[error("authorization policy requires at least one claim")]
    EmptyPolicy,
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Per-request authentication failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct AuthenticationFailure {
    reason: String,
}

impl AuthenticationFailure {
    /// Failure for a missing, empty, or whitespace-only key.
    pub fn key_not_found() -> Self {
        Self {
            reason: KEY_NOT_FOUND_OR_NOT_VALID.to_string(),
        }
    }

    /// The human-readable reason.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_not_found_message_is_fixed() {
        let failure = AuthenticationFailure::key_not_found();
        assert_eq!(failure.reason(), "Key not found or not valid");
        assert_eq!(failure.to_string(), "Key not found or not valid");
    }

    #[test]
    fn blank_option_names_the_field() {
        let err = ConfigError::BlankOption {
            field: "query_param_name",
        };
        assert_eq!(
            err.to_string(),
            "invalid option `query_param_name`: must be non-blank"
        );
    }

    #[test]
    fn unreadable_names_the_path() {
        let err = ConfigError::Unreadable {
            path: "/etc/keyauth.json".into(),
            reason: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "cannot read options file /etc/keyauth.json: permission denied"
        );
    }

    #[test]
    fn malformed_from_serde_error() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = serde_err.into();
        assert!(matches!(err, ConfigError::Malformed(_)));
        assert!(err.to_string().starts_with("invalid options document"));
    }
}
