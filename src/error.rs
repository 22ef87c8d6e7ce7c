//! Custom error types for ec2-pauser.

use thiserror::Error;

/// Errors that can occur while resolving and pausing instances.
///
/// Every variant is fatal; the entry point maps them to a nonzero exit.
/// An empty resolved fleet is not an error.
#[derive(Error, Debug)]
pub enum PauserError {
    #[error("Failed to establish AWS session: {0}")]
    Session(String),

    #[error("DescribeInstances failed: {0}")]
    Describe(String),

    #[error("Invalid tag filter '{0}' (expected format: Key=Value)")]
    InvalidTagFilter(String),

    #[error("Dry run rejected: {0}")]
    DryRunRejected(String),

    #[error("{action} failed: {message}")]
    ActionFailed {
        action: &'static str,
        message: String,
    },
}

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, PauserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_session() {
        let err = PauserError::Session("expired token".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to establish AWS session: expired token"
        );
    }

    #[test]
    fn test_error_display_invalid_tag_filter() {
        let err = PauserError::InvalidTagFilter("Name".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid tag filter 'Name' (expected format: Key=Value)"
        );
    }

    #[test]
    fn test_error_display_dry_run_rejected() {
        let err = PauserError::DryRunRejected("UnauthorizedOperation: denied".to_string());
        assert_eq!(
            err.to_string(),
            "Dry run rejected: UnauthorizedOperation: denied"
        );
    }

    #[test]
    fn test_error_display_action_failed() {
        let err = PauserError::ActionFailed {
            action: "StopInstances",
            message: "throttled".to_string(),
        };
        assert_eq!(err.to_string(), "StopInstances failed: throttled");
    }
}
