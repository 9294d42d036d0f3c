use thiserror::Error;

/// Failure surfaced by a backend capability call.
///
/// Variants carry rendered messages rather than source errors so values
/// can live inside copy-on-write state records and be compared
/// structurally in tests.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BackendError {
    #[error("backend API error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("operation '{operation}' timed out after {duration_ms}ms")]
    Timeout { operation: String, duration_ms: u64 },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        assert_eq!(
            BackendError::Api("502 Bad Gateway".to_string()).to_string(),
            "backend API error: 502 Bad Gateway"
        );
        assert_eq!(
            BackendError::Timeout {
                operation: "publish_stack".to_string(),
                duration_ms: 30_000,
            }
            .to_string(),
            "operation 'publish_stack' timed out after 30000ms"
        );
    }
}
