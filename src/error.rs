use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a call to the agent backend.
///
/// Network errors, non-2xx statuses and undecodable bodies all end up here;
/// callers only ever learn *which* operation failed.
#[derive(Debug, Error)]
#[error("{operation} failed: {source}")]
pub struct TransportError {
    operation: &'static str,
    #[source]
    source: BoxError,
}

impl TransportError {
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            source: source.into(),
        }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn display_names_operation_and_cause() {
        let err = TransportError::new("list agents", "connection refused");
        assert_eq!(err.to_string(), "list agents failed: connection refused");
        assert_eq!(err.operation(), "list agents");
        assert!(err.source().is_some());
    }
}
