//! Domain Errors

use thiserror::Error;

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Malformed board document: {0}")]
    Document(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = DomainError::InvalidInput("due date 'tomorrow'".to_string());
        assert_eq!(err.to_string(), "Invalid input: due date 'tomorrow'");

        let err = DomainError::Internal("Database not initialized".to_string());
        assert_eq!(err.to_string(), "Internal error: Database not initialized");
    }

    #[test]
    fn test_json_error_converts() {
        let parse: Result<serde_json::Value, _> = serde_json::from_str("{not json");
        let err: DomainError = parse.unwrap_err().into();
        assert!(matches!(err, DomainError::Document(_)));
    }
}
