//! Settlement error types.

use thiserror::Error;

/// Settlement errors
#[derive(Debug, Error)]
pub enum SettlementError {
    /// The store could not be reached
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The settlement procedure reported a failure
    #[error("settlement procedure failed: {0}")]
    Procedure(#[source] sqlx::Error),
}

impl SettlementError {
    /// Get a client-safe error message that doesn't leak sensitive information
    pub fn client_message(&self) -> String {
        match self {
            SettlementError::Connection(_) => "Database unavailable".to_string(),
            SettlementError::Procedure(_) => "Settlement failed".to_string(),
        }
    }
}

impl From<sqlx::Error> for SettlementError {
    fn from(err: sqlx::Error) -> Self {
        if crate::db::is_connection_error(&err) {
            SettlementError::Connection(err)
        } else {
            SettlementError::Procedure(err)
        }
    }
}

/// Result type for settlement operations
pub type SettlementResult<T> = Result<T, SettlementError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_procedure_failure_has_nonempty_client_message() {
        let err = SettlementError::from(sqlx::Error::Protocol("procedure raised".to_string()));
        assert!(matches!(err, SettlementError::Procedure(_)));
        assert!(!err.client_message().is_empty());
    }

    #[test]
    fn test_connection_failure_classifies() {
        let err = SettlementError::from(sqlx::Error::PoolClosed);
        assert!(matches!(err, SettlementError::Connection(_)));
        assert_eq!(err.client_message(), "Database unavailable");
    }
}
