//! Ranking error types.

use thiserror::Error;

/// Ranking errors
#[derive(Debug, Error)]
pub enum RankingError {
    /// The store could not be reached
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A ranking query failed or returned a malformed result shape
    #[error("ranking query failed: {0}")]
    Query(#[source] sqlx::Error),

    /// The bounded query timeout elapsed
    #[error("ranking query timed out after {0}s")]
    Timeout(u64),
}

impl RankingError {
    /// Get a client-safe error message that doesn't leak sensitive information
    ///
    /// Database errors are sanitized so SQL detail and connection strings
    /// never reach a response body.
    pub fn client_message(&self) -> String {
        match self {
            RankingError::Connection(_) => "Database unavailable".to_string(),
            RankingError::Query(_) => "Internal server error".to_string(),
            RankingError::Timeout(secs) => format!("Report timed out after {secs}s"),
        }
    }
}

impl From<sqlx::Error> for RankingError {
    fn from(err: sqlx::Error) -> Self {
        if crate::db::is_connection_error(&err) {
            RankingError::Connection(err)
        } else {
            RankingError::Query(err)
        }
    }
}

/// Result type for ranking operations
pub type RankingResult<T> = Result<T, RankingError>;
