//! Query error types
//!
//! Error codes:
//! - CATQ_INVALID_ARGUMENT: malformed builder input, raised at build time
//! - CATQ_CONNECTION: transport or server failure, passed through unchanged
//! - CATQ_NO_RESULT_FOUND / CATQ_MULTIPLE_RESULTS_FOUND: raised by `one()` only
//! - CATQ_DECODE: response does not match the projection that was sent

use thiserror::Error;

use crate::session::ConnectionError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query errors
#[derive(Debug, Clone, Error)]
pub enum QueryError {
    /// Malformed builder input
    #[error("[CATQ_INVALID_ARGUMENT] {0}")]
    InvalidArgument(String),

    /// Transport or server failure, verbatim
    #[error("[CATQ_CONNECTION] {0}")]
    Connection(#[from] ConnectionError),

    /// `one()` saw zero rows
    #[error("[CATQ_NO_RESULT_FOUND] query returned no rows")]
    NoResultFound,

    /// `one()` saw more than one row
    #[error("[CATQ_MULTIPLE_RESULTS_FOUND] query returned {0} rows, expected one")]
    MultipleResultsFound(usize),

    /// Response could not be mapped back onto the projection
    #[error("[CATQ_DECODE] {0}")]
    Decode(String),
}

impl QueryError {
    /// Create an invalid argument error
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        QueryError::InvalidArgument(reason.into())
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        QueryError::Decode(reason.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            QueryError::InvalidArgument(_) => "CATQ_INVALID_ARGUMENT",
            QueryError::Connection(_) => "CATQ_CONNECTION",
            QueryError::NoResultFound => "CATQ_NO_RESULT_FOUND",
            QueryError::MultipleResultsFound(_) => "CATQ_MULTIPLE_RESULTS_FOUND",
            QueryError::Decode(_) => "CATQ_DECODE",
        }
    }

    /// Returns the message without the code prefix
    pub fn message(&self) -> String {
        match self {
            QueryError::InvalidArgument(m) | QueryError::Decode(m) => m.clone(),
            QueryError::Connection(e) => e.to_string(),
            QueryError::NoResultFound => "query returned no rows".to_string(),
            QueryError::MultipleResultsFound(n) => {
                format!("query returned {} rows, expected one", n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QueryError::invalid_argument("x").code(),
            "CATQ_INVALID_ARGUMENT"
        );
        assert_eq!(QueryError::NoResultFound.code(), "CATQ_NO_RESULT_FOUND");
        assert_eq!(
            QueryError::MultipleResultsFound(2).code(),
            "CATQ_MULTIPLE_RESULTS_FOUND"
        );
        assert_eq!(QueryError::decode("x").code(), "CATQ_DECODE");
    }

    #[test]
    fn test_connection_error_passes_through() {
        let err = QueryError::from(ConnectionError::Server {
            code: -130000,
            message: "SYS_INVALID_INPUT_PARAM".into(),
        });
        assert_eq!(err.code(), "CATQ_CONNECTION");
        assert!(err.to_string().contains("-130000"));
        assert!(err.message().contains("SYS_INVALID_INPUT_PARAM"));
    }

    #[test]
    fn test_display_carries_code() {
        let err = QueryError::invalid_argument("direction must be asc or desc");
        let display = err.to_string();
        assert!(display.starts_with("[CATQ_INVALID_ARGUMENT]"));
        assert!(display.contains("asc or desc"));
    }
}
