//! CLI-specific error types
//!
//! Every CLI error ends the process with a JSON error object on stdout.

use std::fmt;
use std::io;

use crate::query::QueryError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout/files)
    IoError,
    /// Malformed input document or recorded responses
    InvalidInput,
    /// A query operation failed; carries the query error code
    Query(&'static str),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "CATQ_CLI_CONFIG_ERROR",
            Self::IoError => "CATQ_CLI_IO_ERROR",
            Self::InvalidInput => "CATQ_CLI_INVALID_INPUT",
            Self::Query(code) => code,
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::invalid_input(format!("JSON error: {}", e))
    }
}

impl From<QueryError> for CliError {
    fn from(e: QueryError) -> Self {
        Self::new(CliErrorCode::Query(e.code()), e.message())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_error_keeps_its_code() {
        let err = CliError::from(QueryError::NoResultFound);
        assert_eq!(err.code_str(), "CATQ_NO_RESULT_FOUND");
        assert_eq!(err.code(), &CliErrorCode::Query("CATQ_NO_RESULT_FOUND"));
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("default_page_size must be > 0");
        assert_eq!(
            err.to_string(),
            "CATQ_CLI_CONFIG_ERROR: default_page_size must be > 0"
        );
    }

    #[test]
    fn test_json_error_is_invalid_input() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(CliError::from(json_err).code(), &CliErrorCode::InvalidInput);
    }
}
