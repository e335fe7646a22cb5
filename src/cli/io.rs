//! JSON I/O handling for CLI
//!
//! - Input: one query document as a JSON object on stdin
//! - Output: one JSON object on stdout
//! - UTF-8 only

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::query::QueryDocument;
use crate::session::ConnectionError;
use crate::wire::QueryResponse;

use super::errors::{CliError, CliResult};

/// Read a query document from stdin
pub fn read_document() -> CliResult<QueryDocument> {
    let mut input = String::new();
    io::stdin().lock().read_to_string(&mut input)?;
    parse_document(&input)
}

/// Parse a query document, rejecting empty input
pub fn parse_document(input: &str) -> CliResult<QueryDocument> {
    if input.trim().is_empty() {
        return Err(CliError::invalid_input("Empty input"));
    }
    Ok(serde_json::from_str(input)?)
}

/// A server failure in a recorded session
#[derive(Debug, Clone, Deserialize)]
pub struct RecordedError {
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

/// One recorded reply: a page or a server error
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordedReply {
    Error { error: RecordedError },
    Page(QueryResponse),
}

impl RecordedReply {
    pub fn into_result(self) -> Result<QueryResponse, ConnectionError> {
        match self {
            RecordedReply::Page(page) => Ok(page),
            RecordedReply::Error { error } => {
                Err(ConnectionError::server(error.code, error.message))
            }
        }
    }
}

/// Read a JSON array of recorded replies
pub fn read_replies(path: &Path) -> CliResult<Vec<RecordedReply>> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::io_error(format!("Failed to read {}: {}", path.display(), e))
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

/// Write an error response to stdout
pub fn write_error(code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });

    let mut stdout = io::stdout();
    serde_json::to_writer(&mut stdout, &response)?;
    writeln!(stdout)?;
    stdout.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::NO_ROWS_FOUND;
    use serde_json::json;

    #[test]
    fn test_parse_document_rejects_empty() {
        assert!(parse_document("  \n").is_err());
        let doc = parse_document(r#"{"select": ["DATA_NAME"]}"#).unwrap();
        assert_eq!(doc.select, vec!["DATA_NAME".to_string()]);
    }

    #[test]
    fn test_recorded_replies() {
        let replies: Vec<RecordedReply> = serde_json::from_value(json!([
            {
                "row_count": 1,
                "column_count": 1,
                "continuation": 0,
                "columns": [{"projection_key": 403, "values": ["a"]}]
            },
            {"error": {"code": NO_ROWS_FOUND}}
        ]))
        .unwrap();

        let mut replies = replies.into_iter().map(RecordedReply::into_result);
        assert_eq!(replies.next().unwrap().unwrap().row_count, 1);
        assert!(replies.next().unwrap().unwrap_err().is_no_rows());
    }
}
