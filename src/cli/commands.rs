//! CLI command implementations
//!
//! Both commands read one query document from stdin and print one JSON
//! object on stdout. Neither opens a network connection: `replay` answers
//! from recorded response pages.

use std::path::Path;

use serde_json::{json, Value};

use crate::query::{Query, QueryDocument, QueryResult, Row};
use crate::session::MemorySession;
use crate::wire::ServerVersion;

use super::args::{Command, ReplayMode};
use super::config::ClientConfig;
use super::errors::CliResult;
use super::io::{read_document, read_replies, write_response, RecordedReply};

/// Parse the command line and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Compile {
            config,
            server_version,
        } => compile(config.as_deref(), server_version.as_deref()),
        Command::Replay {
            config,
            responses,
            mode,
            server_version,
        } => replay(config.as_deref(), &responses, mode, server_version.as_deref()),
    }
}

/// Compile the stdin document and print the wire request
pub fn compile(config_path: Option<&Path>, server_version: Option<&str>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let doc = read_document()?;
    let data = compile_document(&config, server_version, &doc)?;
    write_response(data)
}

/// Run the stdin document against recorded replies and print the rows
pub fn replay(
    config_path: Option<&Path>,
    responses: &Path,
    mode: ReplayMode,
    server_version: Option<&str>,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let doc = read_document()?;
    let replies = read_replies(responses)?;
    let data = replay_document(&config, server_version, &doc, replies, mode)?;
    write_response(data)
}

fn load_config(path: Option<&Path>) -> CliResult<ClientConfig> {
    let config = ClientConfig::load_or_default(path)?;
    config.apply_logging()?;
    Ok(config)
}

fn resolve_version(config: &ClientConfig, server_version: Option<&str>) -> CliResult<ServerVersion> {
    match server_version {
        Some(release) => Ok(ServerVersion::parse(release)?),
        None => config.parsed_server_version(),
    }
}

/// Build the query for `doc`, filling in the configured page size
pub fn build_query(config: &ClientConfig, doc: &QueryDocument) -> CliResult<Query> {
    let query = Query::from_document(doc)?;
    Ok(match doc.limit {
        Some(_) => query,
        None => query.limit_rows(config.default_page_size),
    })
}

/// The `data` payload of `catq compile`
pub fn compile_document(
    config: &ClientConfig,
    server_version: Option<&str>,
    doc: &QueryDocument,
) -> CliResult<Value> {
    let version = resolve_version(config, server_version)?;
    let request = build_query(config, doc)?.compile_request(version);
    Ok(serde_json::to_value(request)?)
}

/// The `data` payload of `catq replay`
pub fn replay_document(
    config: &ClientConfig,
    server_version: Option<&str>,
    doc: &QueryDocument,
    replies: Vec<RecordedReply>,
    mode: ReplayMode,
) -> CliResult<Value> {
    let version = resolve_version(config, server_version)?;
    let query = build_query(config, doc)?;

    let session = MemorySession::new(version);
    for reply in replies {
        match reply.into_result() {
            Ok(page) => session.push_page(page),
            Err(err) => session.push_error(err),
        }
    }

    let mut data = match mode {
        ReplayMode::Results => {
            let rows = query.results(&session).collect::<QueryResult<Vec<Row>>>()?;
            json!({ "rows": rows })
        }
        ReplayMode::All => {
            let page = query.all(&session)?;
            json!({
                "rows": page.rows(),
                "continuation": page.continuation(),
                "total_row_count": page.total_row_count(),
            })
        }
        ReplayMode::One => json!({ "row": query.one(&session)? }),
        ReplayMode::First => json!({ "row": query.first(&session)? }),
    };

    data["requests"] = serde_json::to_value(session.sent())?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;

    fn document(value: Value) -> QueryDocument {
        serde_json::from_value(value).unwrap()
    }

    fn replies(value: Value) -> Vec<RecordedReply> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_compile_applies_default_page_size() {
        let config = ClientConfig {
            default_page_size: 50,
            ..ClientConfig::default()
        };
        let doc = document(json!({"select": ["DATA_NAME"]}));

        let data = compile_document(&config, None, &doc).unwrap();
        assert_eq!(data["max_rows"], json!(50));
        assert_eq!(data["column_projection"], json!([[403, 1]]));

        let doc = document(json!({"select": ["DATA_NAME"], "limit": 7}));
        let data = compile_document(&config, None, &doc).unwrap();
        assert_eq!(data["max_rows"], json!(7));
    }

    #[test]
    fn test_compile_narrows_for_legacy_release() {
        let doc = document(json!({"select": ["DATA_NAME", "DATA_RESC_HIER"]}));
        let config = ClientConfig::default();

        let data = compile_document(&config, Some("rods3.3.1"), &doc).unwrap();
        assert_eq!(data["column_projection"], json!([[403, 1]]));

        let data = compile_document(&config, None, &doc).unwrap();
        assert_eq!(data["column_projection"], json!([[403, 1], [422, 1]]));
    }

    #[test]
    fn test_compile_rejects_bad_release() {
        let doc = document(json!({"select": ["DATA_NAME"]}));
        let err = compile_document(&ClientConfig::default(), Some("next"), &doc).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::Query("CATQ_INVALID_ARGUMENT"));
    }

    #[test]
    fn test_replay_results_follows_continuations() {
        let doc = document(json!({"select": ["DATA_NAME"], "limit": 1}));
        let pages = replies(json!([
            {"row_count": 1, "column_count": 1, "continuation": 4,
             "columns": [{"projection_key": 403, "values": ["a"]}]},
            {"row_count": 1, "column_count": 1, "continuation": 0,
             "columns": [{"projection_key": 403, "values": ["b"]}]}
        ]));

        let data = replay_document(
            &ClientConfig::default(),
            None,
            &doc,
            pages,
            ReplayMode::Results,
        )
        .unwrap();
        assert_eq!(data["rows"], json!([{"DATA_NAME": "a"}, {"DATA_NAME": "b"}]));
        assert_eq!(data["requests"][1]["continuation"], json!(4));
    }

    #[test]
    fn test_replay_one_reports_no_rows() {
        let doc = document(json!({"select": ["DATA_NAME"]}));
        let pages = replies(json!([{"error": {"code": -808000}}]));

        let err = replay_document(&ClientConfig::default(), None, &doc, pages, ReplayMode::One)
            .unwrap_err();
        assert_eq!(err.code_str(), "CATQ_NO_RESULT_FOUND");
    }

    #[test]
    fn test_replay_first_closes_cursor() {
        let doc = document(json!({"select": ["DATA_NAME"]}));
        let pages = replies(json!([
            {"row_count": 1, "column_count": 1, "continuation": 9,
             "columns": [{"projection_key": 403, "values": ["a"]}]},
            {"row_count": 0, "column_count": 0, "continuation": 0, "columns": []}
        ]));

        let data = replay_document(&ClientConfig::default(), None, &doc, pages, ReplayMode::First)
            .unwrap();
        assert_eq!(data["row"], json!({"DATA_NAME": "a"}));
        assert_eq!(data["requests"][0]["max_rows"], json!(1));
        assert_eq!(data["requests"][1]["max_rows"], json!(0));
        assert_eq!(data["requests"][1]["continuation"], json!(9));
    }
}
