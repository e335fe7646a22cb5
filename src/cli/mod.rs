//! CLI module for catq
//!
//! Provides command-line interface for:
//! - compile: Turn a query document into a wire request
//! - replay: Run a query document against recorded server replies

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ReplayMode};
pub use commands::{build_query, compile, compile_document, replay, replay_document, run, run_command};
pub use config::ClientConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{parse_document, read_document, read_replies, write_error, write_response, RecordedError, RecordedReply};
