//! catq CLI entry point
//!
//! Parses arguments, dispatches to the CLI module, and on failure prints a
//! JSON error object and exits non-zero.

use catq::cli;

fn main() {
    if let Err(e) = cli::run() {
        if cli::write_error(e.code_str(), e.message()).is_err() {
            eprintln!("{}", e);
        }
        std::process::exit(1);
    }
}
