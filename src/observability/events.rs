//! Observable client events
//!
//! Events are explicit and typed; each carries its default severity.

use std::fmt;

use super::logger::Severity;

/// Observable events in the query client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Client configuration loaded
    ConfigLoaded,

    // Execution
    /// Request compiled and about to be sent
    QueryExecute,
    /// Response page decoded
    QueryPage,
    /// Server reported no matching rows; returned as an empty page
    QueryNoRows,
    /// Execution failed and the error is surfaced to the caller
    QueryFailed,
    /// Projection narrowed for an older server
    ProjectionNarrowed,

    // Cursor lifecycle
    /// Server-side cursor released
    CursorClose,
    /// A cursor with more pages was dropped without being closed
    CursorLeakRisk,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::QueryExecute => "QUERY_EXECUTE",
            Event::QueryPage => "QUERY_PAGE",
            Event::QueryNoRows => "QUERY_NO_ROWS",
            Event::QueryFailed => "QUERY_FAILED",
            Event::ProjectionNarrowed => "PROJECTION_NARROWED",
            Event::CursorClose => "CURSOR_CLOSE",
            Event::CursorLeakRisk => "CURSOR_LEAK_RISK",
        }
    }

    /// Severity the event is logged at
    pub fn severity(&self) -> Severity {
        match self {
            Event::QueryExecute | Event::QueryPage | Event::QueryNoRows => Severity::Trace,
            Event::ConfigLoaded | Event::CursorClose => Severity::Info,
            Event::ProjectionNarrowed | Event::CursorLeakRisk => Severity::Warn,
            Event::QueryFailed => Severity::Error,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
