//! Observability for the query client
//!
//! Structured JSON-lines logging of typed events. Logging never changes
//! the outcome of a query.
//!
//! ```ignore
//! use catq::observability::{log_event, Event, Severity, set_min_severity};
//!
//! set_min_severity(Severity::Info);
//! log_event(Event::CursorClose, &[("continuation", "7")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{min_severity, set_min_severity, Logger, Severity};

/// Log a client event at its default severity
pub fn log_event(event: Event, fields: &[(&str, &str)]) {
    Logger::log(event.severity(), event.as_str(), fields);
}
