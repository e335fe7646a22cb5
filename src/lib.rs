//! catq - client for a remote catalog's general-query protocol
//!
//! Builds immutable queries over a fixed catalog of columns, compiles them
//! into wire requests for the connected server's release, and drives the
//! server's paging cursor.

pub mod cli;
pub mod observability;
pub mod query;
pub mod schema;
pub mod session;
pub mod wire;

pub use query::{Criterion, Query, QueryError, QueryResult, ResultSet, Row, Value};
pub use session::{Connection, ConnectionError, MemorySession, Session};
pub use wire::ServerVersion;
