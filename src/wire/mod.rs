//! Wire-level shapes of the general-query protocol
//!
//! - `QueryRequest` / `QueryResponse`: the records a codec turns into bytes
//! - option bits, modifier and aggregate codes
//! - server version triples and the legacy threshold

mod codes;
mod message;
mod version;

pub use codes::{Aggregate, Modifier, QueryOptions, DEFAULT_MAX_ROWS, NO_ROWS_FOUND};
pub use message::{QueryRequest, QueryResponse, ResponseColumn};
pub use version::{ServerVersion, LEGACY_SERVER_THRESHOLD};
