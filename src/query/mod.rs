//! Catalog query client
//!
//! # Flow
//!
//! 1. Build a `Query` by chaining builder calls; each call returns a new,
//!    independent query
//! 2. `execute` compiles it against the connection's server version,
//!    sends it and decodes the reply into a `ResultSet`
//! 3. `batches` / `results` keep executing with the returned continuation
//!    until the server reports no more rows; `close` releases a cursor that
//!    is abandoned early
//!
//! # Example
//!
//! ```ignore
//! use catq::query::{Criterion, Query};
//! use catq::schema::catalog::{COLL_NAME, DATA_NAME};
//!
//! let query = Query::select([COLL_NAME, DATA_NAME])
//!     .filter([Criterion::like(DATA_NAME, "%.txt")])
//!     .limit_rows(100);
//!
//! for row in query.results(&session) {
//!     let row = row?;
//!     println!("{:?}", row.get(&DATA_NAME));
//! }
//! ```

mod builder;
pub mod compat;
mod criterion;
mod cursor;
mod document;
mod errors;
mod result;

pub use builder::{Direction, Query};
pub use criterion::Criterion;
pub use cursor::{Batches, Results};
pub use document::{AggregateEntry, FilterEntry, OrderEntry, QueryDocument};
pub use errors::{QueryError, QueryResult};
pub use result::{ResultSet, Row, Value};
