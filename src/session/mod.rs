//! Session and connection collaborators
//!
//! Executing a query needs a `Session` passed in explicitly; there is no
//! process-wide default connection.

mod connection;
mod memory;

pub use connection::{Connection, ConnectionError, Session};
pub use memory::MemorySession;
