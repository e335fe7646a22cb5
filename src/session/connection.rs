//! Connection boundary
//!
//! The transport owns sockets, authentication and the byte codec. The
//! query client only needs a version and a request/response round trip.

use thiserror::Error;

use crate::wire::{QueryRequest, QueryResponse, ServerVersion, NO_ROWS_FOUND};

/// Transport and server failures, surfaced to callers unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Socket or codec failure
    #[error("i/o failure: {0}")]
    Io(String),

    /// The connection was closed or recycled
    #[error("connection closed")]
    Closed,

    /// The server rejected the request
    #[error("server error {code}: {message}")]
    Server { code: i32, message: String },
}

impl ConnectionError {
    /// Create an i/o error
    pub fn io(reason: impl Into<String>) -> Self {
        ConnectionError::Io(reason.into())
    }

    /// Create a server error
    pub fn server(code: i32, message: impl Into<String>) -> Self {
        ConnectionError::Server {
            code,
            message: message.into(),
        }
    }

    /// The server's "query matched nothing" signal
    pub fn no_rows() -> Self {
        Self::server(NO_ROWS_FOUND, "CAT_NO_ROWS_FOUND")
    }

    /// True for the "query matched nothing" signal
    pub fn is_no_rows(&self) -> bool {
        matches!(self, ConnectionError::Server { code, .. } if *code == NO_ROWS_FOUND)
    }
}

impl From<std::io::Error> for ConnectionError {
    fn from(err: std::io::Error) -> Self {
        ConnectionError::Io(err.to_string())
    }
}

/// One live connection to a catalog server
///
/// Not shared between concurrent in-flight requests.
pub trait Connection {
    /// Version reported during the handshake
    fn server_version(&self) -> ServerVersion;

    /// Encode and write a request
    fn send(&mut self, request: &QueryRequest) -> Result<(), ConnectionError>;

    /// Read and decode the reply to the last request
    fn receive(&mut self) -> Result<QueryResponse, ConnectionError>;

    /// One request/response round trip
    fn round_trip(&mut self, request: &QueryRequest) -> Result<QueryResponse, ConnectionError> {
        self.send(request)?;
        self.receive()
    }
}

/// Source of connections
///
/// Dropping the returned connection releases it back to its owner.
pub trait Session {
    fn acquire(&self) -> Result<Box<dyn Connection + '_>, ConnectionError>;
}
