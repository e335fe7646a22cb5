//! In-process scripted session
//!
//! Replays a fixed queue of replies and records every request sent, so
//! cursors can be driven without a server (tests, `catq replay`).

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use crate::wire::{QueryRequest, QueryResponse, ServerVersion};

use super::connection::{Connection, ConnectionError, Session};

#[derive(Debug, Default)]
struct Script {
    replies: VecDeque<Result<QueryResponse, ConnectionError>>,
    sent: Vec<QueryRequest>,
    pending: usize,
}

/// A session whose every connection reads from one shared reply queue
#[derive(Debug)]
pub struct MemorySession {
    version: ServerVersion,
    script: Mutex<Script>,
}

impl MemorySession {
    /// Create an empty script for a server of the given version
    pub fn new(version: ServerVersion) -> Self {
        Self {
            version,
            script: Mutex::new(Script::default()),
        }
    }

    /// Create a script that answers with the given pages in order
    pub fn with_pages(version: ServerVersion, pages: impl IntoIterator<Item = QueryResponse>) -> Self {
        let session = Self::new(version);
        for page in pages {
            session.push_page(page);
        }
        session
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        // A panicking test thread must not hide the recorded requests
        self.script.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Queue a successful reply
    pub fn push_page(&self, page: QueryResponse) {
        self.lock().replies.push_back(Ok(page));
    }

    /// Queue a failure
    pub fn push_error(&self, err: ConnectionError) {
        self.lock().replies.push_back(Err(err));
    }

    /// Every request sent so far, oldest first
    pub fn sent(&self) -> Vec<QueryRequest> {
        self.lock().sent.clone()
    }

    /// The most recent request
    pub fn last_sent(&self) -> Option<QueryRequest> {
        self.lock().sent.last().cloned()
    }

    /// Replies not yet consumed
    pub fn remaining(&self) -> usize {
        self.lock().replies.len()
    }
}

impl Session for MemorySession {
    fn acquire(&self) -> Result<Box<dyn Connection + '_>, ConnectionError> {
        Ok(Box::new(MemoryConnection { session: self }))
    }
}

struct MemoryConnection<'a> {
    session: &'a MemorySession,
}

impl Connection for MemoryConnection<'_> {
    fn server_version(&self) -> ServerVersion {
        self.session.version
    }

    fn send(&mut self, request: &QueryRequest) -> Result<(), ConnectionError> {
        let mut script = self.session.lock();
        script.sent.push(request.clone());
        script.pending += 1;
        Ok(())
    }

    fn receive(&mut self) -> Result<QueryResponse, ConnectionError> {
        let mut script = self.session.lock();
        if script.pending == 0 {
            return Err(ConnectionError::io("receive without a pending request"));
        }
        script.pending -= 1;
        script.replies.pop_front().unwrap_or(Err(ConnectionError::Closed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(continuation: i32) -> QueryRequest {
        QueryRequest {
            max_rows: 10,
            continuation,
            partial_start_index: 0,
            options: Default::default(),
            column_projection: vec![(403, 1)],
            column_predicates: vec![],
            keyword_predicates: vec![],
        }
    }

    #[test]
    fn test_replays_in_order_and_records() {
        let session = MemorySession::with_pages(
            ServerVersion::new(4, 3, 0),
            vec![
                QueryResponse::from_columns(3, vec![(403, vec!["a".into()])]),
                QueryResponse::from_columns(0, vec![(403, vec!["b".into()])]),
            ],
        );

        let mut conn = session.acquire().unwrap();
        assert_eq!(conn.server_version(), ServerVersion::new(4, 3, 0));
        assert_eq!(conn.round_trip(&request(0)).unwrap().continuation, 3);
        assert_eq!(conn.round_trip(&request(3)).unwrap().continuation, 0);

        let sent = session.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].continuation, 3);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn test_exhausted_script_is_closed() {
        let session = MemorySession::new(ServerVersion::new(4, 3, 0));
        let mut conn = session.acquire().unwrap();
        assert_eq!(conn.round_trip(&request(0)), Err(ConnectionError::Closed));
    }

    #[test]
    fn test_receive_without_send_fails() {
        let session = MemorySession::new(ServerVersion::new(4, 3, 0));
        let mut conn = session.acquire().unwrap();
        assert!(matches!(conn.receive(), Err(ConnectionError::Io(_))));
    }

    #[test]
    fn test_scripted_errors_are_returned() {
        let session = MemorySession::new(ServerVersion::new(4, 3, 0));
        session.push_error(ConnectionError::no_rows());
        let mut conn = session.acquire().unwrap();
        assert!(conn.round_trip(&request(0)).unwrap_err().is_no_rows());
    }
}
