//! Execution and pagination
//!
//! # Cursor states
//!
//! - Fresh: continuation 0, nothing sent yet
//! - HasMore: the last page came back with continuation > 0; the server
//!   holds an open cursor until it is read to the end or closed
//! - Exhausted: the last page came back with continuation 0
//! - Empty: the server reported no matching rows
//!
//! A caller that stops reading a HasMore cursor must close it; otherwise
//! the server keeps it open for the rest of the session.

use uuid::Uuid;

use crate::observability::{log_event, Event};
use crate::schema::Column;
use crate::session::Session;
use crate::wire::QueryOptions;

use super::builder::Query;
use super::errors::{QueryError, QueryResult};
use super::result::{ResultSet, Row};

impl Query {
    /// Send this query once and decode the returned page
    ///
    /// A "no rows found" reply from the server becomes an empty page.
    /// Every other failure is returned unchanged.
    pub fn execute<S: Session + ?Sized>(&self, session: &S) -> QueryResult<ResultSet> {
        let trace_id = Uuid::new_v4().to_string();
        let mut conn = session.acquire()?;
        let version = conn.server_version();

        let projection = self.compiled_projection(version);
        if projection.len() < self.projection().len() {
            let dropped = (self.projection().len() - projection.len()).to_string();
            log_event(
                Event::ProjectionNarrowed,
                &[
                    ("dropped", dropped.as_str()),
                    ("server_version", version.to_string().as_str()),
                    ("trace_id", trace_id.as_str()),
                ],
            );
        }

        let request = self.request_for(&projection);
        log_event(
            Event::QueryExecute,
            &[
                ("continuation", request.continuation.to_string().as_str()),
                ("max_rows", request.max_rows.to_string().as_str()),
                ("trace_id", trace_id.as_str()),
            ],
        );

        let response = match conn.round_trip(&request) {
            Ok(response) => response,
            Err(err) if err.is_no_rows() => {
                log_event(Event::QueryNoRows, &[("trace_id", trace_id.as_str())]);
                return Ok(ResultSet::empty());
            }
            Err(err) => {
                log_event(
                    Event::QueryFailed,
                    &[("reason", err.to_string().as_str()), ("trace_id", trace_id.as_str())],
                );
                return Err(err.into());
            }
        };

        let columns: Vec<Column> = projection.iter().map(|(c, _)| *c).collect();
        let with_total = self.options().contains(QueryOptions::RETURN_TOTAL_ROW_COUNT);
        let page = ResultSet::decode(&columns, &response, with_total)?;

        log_event(
            Event::QueryPage,
            &[
                ("continuation", page.continuation().to_string().as_str()),
                ("rows", page.len().to_string().as_str()),
                ("trace_id", trace_id.as_str()),
            ],
        );
        Ok(page)
    }

    /// Release the server cursor identified by `continuation`
    ///
    /// Sends this query with that continuation and a page size of zero.
    pub fn close<S: Session + ?Sized>(&self, session: &S, continuation: i32) -> QueryResult<()> {
        self.with_continuation(continuation)
            .limit_rows(0)
            .execute(session)?;
        log_event(
            Event::CursorClose,
            &[("continuation", continuation.to_string().as_str())],
        );
        Ok(())
    }

    fn close_if_open<S: Session + ?Sized>(&self, session: &S, page: &ResultSet) -> QueryResult<()> {
        if page.has_more() {
            self.close(session, page.continuation())?;
        }
        Ok(())
    }

    /// The first page only, with any still-open cursor closed
    ///
    /// This does not follow continuations: it returns what the server put
    /// in one page.
    pub fn all<S: Session + ?Sized>(&self, session: &S) -> QueryResult<ResultSet> {
        let page = self.execute(session)?;
        self.close_if_open(session, &page)?;
        Ok(page)
    }

    /// Lazily fetch every page, one `execute` per step
    pub fn batches<'s, S: Session + ?Sized>(&self, session: &'s S) -> Batches<'s, S> {
        Batches {
            query: self.clone(),
            session,
            state: CursorState::Fresh,
        }
    }

    /// Lazily fetch every row across all pages
    ///
    /// Single pass: consuming the iterator drives the network calls.
    pub fn results<'s, S: Session + ?Sized>(&self, session: &'s S) -> Results<'s, S> {
        Results {
            batches: self.batches(session),
            current: Vec::new().into_iter(),
        }
    }

    /// Exactly one row, or `NoResultFound` / `MultipleResultsFound`
    pub fn one<S: Session + ?Sized>(&self, session: &S) -> QueryResult<Row> {
        let page = self.execute(session)?;
        self.close_if_open(session, &page)?;

        match page.len() {
            0 => Err(QueryError::NoResultFound),
            1 => Ok(page.into_rows().remove(0)),
            n => Err(QueryError::MultipleResultsFound(n)),
        }
    }

    /// The first row, if any
    pub fn first<S: Session + ?Sized>(&self, session: &S) -> QueryResult<Option<Row>> {
        let query = self.limit_rows(1);
        let page = query.execute(session)?;
        query.close_if_open(session, &page)?;
        Ok(page.into_rows().into_iter().next())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorState {
    Fresh,
    HasMore(i32),
    Done,
}

/// Iterator over result pages
///
/// Stops after the first page whose continuation is zero, or after the
/// first error.
pub struct Batches<'s, S: Session + ?Sized> {
    query: Query,
    session: &'s S,
    state: CursorState,
}

impl<S: Session + ?Sized> Batches<'_, S> {
    /// True if the server still holds an open cursor for this iterator
    pub fn is_open(&self) -> bool {
        matches!(self.state, CursorState::HasMore(_))
    }

    /// Stop early and release the server cursor
    pub fn close(mut self) -> QueryResult<()> {
        let state = std::mem::replace(&mut self.state, CursorState::Done);
        match state {
            CursorState::HasMore(continuation) => self.query.close(self.session, continuation),
            _ => Ok(()),
        }
    }
}

impl<S: Session + ?Sized> Iterator for Batches<'_, S> {
    type Item = QueryResult<ResultSet>;

    fn next(&mut self) -> Option<Self::Item> {
        let query = match self.state {
            CursorState::Fresh => self.query.clone(),
            CursorState::HasMore(continuation) => self.query.with_continuation(continuation),
            CursorState::Done => return None,
        };

        match query.execute(self.session) {
            Ok(page) => {
                self.state = if page.has_more() {
                    CursorState::HasMore(page.continuation())
                } else {
                    CursorState::Done
                };
                Some(Ok(page))
            }
            Err(err) => {
                // The cursor, if any, is left to the transport
                self.state = CursorState::Done;
                Some(Err(err))
            }
        }
    }
}

impl<S: Session + ?Sized> Drop for Batches<'_, S> {
    fn drop(&mut self) {
        if let CursorState::HasMore(continuation) = self.state {
            log_event(
                Event::CursorLeakRisk,
                &[("continuation", continuation.to_string().as_str())],
            );
        }
    }
}

/// Iterator over rows, flattening `Batches`
pub struct Results<'s, S: Session + ?Sized> {
    batches: Batches<'s, S>,
    current: std::vec::IntoIter<Row>,
}

impl<S: Session + ?Sized> Results<'_, S> {
    /// True if the server still holds an open cursor for this iterator
    pub fn is_open(&self) -> bool {
        self.batches.is_open()
    }

    /// Stop early and release the server cursor
    pub fn close(self) -> QueryResult<()> {
        self.batches.close()
    }
}

impl<S: Session + ?Sized> Iterator for Results<'_, S> {
    type Item = QueryResult<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(row) = self.current.next() {
                return Some(Ok(row));
            }
            match self.batches.next()? {
                Ok(page) => self.current = page.into_rows().into_iter(),
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Criterion;
    use crate::schema::catalog::{DATA_NAME, DATA_SIZE};
    use crate::session::{ConnectionError, MemorySession};
    use crate::wire::{QueryResponse, ServerVersion};

    const V4: ServerVersion = ServerVersion::new(4, 3, 0);

    fn page(continuation: i32, names: &[&str]) -> QueryResponse {
        QueryResponse::from_columns(
            continuation,
            vec![(403, names.iter().map(|s| s.to_string()).collect())],
        )
    }

    fn names_query() -> Query {
        Query::select([DATA_NAME])
    }

    #[test]
    fn test_execute_normalizes_no_rows() {
        let session = MemorySession::new(V4);
        session.push_error(ConnectionError::no_rows());

        let rs = names_query().execute(&session).unwrap();
        assert!(rs.is_empty());
        assert_eq!(rs.continuation(), 0);
    }

    #[test]
    fn test_execute_passes_other_errors_through() {
        let session = MemorySession::new(V4);
        session.push_error(ConnectionError::server(-806000, "CAT_SQL_ERR"));

        match names_query().execute(&session) {
            Err(QueryError::Connection(ConnectionError::Server { code, .. })) => {
                assert_eq!(code, -806000)
            }
            other => panic!("expected server error, got {:?}", other),
        }
    }

    #[test]
    fn test_close_sends_zero_rows_with_continuation() {
        let session = MemorySession::new(V4);
        session.push_page(QueryResponse::default());

        names_query().close(&session, 7).unwrap();
        let req = session.last_sent().unwrap();
        assert_eq!(req.max_rows, 0);
        assert_eq!(req.continuation, 7);
        assert!(req.is_close());
    }

    #[test]
    fn test_close_with_zero_continuation_is_still_a_close() {
        let session = MemorySession::new(V4);
        session.push_page(QueryResponse::default());

        names_query().close(&session, 0).unwrap();
        let req = session.last_sent().unwrap();
        assert_eq!(req.continuation, 0);
        assert!(req.is_close());
    }

    #[test]
    fn test_all_closes_open_cursor_without_paging() {
        let session = MemorySession::with_pages(
            V4,
            vec![page(5, &["a", "b"]), QueryResponse::default()],
        );

        let rs = names_query().all(&session).unwrap();
        assert_eq!(rs.len(), 2);

        let sent = session.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].is_close());
        assert_eq!(sent[1].continuation, 5);
    }

    #[test]
    fn test_all_on_final_page_sends_nothing_more() {
        let session = MemorySession::with_pages(V4, vec![page(0, &["a"])]);
        names_query().all(&session).unwrap();
        assert_eq!(session.sent().len(), 1);
    }

    #[test]
    fn test_batches_follow_continuations() {
        let session = MemorySession::with_pages(
            V4,
            vec![page(5, &["a"]), page(9, &["b"]), page(0, &["c"])],
        );

        let pages: Vec<ResultSet> = names_query()
            .batches(&session)
            .collect::<QueryResult<_>>()
            .unwrap();
        assert_eq!(pages.len(), 3);

        let continuations: Vec<i32> = session.sent().iter().map(|r| r.continuation).collect();
        assert_eq!(continuations, vec![0, 5, 9]);
    }

    #[test]
    fn test_batches_stop_after_error() {
        let session = MemorySession::with_pages(V4, vec![page(5, &["a"])]);
        session.push_error(ConnectionError::io("reset"));
        session.push_page(page(0, &["never"]));

        let items: Vec<_> = names_query().batches(&session).collect();
        assert_eq!(items.len(), 2);
        assert!(items[1].is_err());
        assert_eq!(session.remaining(), 1);
    }

    #[test]
    fn test_batches_close_releases_cursor() {
        let session = MemorySession::with_pages(
            V4,
            vec![page(5, &["a"]), QueryResponse::default()],
        );

        let mut batches = names_query().batches(&session);
        batches.next().unwrap().unwrap();
        assert!(batches.is_open());
        batches.close().unwrap();

        let req = session.last_sent().unwrap();
        assert!(req.is_close());
        assert_eq!(req.continuation, 5);
    }

    #[test]
    fn test_results_flatten_pages() {
        let session = MemorySession::with_pages(
            V4,
            vec![page(3, &["a", "b"]), page(0, &["c"])],
        );

        let names: Vec<String> = names_query()
            .results(&session)
            .map(|r| r.unwrap().get(&DATA_NAME).unwrap().as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_one() {
        let session = MemorySession::new(V4);
        session.push_error(ConnectionError::no_rows());
        assert!(matches!(
            names_query().one(&session),
            Err(QueryError::NoResultFound)
        ));

        session.push_page(page(0, &["a", "b"]));
        assert!(matches!(
            names_query().one(&session),
            Err(QueryError::MultipleResultsFound(2))
        ));

        session.push_page(page(0, &["a"]));
        let row = names_query().one(&session).unwrap();
        assert_eq!(row.get(&DATA_NAME).unwrap().as_str(), Some("a"));
    }

    #[test]
    fn test_first_limits_to_one_and_closes() {
        let session = MemorySession::with_pages(
            V4,
            vec![page(11, &["a"]), QueryResponse::default()],
        );

        let row = names_query()
            .filter([Criterion::gt(DATA_SIZE, "0")])
            .first(&session)
            .unwrap();
        assert!(row.is_some());

        let sent = session.sent();
        assert_eq!(sent[0].max_rows, 1);
        assert_eq!(sent[1].max_rows, 0);
        assert_eq!(sent[1].continuation, 11);
    }

    #[test]
    fn test_first_on_no_rows_is_none() {
        let session = MemorySession::new(V4);
        session.push_error(ConnectionError::no_rows());
        assert!(names_query().first(&session).unwrap().is_none());
    }
}
