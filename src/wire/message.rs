//! Request and response records
//!
//! The byte-level codec is owned by the transport; these types only fix
//! the field sets it encodes and decodes.

use serde::{Deserialize, Serialize};

use super::codes::QueryOptions;

/// A compiled general-query request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub max_rows: i32,
    pub continuation: i32,
    pub partial_start_index: i32,
    pub options: QueryOptions,
    /// `(column id, modifier code)` in request order
    pub column_projection: Vec<(i32, i32)>,
    /// `(column id, comparison literal)` in predicate order
    pub column_predicates: Vec<(i32, String)>,
    /// `(keyword, value)` in predicate order
    pub keyword_predicates: Vec<(String, String)>,
}

impl QueryRequest {
    /// True if this request asks the server to drop a cursor
    ///
    /// Any zero-row request is a close, whatever its continuation.
    pub fn is_close(&self) -> bool {
        self.max_rows == 0
    }
}

/// One returned column; `values[i]` belongs to row `i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseColumn {
    pub projection_key: i32,
    pub values: Vec<String>,
}

/// A general-query response page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub row_count: i32,
    pub column_count: i32,
    pub continuation: i32,
    #[serde(default)]
    pub total_row_count: i32,
    pub columns: Vec<ResponseColumn>,
}

impl QueryResponse {
    /// Build a page from `(column id, values)` pairs; counts are derived
    pub fn from_columns(continuation: i32, columns: Vec<(i32, Vec<String>)>) -> Self {
        let row_count = columns.first().map(|(_, v)| v.len()).unwrap_or(0) as i32;
        let columns: Vec<ResponseColumn> = columns
            .into_iter()
            .map(|(projection_key, values)| ResponseColumn {
                projection_key,
                values,
            })
            .collect();

        Self {
            row_count,
            column_count: columns.len() as i32,
            continuation,
            total_row_count: 0,
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serializes_ordered_maps_as_pairs() {
        let req = QueryRequest {
            max_rows: 500,
            continuation: 0,
            partial_start_index: 0,
            options: QueryOptions::NONE,
            column_projection: vec![(501, 1), (403, 0x400)],
            column_predicates: vec![(403, "like '%.txt'".into())],
            keyword_predicates: vec![],
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["column_projection"], json!([[501, 1], [403, 1024]]));
        assert_eq!(value["options"], json!(0));
        assert!(!req.is_close());
    }

    #[test]
    fn test_zero_rows_is_close_for_any_continuation() {
        let mut req = QueryRequest {
            max_rows: 0,
            continuation: 0,
            partial_start_index: 0,
            options: QueryOptions::NONE,
            column_projection: vec![(403, 1)],
            column_predicates: vec![],
            keyword_predicates: vec![],
        };
        assert!(req.is_close());
        req.continuation = 7;
        assert!(req.is_close());
        req.max_rows = 1;
        assert!(!req.is_close());
    }

    #[test]
    fn test_response_deserializes_without_total() {
        let resp: QueryResponse = serde_json::from_value(json!({
            "row_count": 1,
            "column_count": 1,
            "continuation": 0,
            "columns": [{"projection_key": 403, "values": ["a.txt"]}]
        }))
        .unwrap();
        assert_eq!(resp.total_row_count, 0);
        assert_eq!(resp.columns[0].values, vec!["a.txt".to_string()]);
    }

    #[test]
    fn test_from_columns_derives_counts() {
        let resp = QueryResponse::from_columns(
            7,
            vec![(1, vec!["5".into(), "5".into()]), (2, vec!["1".into(), "2".into()])],
        );
        assert_eq!(resp.row_count, 2);
        assert_eq!(resp.column_count, 2);
        assert_eq!(resp.continuation, 7);
    }
}
