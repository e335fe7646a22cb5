//! Result types for query execution
//!
//! A response carries one value list per projected column; row `i` is the
//! `i`-th element of every list, taken in projection order.

use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::schema::{Column, ColumnType};
use crate::wire::QueryResponse;

use super::errors::{QueryError, QueryResult};

/// A decoded cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Text(String),
    Integer(i64),
    Time(DateTime<Utc>),
}

impl Value {
    /// Decode a wire string according to the column type
    ///
    /// Empty strings are `Null` for integer and time columns.
    pub fn decode(column: &Column, raw: &str) -> QueryResult<Self> {
        match column.kind() {
            ColumnType::Text => Ok(Value::Text(raw.to_string())),
            _ if raw.trim().is_empty() => Ok(Value::Null),
            ColumnType::Integer => raw
                .trim()
                .parse::<i64>()
                .map(Value::Integer)
                .map_err(|_| bad_value(column, raw)),
            ColumnType::DateTime => {
                let secs = raw.trim().parse::<i64>().map_err(|_| bad_value(column, raw))?;
                DateTime::from_timestamp(secs, 0)
                    .map(Value::Time)
                    .ok_or_else(|| bad_value(column, raw))
            }
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::Time(t) => Some(*t),
            _ => None,
        }
    }
}

fn bad_value(column: &Column, raw: &str) -> QueryError {
    QueryError::decode(format!(
        "column {} expects {}, got {:?}",
        column.name(),
        column.kind().type_name(),
        raw
    ))
}

/// One result row, addressable by column, in projection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    cells: Vec<(Column, Value)>,
}

impl Row {
    pub fn new(cells: Vec<(Column, Value)>) -> Self {
        Self { cells }
    }

    /// Value for `column`, if projected
    pub fn get(&self, column: &Column) -> Option<&Value> {
        self.cells.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    /// Value for the column named `name`
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.cells
            .iter()
            .find(|(c, _)| c.name() == name)
            .map(|(_, v)| v)
    }

    /// Columns in projection order
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.cells.iter().map(|(c, _)| c)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Column, Value)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (column, value) in &self.cells {
            map.serialize_entry(column.name(), value)?;
        }
        map.end()
    }
}

/// One decoded response page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultSet {
    rows: Vec<Row>,
    continuation: i32,
    total_row_count: Option<i32>,
}

impl ResultSet {
    /// A page with no rows and no open cursor
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            continuation: 0,
            total_row_count: None,
        }
    }

    /// Decode `response` against the projection that produced it
    ///
    /// `with_total` says whether the request asked for a total row count.
    pub fn decode(
        projection: &[Column],
        response: &QueryResponse,
        with_total: bool,
    ) -> QueryResult<Self> {
        let row_count = usize::try_from(response.row_count).map_err(|_| {
            QueryError::decode(format!("negative row count {}", response.row_count))
        })?;

        if row_count > 0 && response.columns.len() < projection.len() {
            return Err(QueryError::decode(format!(
                "response has {} columns, projection has {}",
                response.columns.len(),
                projection.len()
            )));
        }

        let mut rows: Vec<Vec<(Column, Value)>> = (0..row_count)
            .map(|_| Vec::with_capacity(projection.len()))
            .collect();

        if row_count > 0 {
            for (column, returned) in projection.iter().zip(&response.columns) {
                if returned.projection_key != column.id().get() {
                    return Err(QueryError::decode(format!(
                        "expected column {} at this position, got id {}",
                        column,
                        returned.projection_key
                    )));
                }
                if returned.values.len() < row_count {
                    return Err(QueryError::decode(format!(
                        "column {} has {} values for {} rows",
                        column.name(),
                        returned.values.len(),
                        row_count
                    )));
                }
                for (row, raw) in rows.iter_mut().zip(&returned.values) {
                    row.push((*column, Value::decode(column, raw)?));
                }
            }
        }

        Ok(Self {
            rows: rows.into_iter().map(Row::new).collect(),
            continuation: response.continuation,
            total_row_count: with_total.then_some(response.total_row_count),
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Row> {
        self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    /// Server cursor; greater than zero while more rows remain
    pub fn continuation(&self) -> i32 {
        self.continuation
    }

    /// Total matching rows, if the request asked for it
    pub fn total_row_count(&self) -> Option<i32> {
        self.total_row_count
    }

    pub fn has_more(&self) -> bool {
        self.continuation > 0
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}
