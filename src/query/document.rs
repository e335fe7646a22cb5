//! JSON query documents
//!
//! A textual form of a query, resolved against the built-in catalog:
//!
//! ```json
//! {
//!   "select": ["COLL_NAME", "DATA_NAME"],
//!   "filter": [
//!     {"column": "DATA_NAME", "op": "like", "value": "%.txt"},
//!     {"keyword": "zone", "value": "tempZone"}
//!   ],
//!   "order_by": [{"column": "DATA_SIZE", "direction": "desc"}],
//!   "aggregate": [{"function": "count", "column": "DATA_ID"}],
//!   "limit": 10,
//!   "options": ["return_total_row_count"]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::schema::{catalog, Column, Selection};
use crate::wire::{Aggregate, QueryOptions};

use super::builder::Query;
use super::criterion::Criterion;
use super::errors::{QueryError, QueryResult};

/// A predicate entry; exactly one of `column` or `keyword` must be set
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterEntry {
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default = "default_operator")]
    pub op: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub values: Vec<String>,
}

fn default_operator() -> String {
    "=".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderEntry {
    pub column: String,
    #[serde(default = "default_direction")]
    pub direction: String,
}

fn default_direction() -> String {
    "asc".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AggregateEntry {
    pub function: Aggregate,
    pub column: String,
}

/// Serde form of a query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueryDocument {
    /// Column or group names
    #[serde(default)]
    pub select: Vec<String>,
    #[serde(default)]
    pub filter: Vec<FilterEntry>,
    #[serde(default)]
    pub order_by: Vec<OrderEntry>,
    #[serde(default)]
    pub aggregate: Vec<AggregateEntry>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
    #[serde(default)]
    pub continuation: Option<i32>,
    #[serde(default)]
    pub options: Vec<String>,
}

fn resolve_selection(name: &str) -> QueryResult<Selection> {
    if let Some(column) = catalog::column_by_name(name) {
        return Ok(column.into());
    }
    catalog::group_by_name(name)
        .map(Selection::from)
        .ok_or_else(|| QueryError::invalid_argument(format!("unknown column or group: {}", name)))
}

fn resolve_column(name: &str) -> QueryResult<Column> {
    catalog::column_by_name(name)
        .ok_or_else(|| QueryError::invalid_argument(format!("unknown column: {}", name)))
}

impl FilterEntry {
    fn operands(&self) -> Vec<String> {
        let mut operands: Vec<String> = self.value.iter().cloned().collect();
        operands.extend(self.values.iter().cloned());
        operands
    }

    fn to_criterion(&self) -> QueryResult<Criterion> {
        match (&self.column, &self.keyword) {
            (Some(column), None) => {
                Criterion::from_operator(resolve_column(column)?, &self.op, &self.operands())
            }
            (None, Some(keyword)) => {
                // Keyword predicates are sent raw: equality on a single value only
                if self.op.trim() != "=" {
                    return Err(QueryError::invalid_argument(format!(
                        "keyword {} only supports '=', got '{}'",
                        keyword, self.op
                    )));
                }
                if !self.values.is_empty() {
                    return Err(QueryError::invalid_argument(format!(
                        "keyword {} takes a single value",
                        keyword
                    )));
                }
                let value = self.value.clone().ok_or_else(|| {
                    QueryError::invalid_argument(format!("keyword {} needs a value", keyword))
                })?;
                Ok(Criterion::keyword(keyword.clone(), value))
            }
            (Some(_), Some(_)) => Err(QueryError::invalid_argument(
                "filter entry names both a column and a keyword",
            )),
            (None, None) => Err(QueryError::invalid_argument(
                "filter entry has neither a column nor a keyword",
            )),
        }
    }
}

impl QueryDocument {
    /// Parse a document from JSON text
    pub fn parse(json: &str) -> QueryResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| QueryError::invalid_argument(format!("invalid query document: {}", e)))
    }
}

impl Query {
    /// Build a query from a document, resolving names against the catalog
    ///
    /// Clauses apply in a fixed order: select, aggregate, order_by, filter,
    /// then the scalar fields.
    pub fn from_document(doc: &QueryDocument) -> QueryResult<Self> {
        let selections = doc
            .select
            .iter()
            .map(|name| resolve_selection(name))
            .collect::<QueryResult<Vec<_>>>()?;
        let mut query = Query::select(selections);

        for entry in &doc.aggregate {
            query = query.aggregate(entry.function, resolve_column(&entry.column)?);
        }

        for entry in &doc.order_by {
            query = query.order_by(resolve_column(&entry.column)?, &entry.direction)?;
        }

        let criteria = doc
            .filter
            .iter()
            .map(FilterEntry::to_criterion)
            .collect::<QueryResult<Vec<_>>>()?;
        query = query.filter(criteria);

        if let Some(limit) = doc.limit {
            query = query.limit_rows(limit);
        }
        if let Some(offset) = doc.offset {
            query = query.offset_rows(offset);
        }
        if let Some(continuation) = doc.continuation {
            query = query.with_continuation(continuation);
        }

        let mut options = QueryOptions::NONE;
        for name in &doc.options {
            options |= QueryOptions::from_name(name)?;
        }
        Ok(query.with_options(options))
    }
}
