//! Immutable query builder
//!
//! Every builder method returns a new `Query`; the receiver is never
//! touched. Projection order is significant: it is the order columns are
//! requested in and the order response values are mapped back onto.

use std::fmt;
use std::str::FromStr;

use crate::schema::{Column, ProjectionKey, Selection};
use crate::wire::{Aggregate, Modifier, QueryOptions, QueryRequest, ServerVersion, DEFAULT_MAX_ROWS};

use super::compat;
use super::criterion::Criterion;
use super::errors::{QueryError, QueryResult};

/// Sort direction for `Query::order_by`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn modifier(self) -> Modifier {
        match self {
            Direction::Asc => Modifier::OrderAscending,
            Direction::Desc => Modifier::OrderDescending,
        }
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    /// Only the exact strings `asc` and `desc` are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            other => Err(QueryError::invalid_argument(format!(
                "order direction must be 'asc' or 'desc', got {:?}",
                other
            ))),
        }
    }
}

fn to_wire(n: u32) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// A catalog query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    projection: Vec<(Column, Modifier)>,
    predicates: Vec<Criterion>,
    limit: Option<u32>,
    offset: u32,
    continuation: i32,
    options: QueryOptions,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// An empty query: no projection, no predicates, default page size
    pub fn new() -> Self {
        Self {
            projection: Vec::new(),
            predicates: Vec::new(),
            limit: None,
            offset: 0,
            continuation: 0,
            options: QueryOptions::NONE,
        }
    }

    /// A query projecting the given columns and groups
    pub fn select<I>(selections: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Selection>,
    {
        Self::new().project(selections)
    }

    fn position(&self, column: &Column) -> Option<usize> {
        self.projection.iter().position(|(c, _)| c == column)
    }

    // Re-inserting moves the column to the tail
    fn put_last(&mut self, column: Column, modifier: Modifier) {
        if let Some(i) = self.position(&column) {
            self.projection.remove(i);
        }
        self.projection.push((column, modifier));
    }

    /// Add columns to the projection as plain selects
    ///
    /// Groups expand to their member columns. A column already projected
    /// moves to the end.
    pub fn project<I>(&self, selections: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Selection>,
    {
        let mut q = self.clone();
        for selection in selections {
            for column in selection.into().columns() {
                q.put_last(column, Modifier::Select);
            }
        }
        q
    }

    /// Append predicates
    pub fn filter<I>(&self, criteria: I) -> Self
    where
        I: IntoIterator<Item = Criterion>,
    {
        let mut q = self.clone();
        q.predicates.extend(criteria);
        q
    }

    /// Order by `column`; `direction` must be exactly `asc` or `desc`
    ///
    /// The column moves to the end of the projection with the ordering
    /// modifier, replacing any earlier entry for it.
    pub fn order_by(&self, column: Column, direction: &str) -> QueryResult<Self> {
        let direction: Direction = direction.parse()?;
        Ok(self.order_by_direction(column, direction))
    }

    /// Typed form of `order_by`
    pub fn order_by_direction(&self, column: Column, direction: Direction) -> Self {
        let mut q = self.clone();
        q.put_last(column, direction.modifier());
        q
    }

    /// Maximum rows per page
    pub fn limit_rows(&self, n: u32) -> Self {
        let mut q = self.clone();
        q.limit = Some(n);
        q
    }

    /// Rows to skip before the first returned row
    pub fn offset_rows(&self, n: u32) -> Self {
        let mut q = self.clone();
        q.offset = n;
        q
    }

    /// Resume the server-side cursor identified by `n`
    pub fn with_continuation(&self, n: i32) -> Self {
        let mut q = self.clone();
        q.continuation = n;
        q
    }

    /// Replace the option bitmask
    pub fn with_options(&self, options: QueryOptions) -> Self {
        let mut q = self.clone();
        q.options = options;
        q
    }

    /// Add one option to the bitmask
    pub fn with_option(&self, option: QueryOptions) -> Self {
        let mut q = self.clone();
        q.options |= option;
        q
    }

    /// Apply an aggregate to each column of `selection`
    ///
    /// Overrides any modifier already set, ordering included. A projected
    /// column keeps its position; a new one is appended.
    pub fn aggregate(&self, function: Aggregate, selection: impl Into<Selection>) -> Self {
        let mut q = self.clone();
        let modifier = Modifier::from(function);
        for column in selection.into().columns() {
            match q.position(&column) {
                Some(i) => q.projection[i].1 = modifier,
                None => q.projection.push((column, modifier)),
            }
        }
        q
    }

    pub fn min(&self, selection: impl Into<Selection>) -> Self {
        self.aggregate(Aggregate::Min, selection)
    }

    pub fn max(&self, selection: impl Into<Selection>) -> Self {
        self.aggregate(Aggregate::Max, selection)
    }

    pub fn sum(&self, selection: impl Into<Selection>) -> Self {
        self.aggregate(Aggregate::Sum, selection)
    }

    pub fn avg(&self, selection: impl Into<Selection>) -> Self {
        self.aggregate(Aggregate::Avg, selection)
    }

    pub fn count(&self, selection: impl Into<Selection>) -> Self {
        self.aggregate(Aggregate::Count, selection)
    }

    /// Projection in request order
    pub fn projection(&self) -> &[(Column, Modifier)] {
        &self.projection
    }

    /// Modifier currently set for `column`
    pub fn modifier(&self, column: &Column) -> Option<Modifier> {
        self.position(column).map(|i| self.projection[i].1)
    }

    pub fn predicates(&self) -> &[Criterion] {
        &self.predicates
    }

    /// Explicit page size, `None` if never set
    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn continuation(&self) -> i32 {
        self.continuation
    }

    pub fn options(&self) -> QueryOptions {
        self.options
    }

    /// Projection actually sent to a server of `version`
    pub fn compiled_projection(&self, version: ServerVersion) -> Vec<(Column, Modifier)> {
        if version.is_legacy() {
            compat::narrow_projection(&self.projection, version)
        } else {
            self.projection.clone()
        }
    }

    /// Compile into a wire request for a server of `version`
    pub fn compile_request(&self, version: ServerVersion) -> QueryRequest {
        self.request_for(&self.compiled_projection(version))
    }

    pub(crate) fn request_for(&self, projection: &[(Column, Modifier)]) -> QueryRequest {
        let mut column_predicates = Vec::new();
        let mut keyword_predicates = Vec::new();
        for criterion in &self.predicates {
            match criterion.key() {
                ProjectionKey::Column(c) => {
                    column_predicates.push((c.id().get(), criterion.literal().to_string()))
                }
                ProjectionKey::Keyword(k) => {
                    keyword_predicates.push((k.as_str().to_string(), criterion.literal().to_string()))
                }
            }
        }

        QueryRequest {
            max_rows: self.limit.map(to_wire).unwrap_or(DEFAULT_MAX_ROWS),
            continuation: self.continuation,
            partial_start_index: to_wire(self.offset),
            options: self.options,
            column_projection: projection
                .iter()
                .map(|(c, m)| (c.id().get(), m.code()))
                .collect(),
            column_predicates,
            keyword_predicates,
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<String> = self
            .projection
            .iter()
            .map(|(c, m)| match m {
                Modifier::Select => c.name().to_string(),
                other => format!("{:?}({})", other, c.name()),
            })
            .collect();
        write!(f, "select {}", columns.join(", "))?;

        if !self.predicates.is_empty() {
            let conds: Vec<String> = self
                .predicates
                .iter()
                .map(|p| match p.key() {
                    ProjectionKey::Column(c) => format!("{} {}", c.name(), p.literal()),
                    ProjectionKey::Keyword(k) => format!("{}={}", k, p.literal()),
                })
                .collect();
            write!(f, " where {}", conds.join(" and "))?;
        }
        if let Some(limit) = self.limit {
            write!(f, " limit {}", limit)?;
        }
        if self.offset > 0 {
            write!(f, " offset {}", self.offset)?;
        }
        Ok(())
    }
}
