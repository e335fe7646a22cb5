//! Projection key types
//!
//! A query talks about two disjoint kinds of keys:
//! - columns, identified on the wire by a numeric id
//! - keywords, identified by name (predicates only)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Wire type of a column value, used to decode response strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    /// UTF-8 text, returned verbatim
    Text,
    /// 64-bit signed integer
    Integer,
    /// Seconds since the Unix epoch, zero padded on the wire
    DateTime,
}

impl ColumnType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::Integer => "integer",
            ColumnType::DateTime => "datetime",
        }
    }
}

/// Numeric column identifier as sent on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub i32);

impl ColumnId {
    /// Returns the raw wire value
    pub fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog column
///
/// Identity is the id alone; the name and type are descriptive.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    id: ColumnId,
    name: &'static str,
    kind: ColumnType,
}

impl Column {
    /// Define a column
    pub const fn new(id: i32, name: &'static str, kind: ColumnType) -> Self {
        Self {
            id: ColumnId(id),
            name,
            kind,
        }
    }

    /// Returns the wire id
    pub fn id(&self) -> ColumnId {
        self.id
    }

    /// Returns the catalog name (e.g. `DATA_NAME`)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the value type
    pub fn kind(&self) -> ColumnType {
        self.kind
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Column {}

impl std::hash::Hash for Column {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.id)
    }
}

/// A named keyword, used for keyword-indexed predicates
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Create a keyword
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the keyword name
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Either kind of projection key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProjectionKey {
    Column(Column),
    Keyword(Keyword),
}

impl From<Column> for ProjectionKey {
    fn from(column: Column) -> Self {
        ProjectionKey::Column(column)
    }
}

impl From<Keyword> for ProjectionKey {
    fn from(keyword: Keyword) -> Self {
        ProjectionKey::Keyword(keyword)
    }
}

impl fmt::Display for ProjectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionKey::Column(c) => write!(f, "{}", c),
            ProjectionKey::Keyword(k) => write!(f, "keyword {}", k),
        }
    }
}

/// A named group of columns, e.g. every column describing a data object
#[derive(Debug, Clone, Copy)]
pub struct ColumnGroup {
    name: &'static str,
    columns: &'static [Column],
}

impl ColumnGroup {
    /// Define a group
    pub const fn new(name: &'static str, columns: &'static [Column]) -> Self {
        Self { name, columns }
    }

    /// Returns the group name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the member columns in declaration order
    pub fn columns(&self) -> &'static [Column] {
        self.columns
    }
}

/// What a builder method may be handed: a column or a whole group
#[derive(Debug, Clone, Copy)]
pub enum Selection {
    Column(Column),
    Group(ColumnGroup),
}

impl Selection {
    /// Expand into individual columns, in order
    pub fn columns(&self) -> Vec<Column> {
        match self {
            Selection::Column(c) => vec![*c],
            Selection::Group(g) => g.columns().to_vec(),
        }
    }
}

impl From<Column> for Selection {
    fn from(column: Column) -> Self {
        Selection::Column(column)
    }
}

impl From<&Column> for Selection {
    fn from(column: &Column) -> Self {
        Selection::Column(*column)
    }
}

impl From<ColumnGroup> for Selection {
    fn from(group: ColumnGroup) -> Self {
        Selection::Group(group)
    }
}

impl From<&ColumnGroup> for Selection {
    fn from(group: &ColumnGroup) -> Self {
        Selection::Group(*group)
    }
}
