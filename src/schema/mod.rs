//! Catalog schema as seen by the query client
//!
//! Columns are addressed by numeric id on the wire, keywords by name.
//! The built-in `catalog` table covers the commonly queried columns and
//! the groups they belong to.

pub mod catalog;
mod types;

pub use types::{Column, ColumnGroup, ColumnId, ColumnType, Keyword, ProjectionKey, Selection};
