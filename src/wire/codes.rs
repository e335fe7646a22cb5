//! Protocol constants
//!
//! Option bits travel in the request's `options` field. Modifier codes
//! travel as the value half of each column projection entry; aggregate
//! codes are small distinct integers, not bits.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

use crate::query::{QueryError, QueryResult};

/// Page size used when a query never set an explicit limit
pub const DEFAULT_MAX_ROWS: i32 = 500;

/// Server error code meaning "the query matched nothing"
pub const NO_ROWS_FOUND: i32 = -808000;

/// Request option bitmask
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryOptions(u32);

impl QueryOptions {
    pub const NONE: QueryOptions = QueryOptions(0);
    pub const RETURN_TOTAL_ROW_COUNT: QueryOptions = QueryOptions(0x20);
    pub const NO_DISTINCT: QueryOptions = QueryOptions(0x40);
    pub const QUOTA_QUERY: QueryOptions = QueryOptions(0x80);
    pub const AUTO_CLOSE: QueryOptions = QueryOptions(0x100);
    pub const UPPER_CASE_WHERE: QueryOptions = QueryOptions(0x200);
    pub const ORDER_ASCENDING: QueryOptions = QueryOptions(0x400);
    pub const ORDER_DESCENDING: QueryOptions = QueryOptions(0x800);

    const NAMED: [(&'static str, QueryOptions); 7] = [
        ("return_total_row_count", Self::RETURN_TOTAL_ROW_COUNT),
        ("no_distinct", Self::NO_DISTINCT),
        ("quota_query", Self::QUOTA_QUERY),
        ("auto_close", Self::AUTO_CLOSE),
        ("upper_case_where", Self::UPPER_CASE_WHERE),
        ("order_ascending", Self::ORDER_ASCENDING),
        ("order_descending", Self::ORDER_DESCENDING),
    ];

    /// Returns the raw bitmask
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set
    pub fn contains(self, other: QueryOptions) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no bit is set
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Parse a lowercase option name such as `return_total_row_count`
    pub fn from_name(name: &str) -> QueryResult<Self> {
        Self::NAMED
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, o)| *o)
            .ok_or_else(|| QueryError::invalid_argument(format!("unknown query option: {}", name)))
    }
}

impl BitOr for QueryOptions {
    type Output = QueryOptions;

    fn bitor(self, rhs: QueryOptions) -> QueryOptions {
        QueryOptions(self.0 | rhs.0)
    }
}

impl BitOrAssign for QueryOptions {
    fn bitor_assign(&mut self, rhs: QueryOptions) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for QueryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Per-column projection modifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    /// Plain select
    Select,
    OrderAscending,
    OrderDescending,
    Min,
    Max,
    Sum,
    Avg,
    Count,
}

impl Modifier {
    /// Returns the wire code
    pub fn code(self) -> i32 {
        match self {
            Modifier::Select => 1,
            Modifier::Min => 2,
            Modifier::Max => 3,
            Modifier::Sum => 4,
            Modifier::Avg => 5,
            Modifier::Count => 6,
            Modifier::OrderAscending => 0x400,
            Modifier::OrderDescending => 0x800,
        }
    }

    /// True for min/max/sum/avg/count
    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            Modifier::Min | Modifier::Max | Modifier::Sum | Modifier::Avg | Modifier::Count
        )
    }
}

/// Aggregate functions accepted by `Query::aggregate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    Min,
    Max,
    Sum,
    Avg,
    Count,
}

impl From<Aggregate> for Modifier {
    fn from(agg: Aggregate) -> Self {
        match agg {
            Aggregate::Min => Modifier::Min,
            Aggregate::Max => Modifier::Max,
            Aggregate::Sum => Modifier::Sum,
            Aggregate::Avg => Modifier::Avg,
            Aggregate::Count => Modifier::Count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_bits_distinct() {
        let all = QueryOptions::NAMED
            .iter()
            .fold(QueryOptions::NONE, |acc, (_, o)| acc | *o);
        assert_eq!(all.bits().count_ones() as usize, QueryOptions::NAMED.len());
    }

    #[test]
    fn test_option_union_and_contains() {
        let opts = QueryOptions::RETURN_TOTAL_ROW_COUNT | QueryOptions::NO_DISTINCT;
        assert!(opts.contains(QueryOptions::NO_DISTINCT));
        assert!(!opts.contains(QueryOptions::AUTO_CLOSE));
        assert_eq!(opts.bits(), 0x60);
        assert!(QueryOptions::default().is_empty());
    }

    #[test]
    fn test_option_from_name() {
        assert_eq!(
            QueryOptions::from_name("auto_close").unwrap(),
            QueryOptions::AUTO_CLOSE
        );
        assert!(matches!(
            QueryOptions::from_name("AUTO_CLOSE"),
            Err(QueryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_modifier_codes() {
        assert_eq!(Modifier::Select.code(), 1);
        assert_eq!(Modifier::Count.code(), 6);
        assert_eq!(Modifier::OrderDescending.code(), 0x800);
        assert!(Modifier::from(Aggregate::Avg).is_aggregate());
        assert!(!Modifier::OrderAscending.is_aggregate());
    }
}
