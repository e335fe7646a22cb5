//! Predicates
//!
//! A criterion pairs a projection key with a comparison literal already in
//! the server's condition grammar, e.g. `= '5'` or `between '1' '10'`.

use crate::schema::{Column, Keyword, ProjectionKey};

use super::errors::{QueryError, QueryResult};

/// A single predicate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    key: ProjectionKey,
    operator: String,
    literal: String,
}

fn quote(value: &str) -> String {
    format!("'{}'", value)
}

impl Criterion {
    /// Build a column predicate from an operator and a single value
    pub fn new(column: Column, operator: &str, value: impl AsRef<str>) -> Self {
        Self {
            key: ProjectionKey::Column(column),
            operator: operator.to_string(),
            literal: format!("{} {}", operator, quote(value.as_ref())),
        }
    }

    /// Build a predicate from a literal that is already wire formatted
    pub fn raw(key: impl Into<ProjectionKey>, operator: &str, literal: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            operator: operator.to_string(),
            literal: literal.into(),
        }
    }

    pub fn eq(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, "=", value)
    }

    pub fn ne(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, "<>", value)
    }

    pub fn lt(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, "<", value)
    }

    pub fn le(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, "<=", value)
    }

    pub fn gt(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, ">", value)
    }

    pub fn ge(column: Column, value: impl AsRef<str>) -> Self {
        Self::new(column, ">=", value)
    }

    pub fn like(column: Column, pattern: impl AsRef<str>) -> Self {
        Self::new(column, "like", pattern)
    }

    pub fn not_like(column: Column, pattern: impl AsRef<str>) -> Self {
        Self::new(column, "not like", pattern)
    }

    /// Inclusive range: `between 'lo' 'hi'`
    pub fn between(column: Column, low: impl AsRef<str>, high: impl AsRef<str>) -> Self {
        Self {
            key: ProjectionKey::Column(column),
            operator: "between".to_string(),
            literal: format!("between {} {}", quote(low.as_ref()), quote(high.as_ref())),
        }
    }

    /// Set membership: `in ('a', 'b')`
    pub fn in_list<I, S>(column: Column, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let items: Vec<String> = values.into_iter().map(|v| quote(v.as_ref())).collect();
        Self {
            key: ProjectionKey::Column(column),
            operator: "in".to_string(),
            literal: format!("in ({})", items.join(", ")),
        }
    }

    /// Keyword predicate; keyword values are sent without quoting
    pub fn keyword(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: ProjectionKey::Keyword(Keyword::new(name)),
            operator: "=".to_string(),
            literal: value.into(),
        }
    }

    /// Build a column predicate from a textual operator and its operands
    ///
    /// `between` takes exactly two operands, `in` one or more, every other
    /// operator exactly one.
    pub fn from_operator(column: Column, operator: &str, operands: &[String]) -> QueryResult<Self> {
        let op = operator.trim().to_ascii_lowercase();
        let arity_error = |expected: &str| {
            QueryError::invalid_argument(format!(
                "operator '{}' on {} takes {}, got {}",
                op,
                column.name(),
                expected,
                operands.len()
            ))
        };

        match op.as_str() {
            "between" => match operands {
                [low, high] => Ok(Self::between(column, low, high)),
                _ => Err(arity_error("two operands")),
            },
            "in" => {
                if operands.is_empty() {
                    return Err(arity_error("at least one operand"));
                }
                Ok(Self::in_list(column, operands))
            }
            "=" | "<>" | "!=" | "<" | "<=" | ">" | ">=" | "like" | "not like" => match operands {
                [value] => {
                    let op = if op == "!=" { "<>" } else { op.as_str() };
                    Ok(Self::new(column, op, value))
                }
                _ => Err(arity_error("one operand")),
            },
            other => Err(QueryError::invalid_argument(format!(
                "unknown operator: {}",
                other
            ))),
        }
    }

    /// Returns the projection key
    pub fn key(&self) -> &ProjectionKey {
        &self.key
    }

    /// Returns the bare operator
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Returns the wire literal
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::{DATA_NAME, DATA_SIZE};

    #[test]
    fn test_single_value_literals() {
        assert_eq!(Criterion::eq(DATA_SIZE, "5").literal(), "= '5'");
        assert_eq!(Criterion::like(DATA_NAME, "%.txt").literal(), "like '%.txt'");
        assert_eq!(Criterion::ne(DATA_NAME, "a").operator(), "<>");
    }

    #[test]
    fn test_between_and_in_literals() {
        assert_eq!(
            Criterion::between(DATA_SIZE, "1", "10").literal(),
            "between '1' '10'"
        );
        assert_eq!(
            Criterion::in_list(DATA_NAME, ["a", "b"]).literal(),
            "in ('a', 'b')"
        );
    }

    #[test]
    fn test_keyword_literal_is_raw() {
        let c = Criterion::keyword("zone", "tempZone");
        assert_eq!(c.literal(), "tempZone");
        assert!(matches!(c.key(), ProjectionKey::Keyword(k) if k.as_str() == "zone"));
    }

    #[test]
    fn test_from_operator() {
        let c = Criterion::from_operator(DATA_SIZE, "BETWEEN", &["1".into(), "9".into()]).unwrap();
        assert_eq!(c.literal(), "between '1' '9'");

        let c = Criterion::from_operator(DATA_NAME, "!=", &["x".into()]).unwrap();
        assert_eq!(c.literal(), "<> 'x'");

        assert!(Criterion::from_operator(DATA_SIZE, "between", &["1".into()]).is_err());
        assert!(Criterion::from_operator(DATA_SIZE, "in", &[]).is_err());
        assert!(matches!(
            Criterion::from_operator(DATA_SIZE, "~=", &["1".into()]),
            Err(QueryError::InvalidArgument(_))
        ));
    }
}
