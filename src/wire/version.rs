//! Server version triples

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::query::{QueryError, QueryResult};

/// Servers older than this lack the resource hierarchy columns
pub const LEGACY_SERVER_THRESHOLD: ServerVersion = ServerVersion::new(4, 0, 0);

/// A `(major, minor, patch)` server version, ordered lexicographically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

fn release_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z]+)?(\d+)\.(\d+)(?:\.(\d+))?$").expect("release pattern is valid")
    })
}

impl ServerVersion {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Parse a release string as reported by the server handshake
    ///
    /// Accepts `4.2.11`, `4.2` and prefixed forms such as `rods4.2.11`.
    /// A missing patch component reads as zero.
    pub fn parse(release: &str) -> QueryResult<Self> {
        let caps = release_pattern()
            .captures(release.trim())
            .ok_or_else(|| {
                QueryError::invalid_argument(format!("malformed server version: {:?}", release))
            })?;

        let part = |i: usize| -> QueryResult<u32> {
            match caps.get(i) {
                Some(m) => m.as_str().parse().map_err(|_| {
                    QueryError::invalid_argument(format!(
                        "version component out of range: {:?}",
                        m.as_str()
                    ))
                }),
                None => Ok(0),
            }
        };

        Ok(Self::new(part(1)?, part(2)?, part(3)?))
    }

    /// True if this server predates `LEGACY_SERVER_THRESHOLD`
    pub fn is_legacy(&self) -> bool {
        *self < LEGACY_SERVER_THRESHOLD
    }
}

impl FromStr for ServerVersion {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_forms() {
        assert_eq!(ServerVersion::parse("4.2.11").unwrap(), ServerVersion::new(4, 2, 11));
        assert_eq!(ServerVersion::parse("rods3.3.1").unwrap(), ServerVersion::new(3, 3, 1));
        assert_eq!(ServerVersion::parse("4.3").unwrap(), ServerVersion::new(4, 3, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(ServerVersion::parse("four").is_err());
        assert!(ServerVersion::parse("4.x.1").is_err());
        assert!(ServerVersion::parse("").is_err());
    }

    #[test]
    fn test_ordering_and_legacy() {
        assert!(ServerVersion::new(3, 3, 1).is_legacy());
        assert!(!ServerVersion::new(4, 0, 0).is_legacy());
        assert!(ServerVersion::new(4, 10, 0) > ServerVersion::new(4, 9, 9));
    }

    #[test]
    fn test_display_round_trips() {
        let v = ServerVersion::new(4, 2, 11);
        assert_eq!(v.to_string().parse::<ServerVersion>().unwrap(), v);
    }
}
