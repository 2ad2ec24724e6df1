//! Identifier types for stations and routes.

use std::fmt;
use std::sync::Arc;

/// Error returned when parsing an invalid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid identifier: {reason}")]
pub struct InvalidId {
    reason: &'static str,
}

const MAX_ID_LEN: usize = 100;

fn parse_id(s: &str) -> Result<Arc<str>, InvalidId> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err(InvalidId {
            reason: "must not be empty",
        });
    }

    if trimmed.len() > MAX_ID_LEN {
        return Err(InvalidId {
            reason: "too long",
        });
    }

    if trimmed.chars().any(|c| c.is_control()) {
        return Err(InvalidId {
            reason: "must not contain control characters",
        });
    }

    Ok(Arc::from(trimmed))
}

/// A validated station identifier.
///
/// Stable for the lifetime of a network snapshot. Cheap to clone (shared
/// allocation), with a total order so query results can be tie-broken
/// deterministically.
///
/// # Examples
///
/// ```
/// use masarak_server::domain::StationId;
///
/// let id = StationId::parse("ساحة الأمويين").unwrap();
/// assert_eq!(id.as_str(), "ساحة الأمويين");
///
/// // Surrounding whitespace is trimmed
/// assert_eq!(StationId::parse("  المزة ").unwrap().as_str(), "المزة");
///
/// // Empty names are rejected
/// assert!(StationId::parse("   ").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationId(Arc<str>);

impl StationId {
    /// Parse a station identifier from a string.
    ///
    /// The input is trimmed; it must be non-empty, at most 100 bytes, and
    /// free of control characters.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        parse_id(s).map(StationId)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.as_str())
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated route identifier. Same rules as [`StationId`].
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(Arc<str>);

impl RouteId {
    /// Parse a route identifier from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidId> {
        parse_id(s).map(RouteId)
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.as_str())
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid() {
        assert!(StationId::parse("ساحة الأمويين").is_ok());
        assert!(StationId::parse("bab-touma").is_ok());
        assert!(RouteId::parse("خط المزة جبل").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let id = StationId::parse("  وسط البلد  ").unwrap();
        assert_eq!(id.as_str(), "وسط البلد");
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
        assert!(StationId::parse("   ").is_err());
        assert!(RouteId::parse("\t\n").is_err());
    }

    #[test]
    fn reject_control_chars() {
        assert!(StationId::parse("bad\u{0007}name").is_err());
    }

    #[test]
    fn reject_too_long() {
        let long = "م".repeat(60); // 120 bytes of UTF-8
        assert!(StationId::parse(&long).is_err());
    }

    #[test]
    fn equality_and_hash() {
        use std::collections::HashSet;
        let a = StationId::parse("المزة").unwrap();
        let b = StationId::parse(" المزة ").unwrap();
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn ordering_is_lexicographic() {
        let a = RouteId::parse("a").unwrap();
        let b = RouteId::parse("b").unwrap();
        assert!(a < b);
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("المزة").unwrap();
        assert_eq!(format!("{id}"), "المزة");
        assert_eq!(format!("{id:?}"), "StationId(المزة)");
    }
}
