use serde::{Deserialize, Serialize};
use std::fmt;

/// A country name as it appears in transaction data.
///
/// Country names are the join key between transaction records and the
/// geographic centroid reference set, and the two sources do not always
/// agree on capitalization. Equality and hashing are exact; use
/// [`Country::matches_ignore_case`] when resolving against reference data.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::country::Country;
///
/// let france = Country::new("France");
/// assert!(france.matches_ignore_case("FRANCE"));
/// assert_ne!(france, Country::new("Japan"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Country(String);

impl Country {
    /// Create a new country name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the string representation of this country name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive comparison against another name.
    pub fn matches_ignore_case(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Country {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_equality() {
        let a = Country::new("France");
        let b = Country::new("France");
        let c = Country::new("Japan");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_country_display() {
        let c = Country::new("United Kingdom");
        assert_eq!(format!("{}", c), "United Kingdom");
    }

    #[test]
    fn test_case_insensitive_match() {
        let c = Country::new("North Korea");
        assert!(c.matches_ignore_case("north korea"));
        assert!(c.matches_ignore_case("NORTH KOREA"));
        assert!(!c.matches_ignore_case("South Korea"));
    }

    #[test]
    fn test_exact_equality_is_case_sensitive() {
        assert_ne!(Country::new("france"), Country::new("France"));
    }
}
