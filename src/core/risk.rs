use crate::core::country::Country;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Financial crime risk level attached to a transaction.
///
/// The three levels form a total order by severity: `Low < Medium < High`.
/// This ordering drives both the sanctioned-country override (anything
/// touching a sanctioned country is promoted to `High`) and worst-case
/// aggregation across a group of transactions.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::risk::RiskLevel;
///
/// assert!(RiskLevel::Low < RiskLevel::High);
/// assert_eq!(RiskLevel::Medium.rank(), 2);
/// assert_eq!(RiskLevel::High.color(), "red");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Line color applied to flows that carry no risk information.
pub const DEFAULT_COLOR: &str = "blue";

impl RiskLevel {
    /// Severity rank: Low = 1, Medium = 2, High = 3.
    pub fn rank(&self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Map line color for this risk level.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "orange",
            RiskLevel::High => "red",
        }
    }

    /// All levels in ascending severity order.
    pub fn all() -> [RiskLevel; 3] {
        [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High]
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        write!(f, "{}", label)
    }
}

/// Error raised when a risk label cannot be parsed.
#[derive(Debug, Error)]
#[error("unknown risk label '{0}', expected Low, Medium or High")]
pub struct RiskParseError(pub String);

impl FromStr for RiskLevel {
    type Err = RiskParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(RiskParseError(other.to_string())),
        }
    }
}

/// Countries under financial sanctions, considered high risk for
/// financial crime regardless of the declared transaction risk.
pub const SANCTIONED_COUNTRIES: [&str; 15] = [
    "Afghanistan",
    "Belarus",
    "Burma",
    "Cuba",
    "North Korea",
    "Iran",
    "Iraq",
    "Libya",
    "Russia",
    "South Sudan",
    "Sudan",
    "Syria",
    "Ukraine",
    "Venezuela",
    "Yemen",
];

/// Whether a country is on the sanctions list (case-insensitive).
pub fn is_sanctioned(country: &Country) -> bool {
    SANCTIONED_COUNTRIES
        .iter()
        .any(|name| country.matches_ignore_case(name))
}

/// Apply the sanctioned-country override to a declared risk level.
///
/// If either endpoint of the transaction is a sanctioned country the
/// effective risk is `High`; otherwise the declared level stands.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::risk::{reclassify, RiskLevel};
///
/// let risk = reclassify(
///     RiskLevel::Low,
///     &Country::new("Iran"),
///     &Country::new("United Kingdom"),
/// );
/// assert_eq!(risk, RiskLevel::High);
/// ```
pub fn reclassify(declared: RiskLevel, origin: &Country, destination: &Country) -> RiskLevel {
    if is_sanctioned(origin) || is_sanctioned(destination) {
        RiskLevel::High
    } else {
        declared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(RiskLevel::Low < RiskLevel::Medium);
        assert!(RiskLevel::Medium < RiskLevel::High);
        assert_eq!(
            RiskLevel::all().map(|r| r.rank()),
            [1, 2, 3],
        );
    }

    #[test]
    fn test_colors() {
        assert_eq!(RiskLevel::Low.color(), "green");
        assert_eq!(RiskLevel::Medium.color(), "orange");
        assert_eq!(RiskLevel::High.color(), "red");
    }

    #[test]
    fn test_parse_round_trip() {
        for level in RiskLevel::all() {
            let parsed: RiskLevel = level.to_string().parse().unwrap();
            assert_eq!(parsed, level);
        }
    }

    #[test]
    fn test_parse_unknown_label() {
        let err = "Severe".parse::<RiskLevel>().unwrap_err();
        assert!(err.to_string().contains("Severe"));
    }

    #[test]
    fn test_sanctioned_membership() {
        assert!(is_sanctioned(&Country::new("Iran")));
        assert!(is_sanctioned(&Country::new("north korea")));
        assert!(!is_sanctioned(&Country::new("France")));
    }

    #[test]
    fn test_reclassify_sanctioned_origin() {
        let risk = reclassify(
            RiskLevel::Low,
            &Country::new("Russia"),
            &Country::new("Germany"),
        );
        assert_eq!(risk, RiskLevel::High);
    }

    #[test]
    fn test_reclassify_sanctioned_destination() {
        let risk = reclassify(
            RiskLevel::Medium,
            &Country::new("Japan"),
            &Country::new("Syria"),
        );
        assert_eq!(risk, RiskLevel::High);
    }

    #[test]
    fn test_reclassify_clean_pair_unchanged() {
        for level in RiskLevel::all() {
            let risk = reclassify(level, &Country::new("France"), &Country::new("Japan"));
            assert_eq!(risk, level);
        }
    }
}
