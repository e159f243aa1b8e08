use crate::core::country::Country;
use crate::core::risk::{reclassify, RiskLevel};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Direction of a transaction relative to the hub company.
///
/// A `Receipt` is money flowing in (the external counterparty is the
/// origin country); a `Payment` is money flowing out (the counterparty
/// is the destination country). The direction also decides how the flow
/// is drawn: which side a curved edge bows to and whether the line is
/// solid or dashed.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::transaction::Direction;
///
/// let origin = Country::new("France");
/// let destination = Country::new("United Kingdom");
/// assert_eq!(
///     Direction::Receipt.counterparty(&origin, &destination),
///     &origin,
/// );
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Direction {
    Receipt,
    Payment,
}

impl Direction {
    /// The external counterparty of a transaction in this direction.
    ///
    /// Receipts come from the origin country; payments go to the
    /// destination country.
    pub fn counterparty<'a>(&self, origin: &'a Country, destination: &'a Country) -> &'a Country {
        match self {
            Direction::Receipt => origin,
            Direction::Payment => destination,
        }
    }

    /// Sign of the perpendicular midpoint displacement when both
    /// directions are drawn for the same counterparty: receipts bow one
    /// way, payments the other.
    pub fn offset_sign(&self) -> f64 {
        match self {
            Direction::Receipt => 1.0,
            Direction::Payment => -1.0,
        }
    }

    /// SVG-style dash pattern: receipts are solid, payments dashed.
    pub fn dash_pattern(&self) -> Option<&'static str> {
        match self {
            Direction::Receipt => None,
            Direction::Payment => Some("5,10"),
        }
    }

    pub fn all() -> [Direction; 2] {
        [Direction::Receipt, Direction::Payment]
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::Receipt => "Receipt",
            Direction::Payment => "Payment",
        };
        write!(f, "{}", label)
    }
}

/// Error raised when a direction label cannot be parsed.
#[derive(Debug, Error)]
#[error("unknown direction '{0}', expected Receipt or Payment")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Receipt" => Ok(Direction::Receipt),
            "Payment" => Ok(Direction::Payment),
            other => Err(DirectionParseError(other.to_string())),
        }
    }
}

/// A single financial transaction between the hub company and the world.
///
/// Transactions are immutable once loaded. The engine operates on
/// collections of transactions to compute aggregate flows and risk.
///
/// # Examples
///
/// ```
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::risk::RiskLevel;
/// use flowmap_engine::core::transaction::{Direction, Transaction};
/// use rust_decimal_macros::dec;
///
/// let txn = Transaction::new(
///     Country::new("Iran"),
///     Country::new("United Kingdom"),
///     Direction::Receipt,
///     dec!(100),
///     RiskLevel::Low,
/// );
///
/// // Sanctioned origin promotes the effective risk.
/// assert_eq!(txn.effective_risk(), RiskLevel::High);
/// assert_eq!(txn.counterparty().as_str(), "Iran");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier for this transaction.
    id: Uuid,
    /// Country the money came from.
    origin: Country,
    /// Country the money went to.
    destination: Country,
    /// Receipt or payment, relative to the hub.
    direction: Direction,
    /// The amount transferred. Must be positive.
    amount: Decimal,
    /// Risk level as declared in the source data.
    declared_risk: RiskLevel,
    /// Optional value date.
    date: Option<NaiveDate>,
    /// Optional nature of the third party's business.
    business_nature: Option<String>,
}

impl Transaction {
    /// Create a new transaction.
    ///
    /// # Panics
    ///
    /// Panics if `amount` is not positive.
    pub fn new(
        origin: Country,
        destination: Country,
        direction: Direction,
        amount: Decimal,
        declared_risk: RiskLevel,
    ) -> Self {
        assert!(
            amount > Decimal::ZERO,
            "Transaction amount must be positive, got {}",
            amount
        );
        Self {
            id: Uuid::new_v4(),
            origin,
            destination,
            direction,
            amount,
            declared_risk,
            date: None,
            business_nature: None,
        }
    }

    /// Create a transaction with a specific ID (useful for testing / determinism).
    pub fn with_id(
        id: Uuid,
        origin: Country,
        destination: Country,
        direction: Direction,
        amount: Decimal,
        declared_risk: RiskLevel,
    ) -> Self {
        assert!(amount > Decimal::ZERO);
        Self {
            id,
            origin,
            destination,
            direction,
            amount,
            declared_risk,
            date: None,
            business_nature: None,
        }
    }

    /// Set the value date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the third-party business nature.
    pub fn with_business_nature(mut self, nature: impl Into<String>) -> Self {
        self.business_nature = Some(nature.into());
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn origin(&self) -> &Country {
        &self.origin
    }

    pub fn destination(&self) -> &Country {
        &self.destination
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn declared_risk(&self) -> RiskLevel {
        self.declared_risk
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn business_nature(&self) -> Option<&str> {
        self.business_nature.as_deref()
    }

    /// The external counterparty country of this transaction.
    pub fn counterparty(&self) -> &Country {
        self.direction.counterparty(&self.origin, &self.destination)
    }

    /// Declared risk with the sanctioned-country override applied.
    pub fn effective_risk(&self) -> RiskLevel {
        reclassify(self.declared_risk, &self.origin, &self.destination)
    }
}

/// A collection of transactions loaded for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
}

impl TransactionSet {
    pub fn new() -> Self {
        Self {
            transactions: Vec::new(),
        }
    }

    pub fn add(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Total value of all transactions regardless of direction.
    pub fn gross_total(&self) -> Decimal {
        self.transactions.iter().map(|t| t.amount()).sum()
    }

    /// Total value of all receipts.
    pub fn receipts_total(&self) -> Decimal {
        self.total_for(Direction::Receipt)
    }

    /// Total value of all payments.
    pub fn payments_total(&self) -> Decimal {
        self.total_for(Direction::Payment)
    }

    fn total_for(&self, direction: Direction) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.direction() == direction)
            .map(|t| t.amount())
            .sum()
    }

    /// All unique counterparty countries, sorted.
    pub fn counterparties(&self) -> Vec<Country> {
        let mut countries: Vec<Country> = self
            .transactions
            .iter()
            .map(|t| t.counterparty().clone())
            .collect();
        countries.sort();
        countries.dedup();
        countries
    }
}

impl FromIterator<Transaction> for TransactionSet {
    fn from_iter<T: IntoIterator<Item = Transaction>>(iter: T) -> Self {
        Self {
            transactions: iter.into_iter().collect(),
        }
    }
}
