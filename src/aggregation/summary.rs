use crate::core::risk::RiskLevel;
use crate::core::transaction::TransactionSet;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Sum and count of a slice of the dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub total_amount: Decimal,
    pub transaction_count: usize,
}

impl AmountBreakdown {
    fn absorb(&mut self, amount: Decimal) {
        self.total_amount += amount;
        self.transaction_count += 1;
    }
}

/// Aggregate statistics over a transaction set, computed once per run.
///
/// This is the structured input handed to the narrative collaborator:
/// overall volumes, a per-risk breakdown (after the sanctioned-country
/// override), a per-business-nature breakdown, and the high-risk exposure
/// slice.
///
/// # Examples
///
/// ```
/// use flowmap_engine::aggregation::summary::RiskReport;
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::risk::RiskLevel;
/// use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
/// use rust_decimal_macros::dec;
///
/// let mut set = TransactionSet::new();
/// set.add(Transaction::new(
///     Country::new("Iran"),
///     Country::new("United Kingdom"),
///     Direction::Receipt,
///     dec!(100),
///     RiskLevel::Low,
/// ));
///
/// let report = RiskReport::from_transactions(&set);
/// assert_eq!(report.high_risk().transaction_count, 1);
/// assert_eq!(report.high_risk().total_amount, dec!(100));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    transaction_count: usize,
    total_amount: Decimal,
    receipts_total: Decimal,
    payments_total: Decimal,
    /// Breakdown by effective risk level.
    risk_breakdown: BTreeMap<RiskLevel, AmountBreakdown>,
    /// Breakdown by third-party business nature, where known.
    business_breakdown: BTreeMap<String, AmountBreakdown>,
}

impl RiskReport {
    /// Compute the report in a single pass over the set.
    pub fn from_transactions(set: &TransactionSet) -> Self {
        let mut risk_breakdown: BTreeMap<RiskLevel, AmountBreakdown> = BTreeMap::new();
        let mut business_breakdown: BTreeMap<String, AmountBreakdown> = BTreeMap::new();

        for txn in set.transactions() {
            risk_breakdown
                .entry(txn.effective_risk())
                .or_default()
                .absorb(txn.amount());
            if let Some(nature) = txn.business_nature() {
                business_breakdown
                    .entry(nature.to_string())
                    .or_default()
                    .absorb(txn.amount());
            }
        }

        Self {
            transaction_count: set.len(),
            total_amount: set.gross_total(),
            receipts_total: set.receipts_total(),
            payments_total: set.payments_total(),
            risk_breakdown,
            business_breakdown,
        }
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn receipts_total(&self) -> Decimal {
        self.receipts_total
    }

    pub fn payments_total(&self) -> Decimal {
        self.payments_total
    }

    /// Breakdown for one effective risk level.
    pub fn risk_slice(&self, level: RiskLevel) -> AmountBreakdown {
        self.risk_breakdown.get(&level).copied().unwrap_or_default()
    }

    /// All effective-risk slices present, ascending by severity.
    pub fn risk_breakdown(&self) -> &BTreeMap<RiskLevel, AmountBreakdown> {
        &self.risk_breakdown
    }

    /// Breakdown by third-party business nature.
    pub fn business_breakdown(&self) -> &BTreeMap<String, AmountBreakdown> {
        &self.business_breakdown
    }

    /// Exposure with effective risk High. With the sanctioned-country
    /// override applied, this slice contains every transaction touching
    /// a sanctioned country plus any declared-High remainder.
    pub fn high_risk(&self) -> AmountBreakdown {
        self.risk_slice(RiskLevel::High)
    }
}

impl fmt::Display for RiskReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Transaction Risk Report ===")?;
        writeln!(f, "Transactions:   {}", self.transaction_count)?;
        writeln!(f, "Total Amount:   {:.2}", self.total_amount)?;
        writeln!(f, "Receipts Total: {:.2}", self.receipts_total)?;
        writeln!(f, "Payments Total: {:.2}", self.payments_total)?;

        writeln!(f, "\n--- By Risk ---")?;
        for (level, slice) in &self.risk_breakdown {
            writeln!(
                f,
                "  {:<8} {:>14.2}  ({} txns)",
                level.to_string(),
                slice.total_amount,
                slice.transaction_count
            )?;
        }

        if !self.business_breakdown.is_empty() {
            writeln!(f, "\n--- By Business Nature ---")?;
            for (nature, slice) in &self.business_breakdown {
                writeln!(
                    f,
                    "  {:<24} {:>14.2}  ({} txns)",
                    nature, slice.total_amount, slice.transaction_count
                )?;
            }
        }

        let high = self.high_risk();
        writeln!(f, "\n--- High Risk Exposure ---")?;
        writeln!(f, "  Count:  {}", high.transaction_count)?;
        writeln!(f, "  Amount: {:.2}", high.total_amount)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::country::Country;
    use crate::core::transaction::{Direction, Transaction};
    use rust_decimal_macros::dec;

    fn sample_set() -> TransactionSet {
        let mut set = TransactionSet::new();
        set.add(
            Transaction::new(
                Country::new("France"),
                Country::new("United Kingdom"),
                Direction::Receipt,
                dec!(1000),
                RiskLevel::Low,
            )
            .with_business_nature("Consulting"),
        );
        set.add(
            Transaction::new(
                Country::new("United Kingdom"),
                Country::new("Japan"),
                Direction::Payment,
                dec!(400),
                RiskLevel::Medium,
            )
            .with_business_nature("Shipping"),
        );
        set.add(
            Transaction::new(
                Country::new("Iran"),
                Country::new("United Kingdom"),
                Direction::Receipt,
                dec!(600),
                RiskLevel::Low,
            )
            .with_business_nature("Consulting"),
        );
        set
    }

    #[test]
    fn test_totals() {
        let report = RiskReport::from_transactions(&sample_set());
        assert_eq!(report.transaction_count(), 3);
        assert_eq!(report.total_amount(), dec!(2000));
        assert_eq!(report.receipts_total(), dec!(1600));
        assert_eq!(report.payments_total(), dec!(400));
    }

    #[test]
    fn test_risk_breakdown_uses_effective_risk() {
        let report = RiskReport::from_transactions(&sample_set());
        // The Iran receipt is declared Low but reclassified High.
        assert_eq!(report.risk_slice(RiskLevel::Low).total_amount, dec!(1000));
        assert_eq!(report.risk_slice(RiskLevel::Medium).total_amount, dec!(400));
        assert_eq!(report.risk_slice(RiskLevel::High).total_amount, dec!(600));
    }

    #[test]
    fn test_high_risk_exposure() {
        let report = RiskReport::from_transactions(&sample_set());
        let high = report.high_risk();
        assert_eq!(high.transaction_count, 1);
        assert_eq!(high.total_amount, dec!(600));
    }

    #[test]
    fn test_business_breakdown() {
        let report = RiskReport::from_transactions(&sample_set());
        let consulting = &report.business_breakdown()["Consulting"];
        assert_eq!(consulting.transaction_count, 2);
        assert_eq!(consulting.total_amount, dec!(1600));
    }

    #[test]
    fn test_empty_set() {
        let report = RiskReport::from_transactions(&TransactionSet::new());
        assert_eq!(report.transaction_count(), 0);
        assert_eq!(report.total_amount(), Decimal::ZERO);
        assert_eq!(report.high_risk(), AmountBreakdown::default());
    }

    #[test]
    fn test_display_mentions_sections() {
        let report = RiskReport::from_transactions(&sample_set());
        let text = report.to_string();
        assert!(text.contains("By Risk"));
        assert!(text.contains("High Risk Exposure"));
        assert!(text.contains("Consulting"));
    }
}
