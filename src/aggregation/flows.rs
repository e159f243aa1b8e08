use crate::core::country::Country;
use crate::core::risk::RiskLevel;
use crate::core::transaction::{Direction, Transaction, TransactionSet};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Grouping key for aggregate flows: one external counterparty country
/// in one direction.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FlowKey {
    pub counterparty: Country,
    pub direction: Direction,
}

impl FlowKey {
    pub fn new(counterparty: Country, direction: Direction) -> Self {
        Self {
            counterparty,
            direction,
        }
    }

    /// Key for a single transaction.
    pub fn of(transaction: &Transaction) -> Self {
        Self::new(transaction.counterparty().clone(), transaction.direction())
    }
}

/// Aggregate of all transactions sharing a [`FlowKey`]: summed amount and
/// the worst effective risk seen in the group.
///
/// Groups are built by [`aggregate_flows`] and are non-empty by
/// construction; an empty group is a precondition violation upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowGroup {
    key: FlowKey,
    total_amount: Decimal,
    worst_risk: RiskLevel,
    transaction_count: usize,
}

impl FlowGroup {
    fn from_transaction(transaction: &Transaction) -> Self {
        Self {
            key: FlowKey::of(transaction),
            total_amount: transaction.amount(),
            worst_risk: transaction.effective_risk(),
            transaction_count: 1,
        }
    }

    fn absorb(&mut self, transaction: &Transaction) {
        self.total_amount += transaction.amount();
        // Worst-case aggregation: severity ranks are unique per level,
        // so max is the single highest label present.
        self.worst_risk = self.worst_risk.max(transaction.effective_risk());
        self.transaction_count += 1;
    }

    pub fn key(&self) -> &FlowKey {
        &self.key
    }

    pub fn counterparty(&self) -> &Country {
        &self.key.counterparty
    }

    pub fn direction(&self) -> Direction {
        self.key.direction
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn worst_risk(&self) -> RiskLevel {
        self.worst_risk
    }

    pub fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

/// Result of grouping a transaction set by (counterparty, direction).
///
/// Iteration order is deterministic: counterparties alphabetically, and
/// within a counterparty, Receipt before Payment.
#[derive(Debug, Clone, Default)]
pub struct FlowAggregation {
    groups: BTreeMap<FlowKey, FlowGroup>,
}

impl FlowAggregation {
    /// Number of (counterparty, direction) groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up the group for a specific counterparty and direction.
    pub fn get(&self, counterparty: &Country, direction: Direction) -> Option<&FlowGroup> {
        self.groups
            .get(&FlowKey::new(counterparty.clone(), direction))
    }

    /// All groups in deterministic key order.
    pub fn groups(&self) -> impl Iterator<Item = &FlowGroup> {
        self.groups.values()
    }

    /// Groups clustered per counterparty, each cluster holding every
    /// direction-variant present for that country. A cluster of size two
    /// means both a receipt and a payment flow exist and their edges must
    /// bow apart.
    pub fn by_counterparty(&self) -> Vec<(&Country, Vec<&FlowGroup>)> {
        let mut clusters: Vec<(&Country, Vec<&FlowGroup>)> = Vec::new();
        for group in self.groups.values() {
            let starts_new = match clusters.last() {
                Some((country, _)) => *country != group.counterparty(),
                None => true,
            };
            if starts_new {
                clusters.push((group.counterparty(), Vec::new()));
            }
            if let Some((_, variants)) = clusters.last_mut() {
                variants.push(group);
            }
        }
        clusters
    }

    /// Total amount across all groups.
    pub fn total_amount(&self) -> Decimal {
        self.groups.values().map(|g| g.total_amount()).sum()
    }
}

/// Group a transaction set by (counterparty, direction) in a single pass,
/// summing amounts and keeping the worst effective risk per group.
///
/// # Examples
///
/// ```
/// use flowmap_engine::aggregation::flows::aggregate_flows;
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::risk::RiskLevel;
/// use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
/// use rust_decimal_macros::dec;
///
/// let mut set = TransactionSet::new();
/// set.add(Transaction::new(
///     Country::new("France"),
///     Country::new("United Kingdom"),
///     Direction::Receipt,
///     dec!(100),
///     RiskLevel::Low,
/// ));
/// set.add(Transaction::new(
///     Country::new("France"),
///     Country::new("United Kingdom"),
///     Direction::Receipt,
///     dec!(50),
///     RiskLevel::Medium,
/// ));
///
/// let flows = aggregate_flows(&set);
/// let group = flows.get(&Country::new("France"), Direction::Receipt).unwrap();
/// assert_eq!(group.total_amount(), dec!(150));
/// assert_eq!(group.worst_risk(), RiskLevel::Medium);
/// ```
pub fn aggregate_flows(set: &TransactionSet) -> FlowAggregation {
    let mut groups: BTreeMap<FlowKey, FlowGroup> = BTreeMap::new();
    for transaction in set.transactions() {
        groups
            .entry(FlowKey::of(transaction))
            .and_modify(|group| group.absorb(transaction))
            .or_insert_with(|| FlowGroup::from_transaction(transaction));
    }
    for group in groups.values() {
        debug_assert!(group.transaction_count() > 0, "empty flow group");
    }
    FlowAggregation { groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn txn(
        origin: &str,
        destination: &str,
        direction: Direction,
        amount: Decimal,
        risk: RiskLevel,
    ) -> Transaction {
        Transaction::new(
            Country::new(origin),
            Country::new(destination),
            direction,
            amount,
            risk,
        )
    }

    #[test]
    fn test_groups_sum_amounts() {
        let mut set = TransactionSet::new();
        set.add(txn("France", "UK", Direction::Receipt, dec!(100), RiskLevel::Low));
        set.add(txn("France", "UK", Direction::Receipt, dec!(200), RiskLevel::Low));
        set.add(txn("UK", "France", Direction::Payment, dec!(50), RiskLevel::Low));

        let flows = aggregate_flows(&set);
        assert_eq!(flows.len(), 2);

        let receipts = flows
            .get(&Country::new("France"), Direction::Receipt)
            .unwrap();
        assert_eq!(receipts.total_amount(), dec!(300));
        assert_eq!(receipts.transaction_count(), 2);

        let payments = flows
            .get(&Country::new("France"), Direction::Payment)
            .unwrap();
        assert_eq!(payments.total_amount(), dec!(50));
    }

    #[test]
    fn test_worst_risk_takes_maximum() {
        let mut set = TransactionSet::new();
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Low));
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Medium));

        let flows = aggregate_flows(&set);
        let group = flows
            .get(&Country::new("France"), Direction::Receipt)
            .unwrap();
        assert_eq!(group.worst_risk(), RiskLevel::Medium);
    }

    #[test]
    fn test_worst_risk_high_dominates() {
        let mut set = TransactionSet::new();
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Low));
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Low));
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::High));

        let flows = aggregate_flows(&set);
        let group = flows
            .get(&Country::new("France"), Direction::Receipt)
            .unwrap();
        assert_eq!(group.worst_risk(), RiskLevel::High);
    }

    #[test]
    fn test_sanctioned_override_feeds_aggregation() {
        let mut set = TransactionSet::new();
        set.add(txn("Iran", "UK", Direction::Receipt, dec!(100), RiskLevel::Low));

        let flows = aggregate_flows(&set);
        let group = flows.get(&Country::new("Iran"), Direction::Receipt).unwrap();
        assert_eq!(group.worst_risk(), RiskLevel::High);
    }

    #[test]
    fn test_by_counterparty_clusters_directions() {
        let mut set = TransactionSet::new();
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Low));
        set.add(txn("UK", "France", Direction::Payment, dec!(20), RiskLevel::Low));
        set.add(txn("UK", "Japan", Direction::Payment, dec!(30), RiskLevel::Low));

        let flows = aggregate_flows(&set);
        let clusters = flows.by_counterparty();
        assert_eq!(clusters.len(), 2);

        let (france, variants) = &clusters[0];
        assert_eq!(france.as_str(), "France");
        assert_eq!(variants.len(), 2);

        let (japan, variants) = &clusters[1];
        assert_eq!(japan.as_str(), "Japan");
        assert_eq!(variants.len(), 1);
    }

    #[test]
    fn test_empty_set_yields_empty_aggregation() {
        let flows = aggregate_flows(&TransactionSet::new());
        assert!(flows.is_empty());
        assert_eq!(flows.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn test_total_matches_set_gross() {
        let mut set = TransactionSet::new();
        set.add(txn("France", "UK", Direction::Receipt, dec!(10), RiskLevel::Low));
        set.add(txn("UK", "Japan", Direction::Payment, dec!(35), RiskLevel::Medium));

        let flows = aggregate_flows(&set);
        assert_eq!(flows.total_amount(), set.gross_total());
    }
}
