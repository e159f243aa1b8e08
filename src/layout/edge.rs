use crate::core::country::Country;
use crate::core::risk::RiskLevel;
use crate::core::transaction::Direction;
use crate::layout::geometry::GeoPoint;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One drawable flow between the hub and a counterparty country.
///
/// The path always starts at the hub coordinate and ends at the
/// counterparty centroid; a straight flow has exactly two points, a
/// curved one is a sampled Bezier. Style attributes (color, dash,
/// tooltip) are present on every edge, straight or curved, and are
/// consumed verbatim by the map renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEdge {
    counterparty: Country,
    direction: Direction,
    /// Path from the hub (first point) to the counterparty centroid
    /// (last point).
    path: Vec<GeoPoint>,
    /// Aggregate amount over all transactions in this flow.
    amount: Decimal,
    /// Worst effective risk over all transactions in this flow.
    risk: RiskLevel,
    color: String,
    dash_pattern: Option<String>,
    tooltip: String,
}

impl FlowEdge {
    pub(crate) fn new(
        counterparty: Country,
        direction: Direction,
        path: Vec<GeoPoint>,
        amount: Decimal,
        risk: RiskLevel,
    ) -> Self {
        debug_assert!(path.len() >= 2, "flow path needs both endpoints");
        let tooltip = format!(
            "Type: {}<br>Amount: {:.2}<br>Risk: {}",
            direction,
            amount.round_dp(2),
            risk
        );
        Self {
            counterparty,
            direction,
            path,
            amount,
            risk,
            color: risk.color().to_string(),
            dash_pattern: direction.dash_pattern().map(str::to_string),
            tooltip,
        }
    }

    pub fn counterparty(&self) -> &Country {
        &self.counterparty
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn path(&self) -> &[GeoPoint] {
        &self.path
    }

    /// First path point; always the hub coordinate.
    pub fn hub_end(&self) -> GeoPoint {
        self.path[0]
    }

    /// Last path point; always the counterparty centroid.
    pub fn counterparty_end(&self) -> GeoPoint {
        self.path[self.path.len() - 1]
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn risk(&self) -> RiskLevel {
        self.risk
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn dash_pattern(&self) -> Option<&str> {
        self.dash_pattern.as_deref()
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    /// Whether this edge was laid out as a curve rather than a straight
    /// segment.
    pub fn curved(&self) -> bool {
        self.path.len() > 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_style_attributes() {
        let edge = FlowEdge::new(
            Country::new("France"),
            Direction::Payment,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0)],
            dec!(1234.5),
            RiskLevel::Medium,
        );
        assert_eq!(edge.color(), "orange");
        assert_eq!(edge.dash_pattern(), Some("5,10"));
        assert_eq!(
            edge.tooltip(),
            "Type: Payment<br>Amount: 1234.50<br>Risk: Medium"
        );
        assert!(!edge.curved());
    }

    #[test]
    fn test_receipt_is_solid() {
        let edge = FlowEdge::new(
            Country::new("France"),
            Direction::Receipt,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0)],
            dec!(10),
            RiskLevel::Low,
        );
        assert_eq!(edge.dash_pattern(), None);
        assert_eq!(edge.color(), "green");
    }

    #[test]
    fn test_endpoint_accessors() {
        let hub = GeoPoint::new(51.5, -0.12);
        let far = GeoPoint::new(46.2, 2.2);
        let edge = FlowEdge::new(
            Country::new("France"),
            Direction::Receipt,
            vec![hub, far],
            dec!(10),
            RiskLevel::Low,
        );
        assert_eq!(edge.hub_end(), hub);
        assert_eq!(edge.counterparty_end(), far);
    }
}
