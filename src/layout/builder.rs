use crate::aggregation::flows::{FlowAggregation, FlowGroup};
use crate::layout::centroids::{CentroidIndex, DEFAULT_HUB_CANDIDATES, LONDON_FALLBACK};
use crate::layout::edge::FlowEdge;
use crate::layout::geometry::{quadratic_bezier, GeoPoint, BEZIER_STEPS};

/// Fraction of the hub-counterparty distance used to displace the
/// midpoint of a curved edge.
pub const OFFSET_RATIO: f64 = 0.1;

/// Turns aggregated flows into drawable edges around a fixed hub.
///
/// For a counterparty with a single flow direction the edge is the
/// straight hub-to-centroid segment. When both a receipt and a payment
/// flow exist for the same counterparty, each edge is bent into a
/// quadratic Bezier whose midpoint is pushed off the straight line, to
/// opposite sides for the two directions, so the flows stay visually
/// distinguishable.
///
/// # Examples
///
/// ```
/// use flowmap_engine::aggregation::flows::aggregate_flows;
/// use flowmap_engine::core::country::Country;
/// use flowmap_engine::core::risk::RiskLevel;
/// use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
/// use flowmap_engine::layout::builder::EdgeBuilder;
/// use flowmap_engine::layout::centroids::CentroidIndex;
/// use flowmap_engine::layout::geometry::GeoPoint;
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
///
/// let mut centroids = CentroidIndex::new();
/// centroids.insert(Country::new("France"), GeoPoint::new(46.2, 2.2));
///
/// let builder = EdgeBuilder::new(GeoPoint::new(51.5, -0.12), centroids);
/// let edges = builder.build(&aggregate_flows(&set));
/// assert_eq!(edges.len(), 1);
/// assert_eq!(edges[0].path().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct EdgeBuilder {
    hub: GeoPoint,
    centroids: CentroidIndex,
    steps: usize,
}

impl EdgeBuilder {
    /// Create a builder with an explicit hub coordinate.
    pub fn new(hub: GeoPoint, centroids: CentroidIndex) -> Self {
        Self {
            hub,
            centroids,
            steps: BEZIER_STEPS,
        }
    }

    /// Create a builder that resolves the hub from the centroid index,
    /// falling back to London when no candidate is present.
    pub fn with_hub_country(centroids: CentroidIndex, hub_country: &str) -> Self {
        let hub = centroids.hub_or_default(&[hub_country], LONDON_FALLBACK);
        Self::new(hub, centroids)
    }

    /// Create a builder with the default hub candidates
    /// ("United Kingdom", then "UK").
    pub fn with_default_hub(centroids: CentroidIndex) -> Self {
        let hub = centroids.hub_or_default(&DEFAULT_HUB_CANDIDATES, LONDON_FALLBACK);
        Self::new(hub, centroids)
    }

    /// Override the Bezier sampling resolution.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn hub(&self) -> GeoPoint {
        self.hub
    }

    /// Build one edge per flow group.
    ///
    /// Counterparties absent from the centroid index are skipped without
    /// error; their groups simply produce no edges.
    pub fn build(&self, flows: &FlowAggregation) -> Vec<FlowEdge> {
        let mut edges = Vec::with_capacity(flows.len());

        for (counterparty, variants) in flows.by_counterparty() {
            let Some(centroid) = self.centroids.resolve(counterparty) else {
                log::debug!("no centroid for '{}', skipping its flows", counterparty);
                continue;
            };

            let distance = self.hub.distance_to(&centroid);
            let use_offset = variants.len() > 1;

            for group in variants {
                edges.push(self.build_edge(group, centroid, distance, use_offset));
            }
        }

        log::info!("laid out {} flow edges", edges.len());
        edges
    }

    fn build_edge(
        &self,
        group: &FlowGroup,
        centroid: GeoPoint,
        distance: f64,
        use_offset: bool,
    ) -> FlowEdge {
        let path = if !use_offset || distance == 0.0 {
            vec![self.hub, centroid]
        } else {
            let perpendicular = self.hub.perpendicular_unit(&centroid);
            let magnitude = group.direction().offset_sign() * distance * OFFSET_RATIO;
            let control = self.hub.midpoint(&centroid).offset_by(perpendicular, magnitude);
            quadratic_bezier(self.hub, control, centroid, self.steps)
        };

        FlowEdge::new(
            group.counterparty().clone(),
            group.direction(),
            path,
            group.total_amount(),
            group.worst_risk(),
        )
    }
}
