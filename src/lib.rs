//! # flowmap-engine
//!
//! Risk-aware transaction aggregation and geographic flow map layout engine.
//!
//! Given a set of financial transactions between a company hub and
//! counterparty countries, this engine groups them by counterparty and
//! direction, applies a sanctioned-country risk override with worst-case
//! aggregation, and lays out one drawable edge per flow: straight lines
//! where a single direction exists, opposing Bezier curves where both do.
//! It also produces the aggregate risk report and analyst prompt handed
//! to an external narrative-generation service.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: countries, risk levels, transactions
//! - **aggregation** — Single-pass flow grouping and summary statistics
//! - **layout** — Centroid index, planar geometry, flow edge building
//! - **report** — Narrative prompt construction for the text collaborator

pub mod aggregation;
pub mod core;
pub mod layout;
pub mod report;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::aggregation::flows::{aggregate_flows, FlowAggregation, FlowGroup, FlowKey};
    pub use crate::aggregation::summary::RiskReport;
    pub use crate::core::country::Country;
    pub use crate::core::risk::RiskLevel;
    pub use crate::core::transaction::{Direction, Transaction, TransactionSet};
    pub use crate::layout::builder::EdgeBuilder;
    pub use crate::layout::centroids::CentroidIndex;
    pub use crate::layout::edge::FlowEdge;
    pub use crate::layout::geometry::GeoPoint;
    pub use crate::report::narrative::NarrativePrompt;
}
