//! Basic flow map layout example.
//!
//! Demonstrates how transactions are grouped per counterparty and
//! direction, and how bidirectional flows become opposing curves.

use flowmap_engine::aggregation::flows::aggregate_flows;
use flowmap_engine::core::country::Country;
use flowmap_engine::core::risk::RiskLevel;
use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
use flowmap_engine::layout::builder::EdgeBuilder;
use flowmap_engine::layout::centroids::CentroidIndex;
use flowmap_engine::layout::geometry::GeoPoint;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  flowmap-engine: Basic Flow Map Example  ║");
    println!("╚══════════════════════════════════════════╝\n");

    // --- Transactions around a UK hub ---
    let mut set = TransactionSet::new();
    let uk = Country::new("United Kingdom");
    let france = Country::new("France");
    let japan = Country::new("Japan");

    // France trades both ways, so its two flows must curve apart.
    set.add(Transaction::new(
        france.clone(),
        uk.clone(),
        Direction::Receipt,
        dec!(1_200_000),
        RiskLevel::Low,
    ));
    set.add(Transaction::new(
        uk.clone(),
        france.clone(),
        Direction::Payment,
        dec!(450_000),
        RiskLevel::Medium,
    ));
    // Japan only receives payments: one straight line.
    set.add(Transaction::new(
        uk.clone(),
        japan.clone(),
        Direction::Payment,
        dec!(300_000),
        RiskLevel::Low,
    ));

    // --- Aggregate ---
    println!("━━━ Aggregated Flows ━━━\n");
    let flows = aggregate_flows(&set);
    for group in flows.groups() {
        println!(
            "  {:<10} {:<8} {:>12}  worst risk: {}",
            group.counterparty().to_string(),
            group.direction().to_string(),
            group.total_amount().to_string(),
            group.worst_risk()
        );
    }

    // --- Lay out edges ---
    let mut centroids = CentroidIndex::new();
    centroids.insert(uk, GeoPoint::new(54.0, -2.0));
    centroids.insert(france, GeoPoint::new(46.2, 2.2));
    centroids.insert(japan, GeoPoint::new(36.2, 138.2));

    let builder = EdgeBuilder::with_default_hub(centroids);
    let edges = builder.build(&flows);

    println!("\n━━━ Edges (hub at {}) ━━━\n", builder.hub());
    for edge in &edges {
        println!(
            "  {:<10} {:<8} {:<7} {:<8} {} points{}",
            edge.counterparty().to_string(),
            edge.direction().to_string(),
            edge.color(),
            edge.dash_pattern().unwrap_or("solid"),
            edge.path().len(),
            if edge.curved() { " (curved)" } else { "" }
        );
        println!("             tooltip: {}", edge.tooltip());
    }
}
