//! Sanctions override and narrative report example.
//!
//! Demonstrates how declared risk levels are promoted for transactions
//! touching sanctioned countries, and how the aggregate report feeds
//! the analyst prompt.

use flowmap_engine::aggregation::summary::RiskReport;
use flowmap_engine::core::country::Country;
use flowmap_engine::core::risk::RiskLevel;
use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
use flowmap_engine::report::narrative::NarrativePrompt;
use rust_decimal_macros::dec;

fn main() {
    println!("╔═══════════════════════════════════════════════╗");
    println!("║  flowmap-engine: Sanctions & Report Example   ║");
    println!("╚═══════════════════════════════════════════════╝\n");

    let uk = Country::new("United Kingdom");

    let mut set = TransactionSet::new();
    set.add(
        Transaction::new(
            Country::new("France"),
            uk.clone(),
            Direction::Receipt,
            dec!(250_000),
            RiskLevel::Low,
        )
        .with_business_nature("Consulting"),
    );
    set.add(
        Transaction::new(
            uk.clone(),
            Country::new("Japan"),
            Direction::Payment,
            dec!(90_000),
            RiskLevel::Medium,
        )
        .with_business_nature("Shipping"),
    );
    // Declared Low, but Iran is sanctioned: promoted to High.
    set.add(
        Transaction::new(
            Country::new("Iran"),
            uk,
            Direction::Receipt,
            dec!(40_000),
            RiskLevel::Low,
        )
        .with_business_nature("Oil Trading"),
    );

    println!("━━━ Per-Transaction Risk ━━━\n");
    for txn in set.transactions() {
        println!(
            "  {:<10} → {:<16} declared: {:<7} effective: {}",
            txn.origin().to_string(),
            txn.destination().to_string(),
            txn.declared_risk().to_string(),
            txn.effective_risk()
        );
    }

    let report = RiskReport::from_transactions(&set);
    println!("\n{}", report);

    let prompt = NarrativePrompt::from_report(&report);
    println!("━━━ Analyst Prompt ━━━\n");
    println!("[system] {}\n", prompt.system_message());
    println!("{}", prompt.user_prompt());
}
