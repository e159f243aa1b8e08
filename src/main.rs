//! flowmap-engine CLI
//!
//! Build flow map edges and risk summaries from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Lay out flow edges from transactions + centroids
//! flowmap-engine edges --input txns.json --centroids centroids.json
//!
//! # Output edges as JSON for a map renderer
//! flowmap-engine edges --input txns.json --centroids centroids.json --format json
//!
//! # Aggregate risk report, plus the analyst prompt
//! flowmap-engine summary --input txns.json --prompt
//!
//! # Generate a random transaction set for testing
//! flowmap-engine generate --transactions 50
//! ```

use flowmap_engine::aggregation::flows::aggregate_flows;
use flowmap_engine::aggregation::summary::RiskReport;
use flowmap_engine::core::country::Country;
use flowmap_engine::core::risk::RiskLevel;
use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
use flowmap_engine::layout::builder::EdgeBuilder;
use flowmap_engine::layout::centroids::CentroidIndex;
use flowmap_engine::report::narrative::NarrativePrompt;
use rand::Rng;
use rust_decimal::Decimal;
use std::fs;
use std::process;
use std::str::FromStr;

fn print_usage() {
    eprintln!(
        r#"flowmap-engine — risk-aware transaction aggregation and flow map layout

USAGE:
    flowmap-engine <COMMAND> [OPTIONS]

COMMANDS:
    edges       Lay out one drawable edge per (counterparty, direction) flow
    summary     Aggregate risk report over a transaction set
    generate    Generate a random transaction set (for testing)
    help        Show this message

OPTIONS (edges):
    --input <FILE>      Path to JSON transactions file
    --centroids <FILE>  Path to JSON country-centroid file
    --hub <COUNTRY>     Hub country name (default: United Kingdom, then UK)
    --format <FORMAT>   Output format: text (default) or json
    --output <FILE>     Write to file instead of stdout

OPTIONS (summary):
    --input <FILE>      Path to JSON transactions file
    --format <FORMAT>   Output format: text (default) or json
    --prompt            Also print the rendered analyst prompt

OPTIONS (generate):
    --transactions <N>  Number of transactions (default: 50)
    --countries <LIST>  Comma-separated counterparty countries
    --output <FILE>     Write to file instead of stdout

EXAMPLES:
    flowmap-engine edges --input txns.json --centroids centroids.json
    flowmap-engine summary --input txns.json --format json
    flowmap-engine generate --transactions 100 --countries France,Japan,Iran"#
    );
}

/// JSON schema for input transactions.
#[derive(serde::Deserialize)]
struct TransactionInput {
    origin: String,
    destination: String,
    direction: String,
    amount: String,
    risk: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    business_nature: Option<String>,
}

#[derive(serde::Deserialize)]
struct TransactionsFile {
    transactions: Vec<TransactionInput>,
}

fn load_transactions(path: &str) -> TransactionSet {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    let file: TransactionsFile = serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing JSON: {}", e);
        eprintln!("Expected format:");
        eprintln!(
            r#"{{
  "transactions": [
    {{ "origin": "France", "destination": "United Kingdom",
      "direction": "Receipt", "amount": "1250.00", "risk": "Low" }}
  ]
}}"#
        );
        process::exit(1);
    });

    let mut set = TransactionSet::new();
    for txn in file.transactions {
        let amount: Decimal = txn.amount.parse().unwrap_or_else(|e| {
            eprintln!("Invalid amount '{}': {}", txn.amount, e);
            process::exit(1);
        });
        let direction = Direction::from_str(&txn.direction).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        });
        let risk = RiskLevel::from_str(&txn.risk).unwrap_or_else(|e| {
            eprintln!("{}", e);
            process::exit(1);
        });

        let mut transaction = Transaction::new(
            Country::new(&txn.origin),
            Country::new(&txn.destination),
            direction,
            amount,
            risk,
        );
        if let Some(date_str) = &txn.date {
            let date = date_str.parse().unwrap_or_else(|e| {
                eprintln!("Invalid date '{}': {}", date_str, e);
                process::exit(1);
            });
            transaction = transaction.with_date(date);
        }
        if let Some(nature) = txn.business_nature {
            transaction = transaction.with_business_nature(nature);
        }
        set.add(transaction);
    }
    set
}

fn load_centroids(path: &str) -> CentroidIndex {
    let content = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{}': {}", path, e);
        process::exit(1);
    });

    serde_json::from_str(&content).unwrap_or_else(|e| {
        eprintln!("Error parsing centroids JSON: {}", e);
        eprintln!(r#"Expected format: {{ "France": [46.2, 2.2], ... }}"#);
        process::exit(1);
    })
}

fn write_or_print(output_path: Option<String>, content: &str, what: &str) {
    if let Some(path) = output_path {
        fs::write(&path, content).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Wrote {} → {}", what, path);
    } else {
        println!("{}", content);
    }
}

fn cmd_edges(args: &[String]) {
    let mut input_path = None;
    let mut centroids_path = None;
    let mut hub_country: Option<String> = None;
    let mut format = "text".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--centroids" => {
                i += 1;
                centroids_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--centroids requires a file path");
                    process::exit(1);
                }));
            }
            "--hub" => {
                i += 1;
                hub_country = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--hub requires a country name");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let input = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });
    let centroids_file = centroids_path.unwrap_or_else(|| {
        eprintln!("Error: --centroids <FILE> is required");
        process::exit(1);
    });

    let set = load_transactions(&input);
    let centroids = load_centroids(&centroids_file);

    let builder = match &hub_country {
        Some(country) => EdgeBuilder::with_hub_country(centroids, country),
        None => EdgeBuilder::with_default_hub(centroids),
    };

    let flows = aggregate_flows(&set);
    let edges = builder.build(&flows);

    if format == "json" {
        let json = serde_json::to_string_pretty(&edges).unwrap();
        write_or_print(output_path, &json, "edges");
    } else {
        let mut text = format!(
            "Hub: {}\nFlows: {} groups, {} edges\n\n",
            builder.hub(),
            flows.len(),
            edges.len()
        );
        for edge in &edges {
            text.push_str(&format!(
                "{:<20} {:<8} {:>14.2}  {:<6} {:<7} {} points\n",
                edge.counterparty().to_string(),
                edge.direction().to_string(),
                edge.amount(),
                edge.risk().to_string(),
                edge.color(),
                edge.path().len()
            ));
        }
        write_or_print(output_path, text.trim_end(), "edges");
    }
}

fn cmd_summary(args: &[String]) {
    let mut input_path = None;
    let mut format = "text".to_string();
    let mut with_prompt = false;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                input_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--input requires a file path");
                    process::exit(1);
                }));
            }
            "--format" => {
                i += 1;
                format = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--format requires 'text' or 'json'");
                    process::exit(1);
                });
            }
            "--prompt" => {
                with_prompt = true;
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let path = input_path.unwrap_or_else(|| {
        eprintln!("Error: --input <FILE> is required");
        process::exit(1);
    });

    let set = load_transactions(&path);
    let report = RiskReport::from_transactions(&set);

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report).unwrap());
    } else {
        println!("{}", report);
    }

    if with_prompt {
        let prompt = NarrativePrompt::from_report(&report);
        println!("\n=== Analyst Prompt ===");
        println!("[system] {}", prompt.system_message());
        println!("{}", prompt.user_prompt());
    }
}

fn cmd_generate(args: &[String]) {
    let mut count = 50usize;
    let mut countries_str =
        "France,Germany,Japan,Brazil,Iran,Russia,United States".to_string();
    let mut output_path: Option<String> = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--transactions" => {
                i += 1;
                count = args.get(i).and_then(|s| s.parse().ok()).unwrap_or_else(|| {
                    eprintln!("--transactions requires a number");
                    process::exit(1);
                });
            }
            "--countries" => {
                i += 1;
                countries_str = args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--countries requires a comma-separated list");
                    process::exit(1);
                });
            }
            "--output" => {
                i += 1;
                output_path = Some(args.get(i).cloned().unwrap_or_else(|| {
                    eprintln!("--output requires a file path");
                    process::exit(1);
                }));
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let countries: Vec<&str> = countries_str.split(',').map(str::trim).collect();
    if countries.is_empty() {
        eprintln!("--countries must name at least one country");
        process::exit(1);
    }

    let hub = "United Kingdom";
    let natures = ["Consulting", "Shipping", "Manufacturing", "Retail", "Oil Trading"];
    let risks = [RiskLevel::Low, RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];
    let mut rng = rand::thread_rng();

    #[derive(serde::Serialize)]
    struct OutputTransaction {
        origin: String,
        destination: String,
        direction: String,
        amount: String,
        risk: String,
        business_nature: String,
    }

    #[derive(serde::Serialize)]
    struct OutputFile {
        transactions: Vec<OutputTransaction>,
    }

    let mut transactions = Vec::with_capacity(count);
    for _ in 0..count {
        let counterparty = countries[rng.gen_range(0..countries.len())];
        let direction = if rng.gen_bool(0.5) {
            Direction::Receipt
        } else {
            Direction::Payment
        };
        let (origin, destination) = match direction {
            Direction::Receipt => (counterparty, hub),
            Direction::Payment => (hub, counterparty),
        };
        let amount = Decimal::from_f64_retain(rng.gen_range(100.0..1_000_000.0))
            .unwrap_or(Decimal::from(1000))
            .round_dp(2);

        transactions.push(OutputTransaction {
            origin: origin.to_string(),
            destination: destination.to_string(),
            direction: direction.to_string(),
            amount: amount.to_string(),
            risk: risks[rng.gen_range(0..risks.len())].to_string(),
            business_nature: natures[rng.gen_range(0..natures.len())].to_string(),
        });
    }

    let json = serde_json::to_string_pretty(&OutputFile { transactions }).unwrap();

    if let Some(path) = output_path {
        fs::write(&path, &json).unwrap_or_else(|e| {
            eprintln!("Error writing to '{}': {}", path, e);
            process::exit(1);
        });
        eprintln!("Generated {} transactions → {}", count, path);
    } else {
        println!("{}", json);
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    match command {
        "edges" => cmd_edges(rest),
        "summary" => cmd_summary(rest),
        "generate" => cmd_generate(rest),
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {}", command);
            print_usage();
            process::exit(1);
        }
    }
}
