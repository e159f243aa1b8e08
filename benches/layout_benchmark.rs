use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flowmap_engine::aggregation::flows::aggregate_flows;
use flowmap_engine::core::country::Country;
use flowmap_engine::core::risk::RiskLevel;
use flowmap_engine::core::transaction::{Direction, Transaction, TransactionSet};
use flowmap_engine::layout::builder::EdgeBuilder;
use flowmap_engine::layout::centroids::CentroidIndex;
use flowmap_engine::layout::geometry::GeoPoint;
use rand::Rng;
use rust_decimal::Decimal;

fn synthetic_world(countries: usize) -> (CentroidIndex, Vec<Country>) {
    let mut rng = rand::thread_rng();
    let mut index = CentroidIndex::new();
    let mut names = Vec::with_capacity(countries);
    for i in 0..countries {
        let country = Country::new(format!("Country-{:03}", i));
        index.insert(
            country.clone(),
            GeoPoint::new(rng.gen_range(-60.0..70.0), rng.gen_range(-180.0..180.0)),
        );
        names.push(country);
    }
    index.insert(Country::new("United Kingdom"), GeoPoint::new(54.0, -2.0));
    (index, names)
}

fn synthetic_transactions(countries: &[Country], count: usize) -> TransactionSet {
    let mut rng = rand::thread_rng();
    let hub = Country::new("United Kingdom");
    let risks = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    (0..count)
        .map(|_| {
            let counterparty = countries[rng.gen_range(0..countries.len())].clone();
            let direction = if rng.gen_bool(0.5) {
                Direction::Receipt
            } else {
                Direction::Payment
            };
            let (origin, destination) = match direction {
                Direction::Receipt => (counterparty, hub.clone()),
                Direction::Payment => (hub.clone(), counterparty),
            };
            Transaction::new(
                origin,
                destination,
                direction,
                Decimal::from(rng.gen_range(1u64..1_000_000u64)),
                risks[rng.gen_range(0..risks.len())],
            )
        })
        .collect()
}

fn bench_aggregate_1k(c: &mut Criterion) {
    let (_, countries) = synthetic_world(50);
    let set = synthetic_transactions(&countries, 1_000);

    c.bench_function("aggregate_1k_transactions", |b| {
        b.iter(|| aggregate_flows(black_box(&set)))
    });
}

fn bench_aggregate_100k(c: &mut Criterion) {
    let (_, countries) = synthetic_world(200);
    let set = synthetic_transactions(&countries, 100_000);

    c.bench_function("aggregate_100k_transactions", |b| {
        b.iter(|| aggregate_flows(black_box(&set)))
    });
}

fn bench_layout_200_countries(c: &mut Criterion) {
    let (index, countries) = synthetic_world(200);
    let set = synthetic_transactions(&countries, 10_000);
    let flows = aggregate_flows(&set);
    let builder = EdgeBuilder::with_default_hub(index);

    c.bench_function("layout_200_countries", |b| {
        b.iter(|| builder.build(black_box(&flows)))
    });
}

criterion_group!(
    benches,
    bench_aggregate_1k,
    bench_aggregate_100k,
    bench_layout_200_countries
);
criterion_main!(benches);
