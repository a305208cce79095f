//! Pricing Performance Benchmarks
//!
//! - Single category line: discount engine + rounding
//! - Full transaction: resolution, grouping, pricing, ordering
//!
//! Run with: `cargo bench -p cinema-pricing-core`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)] // Benchmarks can use expect for setup

use cinema_pricing_core::{
    CategoryCounts, CategoryPricingStrategy, Customer, PricingConfiguration, PricingEngine,
    StandardPricingEngine, StandardPricingStrategy, TicketCategory, TransactionId,
};
use cinema_pricing_testing::{reference_settings, test_clock};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::sync::Arc;

fn config() -> PricingConfiguration {
    PricingConfiguration::from_settings(&reference_settings())
        .expect("reference settings are valid")
}

fn bench_category_pricing(c: &mut Criterion) {
    let strategy = StandardPricingStrategy::from_config(&config(), Arc::new(test_clock()));
    let counts: CategoryCounts = [(TicketCategory::Children, 4), (TicketCategory::Senior, 2)]
        .into_iter()
        .collect();

    c.bench_function("category_price_bulk_children", |b| {
        b.iter(|| strategy.price(black_box(TicketCategory::Children), black_box(4), &counts));
    });

    c.bench_function("category_price_senior", |b| {
        b.iter(|| strategy.price(black_box(TicketCategory::Senior), black_box(2), &counts));
    });
}

fn bench_transaction(c: &mut Criterion) {
    let engine = StandardPricingEngine::with_clock(&config(), Arc::new(test_clock()));

    let mut group = c.benchmark_group("transaction");
    for size in [1_usize, 10, 100] {
        let customers: Vec<Customer> = (0..size)
            .map(|i| Customer::new(format!("customer-{i}"), i32::try_from(i % 90).unwrap_or(0)))
            .collect();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("customers_{size}"), |b| {
            b.iter(|| {
                engine
                    .calculate_price(TransactionId::new(1), black_box(&customers))
                    .expect("valid transaction")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_category_pricing, bench_transaction);
criterion_main!(benches);
