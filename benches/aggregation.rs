use curview::{
    aggregation::Aggregator,
    filters::{FilterSpec, apply_filters},
    types::{Amount, LineItem},
};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const PRODUCTS: &[&str] = &["AmazonEC2", "AmazonS3", "AWSLambda", "AmazonRDS", "AmazonCloudFront"];

fn create_test_items(count: usize) -> Vec<LineItem> {
    let mut items = Vec::with_capacity(count);

    for i in 0..count {
        let month = (i % 12) + 1;
        let day = (i % 28) + 1;
        let start = format!("2024-{month:02}-{day:02}");

        // Mix numeric, textual and suffixed costs like a real export
        let cost = match i % 3 {
            0 => Amount::Number(i as f64 * 0.01),
            1 => Amount::Text(format!("{:.4}", i as f64 * 0.02)),
            _ => Amount::Text(format!("{:.2} USD", i as f64 * 0.03)),
        };

        items.push(
            LineItem::new()
                .with_product_code(PRODUCTS[i % PRODUCTS.len()])
                .with_cost(cost)
                .with_period(start.clone(), start),
        );
    }

    items
}

fn benchmark_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");
    group.sample_size(10);

    for size in [1_000, 10_000, 100_000] {
        let items = create_test_items(size);
        group.bench_function(format!("{size}_items"), |b| {
            b.iter(|| black_box(Aggregator::aggregate(black_box(&items))))
        });
    }

    group.finish();
}

fn benchmark_filters(c: &mut Criterion) {
    let items = create_test_items(10_000);
    let filter = FilterSpec::new()
        .with_from("2024-03-01")
        .with_to("2024-06-30");

    c.bench_function("apply_filters_10000_items", |b| {
        b.iter(|| black_box(apply_filters(black_box(&items), black_box(&filter))))
    });
}

criterion_group!(benches, benchmark_aggregate, benchmark_filters);
criterion_main!(benches);
