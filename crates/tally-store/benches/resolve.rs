use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_store::{Collection, InMemoryCollection, KeyExclusions, NoExclusions};

fn populated(keys: usize, values_per_key: usize) -> InMemoryCollection {
    let c = InMemoryCollection::new("IP");
    for k in 0..keys {
        let key = format!("client:{k}");
        for v in 0..values_per_key {
            c.store(&key, &v.to_string());
        }
    }
    c
}

fn bench_resolution(c: &mut Criterion) {
    let collection = populated(1000, 2);
    let exclusions = KeyExclusions::new().exact("client:7");

    c.bench_function("resolve_first", |b| {
        b.iter(|| collection.resolve_first(black_box("client:500")))
    });

    c.bench_function("resolve_single_match", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            collection.resolve_single_match(black_box("client:500"), &mut out);
            out
        })
    });

    c.bench_function("resolve_multi_matches/all", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            collection.resolve_multi_matches("", &mut out, &exclusions);
            out
        })
    });

    c.bench_function("resolve_regular_expression", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            collection.resolve_regular_expression(black_box("^client:9"), &mut out, &NoExclusions);
            out
        })
    });
}

fn bench_mutation(c: &mut Criterion) {
    let collection = InMemoryCollection::new("GLOBAL");
    c.bench_function("store_or_update_first", |b| {
        b.iter(|| collection.store_or_update_first(black_box("anomaly_score"), black_box("5")))
    });
}

criterion_group!(benches, bench_resolution, bench_mutation);
criterion_main!(benches);
