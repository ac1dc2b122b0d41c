use crate::common::{build_trie, key_sets};
use criterion::{criterion_group, Criterion};
use sprig::Walk;
use std::convert::Infallible;

fn bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");

    for (name, keys) in key_sets() {
        let trie = build_trie(&keys);
        let longest = keys
            .iter()
            .max_by_key(|key| key.len())
            .cloned()
            .unwrap_or_default();

        group.bench_function(format!("{name}/visit"), |b| {
            b.iter(|| {
                trie.visit(|key, item| {
                    std::hint::black_box((key, item));
                    Ok::<_, Infallible>(Walk::Continue)
                })
            });
        });

        group.bench_function(format!("{name}/list"), |b| {
            b.iter(|| std::hint::black_box(trie.list()));
        });

        group.bench_function(format!("{name}/visit_prefixes"), |b| {
            b.iter(|| {
                trie.visit_prefixes(&longest, |key, item| {
                    std::hint::black_box((key, item));
                    Ok::<_, Infallible>(Walk::Continue)
                })
            });
        });
    }
}

criterion_group!(bench_walk_group, bench);
