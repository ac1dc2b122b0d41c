use crate::common::{build_trie, large_prefix_keys, skewed_keys, wide_keys};
use criterion::{criterion_group, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    let skewed_trie = build_trie(&skewed_keys());
    let with_prefixes_trie = build_trie(&large_prefix_keys());
    let wide_trie = build_trie(&wide_keys());

    group.bench_function("skewed", |b| b.iter(|| skewed_trie.clone()));
    group.bench_function("with_prefixes", |b| b.iter(|| with_prefixes_trie.clone()));
    group.bench_function("wide", |b| b.iter(|| wide_trie.clone()));
}

criterion_group!(bench_clone_group, criterion_benchmark);
