use crate::common::key_sets;
use criterion::{criterion_group, BatchSize, Criterion, Throughput};
use sprig::{Trie, TrieOptions};
use std::time::Duration;

fn gen_group(c: &mut Criterion, group: &str, keys: Vec<Box<[u8]>>) {
    let mut group = c.benchmark_group(group);
    group.warm_up_time(Duration::from_secs(5));
    group.measurement_time(Duration::from_secs(15));
    group.throughput(Throughput::Bytes(keys.iter().map(|k| k.len() as u64).sum()));

    for (name, options) in [
        ("default", TrieOptions::default()),
        (
            "short_prefixes",
            TrieOptions::default().max_prefix_per_node(2),
        ),
        (
            "eager_dense",
            TrieOptions::default().max_children_per_sparse_node(2),
        ),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || keys.clone(),
                |keys| {
                    let mut trie = Trie::with_options(options.clone());
                    for key in keys {
                        trie.insert(key);
                    }
                    trie
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench(c: &mut Criterion) {
    for (name, keys) in key_sets() {
        gen_group(c, &format!("generated_insert/{name}"), keys);
    }
}

criterion_group!(bench_generated_insert_group, bench);
