use crate::common::{build_trie, key_sets};
use criterion::{criterion_group, Criterion};
use rand::{rngs::StdRng, seq::IndexedRandom, SeedableRng};

fn bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(69420);

    for (name, keys) in key_sets() {
        let trie = build_trie(&keys);
        let searches: Vec<_> = keys.choose_multiple(&mut rng, 1_000).cloned().collect();

        let mut group = c.benchmark_group(format!("generated_get/{name}"));
        group.bench_function("get", |b| {
            b.iter(|| {
                for search in &searches {
                    std::hint::black_box(trie.get(search));
                }
            });
        });
        group.bench_function("contains_subtree", |b| {
            b.iter(|| {
                for search in &searches {
                    let half = &search[..search.len().div_ceil(2)];
                    std::hint::black_box(trie.contains_subtree(half));
                }
            });
        });
    }
}

criterion_group!(bench_generated_get_group, bench);
