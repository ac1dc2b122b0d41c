use crate::common::{build_trie, key_sets};
use criterion::{criterion_group, BatchSize, Criterion};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

fn bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(69420);
    let mut group = c.benchmark_group("delete");

    for (name, mut keys) in key_sets() {
        let trie = build_trie(&keys);
        keys.shuffle(&mut rng);

        group.bench_function(format!("{name}/all"), |b| {
            b.iter_batched(
                || trie.clone(),
                |mut trie| {
                    for key in &keys {
                        trie.delete(key);
                    }
                    trie
                },
                BatchSize::LargeInput,
            )
        });

        group.bench_function(format!("{name}/subtree"), |b| {
            b.iter_batched(
                || trie.clone(),
                |mut trie| {
                    for first_byte in 0..=u8::MAX {
                        trie.delete_subtree(&[first_byte]);
                    }
                    trie
                },
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(bench_delete_group, bench);
