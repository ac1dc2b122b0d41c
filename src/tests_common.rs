//! Key generators and item types shared by unit tests, integration tests,
//! benchmarks and fuzz targets.

use crate::Keyed;
use std::iter;

/// An item keyed by an owned byte string, carrying a payload which is not
/// part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Entry {
    /// The key of the entry
    pub key: Vec<u8>,
    /// A payload to tell apart entries with the same key
    pub value: u32,
}

impl Entry {
    /// Create an entry from anything that can be viewed as bytes.
    pub fn new(key: impl AsRef<[u8]>, value: u32) -> Self {
        Entry {
            key: key.as_ref().to_vec(),
            value,
        }
    }
}

impl Keyed for Entry {
    type Key = [u8];

    fn key(&self) -> &[u8] {
        &self.key
    }
}

/// Generate an iterator of keys which form a single, maximally deep chain.
///
/// Every key is one byte longer than the previous one, and each key is a
/// prefix of all following keys.
///
/// # Panics
///  - Panics if `max_len` is 0.
pub fn generate_keys_skewed(max_len: usize) -> impl Iterator<Item = Box<[u8]>> {
    assert!(max_len > 0, "the fixed key length must be greater than 0");

    (1..=max_len).map(|len| iter::repeat(u8::MAX).take(len).collect())
}

/// Generate all keys of a fixed length, where each position takes every value
/// in `0..=max_value`. Keys are produced in lexicographic order.
///
/// # Panics
///  - Panics if `key_len` is 0.
pub fn generate_key_fixed_length(key_len: usize, max_value: u8) -> impl Iterator<Item = Box<[u8]>> {
    assert!(key_len > 0, "the fixed key length must be greater than 0");

    let mut next_key = Some(vec![0u8; key_len]);
    iter::from_fn(move || {
        let current = next_key.take()?;

        let mut following = current.clone();
        for position in (0..key_len).rev() {
            if following[position] < max_value {
                following[position] += 1;
                next_key = Some(following);
                break;
            }
            following[position] = 0;
        }

        Some(current.into_boxed_slice())
    })
}

/// Describes how a shared prefix is spliced into generated keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixExpansion {
    /// Position in the base key after which the prefix is inserted
    pub base_index: usize,
    /// Number of repeated bytes to insert
    pub expanded_length: usize,
}

/// Generate fixed length keys like [`generate_key_fixed_length`], then splice
/// runs of a repeated byte into each key as described by `prefix_expansions`.
///
/// Keys generated this way share long common runs, which forces the trie to
/// split those runs into chains of nodes.
///
/// # Panics
///  - Panics if any expansion points past the end of the base key.
pub fn generate_key_with_prefix(
    key_len: usize,
    max_value: u8,
    prefix_expansions: impl AsRef<[PrefixExpansion]>,
) -> impl Iterator<Item = Box<[u8]>> {
    let expansions = prefix_expansions.as_ref().to_vec();
    assert!(
        expansions
            .iter()
            .all(|expansion| expansion.base_index < key_len),
        "the prefix expansion index must be less than the key length"
    );

    generate_key_fixed_length(key_len, max_value).map(move |key| {
        let mut expanded = Vec::with_capacity(
            key_len
                + expansions
                    .iter()
                    .map(|expansion| expansion.expanded_length)
                    .sum::<usize>(),
        );
        for (idx, byte) in key.iter().enumerate() {
            expanded.push(*byte);
            for expansion in expansions.iter().filter(|e| e.base_index == idx) {
                expanded.extend(iter::repeat(*byte).take(expansion.expanded_length));
            }
        }
        expanded.into_boxed_slice()
    })
}

/// Generate keys which are mostly distinct in their first byte, so that the
/// root of the trie gets a dense child list.
pub fn generate_keys_wide(num_keys: usize) -> impl Iterator<Item = Box<[u8]>> {
    (0..num_keys).map(|idx| {
        let [lo, hi, ..] = idx.to_le_bytes();
        Box::from([lo, hi, b'.', b'k'])
    })
}

/// Swap the values at two indices in `slice`, if they are both in bounds.
pub fn swap<A>(slice: &mut [A], (a, b): (usize, usize)) {
    if a < slice.len() && b < slice.len() {
        slice.swap(a, b);
    }
}
