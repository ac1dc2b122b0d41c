use sprig::{
    tests_common::{
        generate_key_fixed_length, generate_key_with_prefix, generate_keys_skewed,
        generate_keys_wide, PrefixExpansion,
    },
    Trie,
};

pub fn skewed_keys() -> Vec<Box<[u8]>> {
    generate_keys_skewed(u8::MAX as usize).collect()
}

pub fn fixed_length_keys() -> Vec<Box<[u8]>> {
    generate_key_fixed_length(4, 7).collect()
}

pub fn large_prefix_keys() -> Vec<Box<[u8]>> {
    generate_key_with_prefix(
        4,
        5,
        [
            PrefixExpansion {
                base_index: 1,
                expanded_length: 12,
            },
            PrefixExpansion {
                base_index: 3,
                expanded_length: 8,
            },
        ],
    )
    .collect()
}

pub fn wide_keys() -> Vec<Box<[u8]>> {
    generate_keys_wide(u16::MAX as usize).collect()
}

pub fn build_trie(keys: &[Box<[u8]>]) -> Trie<Box<[u8]>> {
    keys.iter().cloned().collect()
}

/// Every generated key set with its name, for benchmarks that compare shapes.
pub fn key_sets() -> [(&'static str, Vec<Box<[u8]>>); 4] {
    [
        ("skewed", skewed_keys()),
        ("fixed_length", fixed_length_keys()),
        ("large_prefixes", large_prefix_keys()),
        ("wide", wide_keys()),
    ]
}
