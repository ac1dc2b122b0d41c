#![no_main]

use libfuzzer_sys::arbitrary::{self, Arbitrary};
use sprig::{visitor::WellFormedChecker, Trie, TrieOptions, Walk};
use std::{collections::BTreeMap, convert::Infallible};

#[derive(Arbitrary, Debug)]
struct Limits {
    max_prefix_per_node: u8,
    max_children_per_sparse_node: u8,
}

#[derive(Arbitrary, Debug)]
enum Action {
    Clear,
    ContainsKey(Box<[u8]>),
    ContainsSubtree(Box<[u8]>),
    GetKey(Box<[u8]>),
    CheckLen,
    CheckVisit,
    Insert(Box<[u8]>),
    Set(Box<[u8]>),
    Remove(Box<[u8]>),
    DeleteSubtree(Box<[u8]>),
    VisitSubtree(Box<[u8]>),
    VisitPrefixes(Box<[u8]>),
    Clone,
}

libfuzzer_sys::fuzz_target!(|input: (Limits, Vec<Action>)| {
    let (limits, actions) = input;
    let options = TrieOptions::default()
        .max_prefix_per_node(usize::from(limits.max_prefix_per_node % 16))
        .max_children_per_sparse_node(usize::from(limits.max_children_per_sparse_node % 16));
    let mut trie = Trie::<(Box<[u8]>, u32)>::with_options(options);
    let mut oracle = BTreeMap::<Box<[u8]>, u32>::new();
    let mut next_value = 0;

    for action in actions {
        match action {
            Action::Clear => {
                trie.clear();
                oracle.clear();
            },
            Action::ContainsKey(key) => {
                assert_eq!(trie.contains_key(&key), oracle.contains_key(&key));
            },
            Action::ContainsSubtree(prefix) => {
                let expected = oracle.keys().any(|key| key.starts_with(&prefix));
                assert_eq!(trie.contains_subtree(&prefix), expected);
            },
            Action::GetKey(key) => {
                assert_eq!(
                    trie.get(&key).map(|(_, value)| value),
                    oracle.get(&key)
                );
            },
            Action::CheckLen => {
                assert_eq!(trie.len(), oracle.len());
            },
            Action::CheckVisit => {
                let items: Vec<_> = trie.list().into_iter().cloned().collect();
                let expected: Vec<_> = oracle
                    .iter()
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(items, expected);
            },
            Action::Insert(key) => {
                if key.is_empty() {
                    continue;
                }
                let value = next_value;
                next_value += 1;
                let inserted = trie.insert((key.clone(), value));
                assert_eq!(inserted, !oracle.contains_key(&key));
                oracle.entry(key).or_insert(value);
            },
            Action::Set(key) => {
                if key.is_empty() {
                    continue;
                }
                let value = next_value;
                next_value += 1;
                let replaced = trie.set((key.clone(), value)).map(|(_, value)| value);
                assert_eq!(replaced, oracle.insert(key, value));
            },
            Action::Remove(key) => {
                if key.is_empty() {
                    continue;
                }
                let removed = trie.remove(&key).map(|(_, value)| value);
                assert_eq!(removed, oracle.remove(&key));
            },
            Action::DeleteSubtree(prefix) => {
                if prefix.is_empty() {
                    continue;
                }
                let before = oracle.len();
                oracle.retain(|key, _| !key.starts_with(&prefix));
                assert_eq!(trie.delete_subtree(&prefix), oracle.len() != before);
            },
            Action::VisitSubtree(prefix) => {
                if prefix.is_empty() {
                    continue;
                }
                let mut seen = Vec::new();
                let Ok(()) = trie.visit_subtree(&prefix, |key, (_, value)| {
                    seen.push((Box::<[u8]>::from(key), *value));
                    Ok::<_, Infallible>(Walk::Continue)
                });
                let expected: Vec<_> = oracle
                    .iter()
                    .filter(|(key, _)| key.starts_with(&prefix))
                    .map(|(key, value)| (key.clone(), *value))
                    .collect();
                assert_eq!(seen, expected);
            },
            Action::VisitPrefixes(key) => {
                if key.is_empty() {
                    continue;
                }
                let mut seen = Vec::new();
                let Ok(()) = trie.visit_prefixes(&key, |found, _| {
                    seen.push(Box::<[u8]>::from(found));
                    Ok::<_, Infallible>(Walk::Continue)
                });
                let expected: Vec<_> = oracle
                    .keys()
                    .filter(|candidate| key.starts_with(candidate))
                    .cloned()
                    .collect();
                assert_eq!(seen, expected);
            },
            Action::Clone => {
                let cloned = trie.clone();
                assert_eq!(cloned, trie);
                trie = cloned;
            },
        }

        let _ = WellFormedChecker::check(&trie).unwrap();
    }
});
