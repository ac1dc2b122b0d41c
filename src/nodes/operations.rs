//! Trie node lookup and manipulation

mod compact;
pub use compact::*;

mod delete;
pub use delete::*;

mod insert;
pub use insert::*;

mod lookup;
pub use lookup::*;

mod walk;
pub use walk::*;

use crate::TrieNode;

/// Follow a path of leading bytes down from `root`.
///
/// # Panics
///  - Panics if the path does not lead to an existing node. Paths are only
///    ever produced by a lookup over the same, unmodified trie.
pub fn node_at_path<'a, T>(root: &'a TrieNode<T>, path: &[u8]) -> &'a TrieNode<T> {
    let mut node = root;
    for &key_byte in path {
        node = match node.children.next(key_byte) {
            Some(child) => child,
            None => panic!("path leads to a non-existent child [{key_byte}]"),
        };
    }
    node
}

/// Follow a path of leading bytes down from `root`, mutably.
///
/// # Panics
///  - Panics if the path does not lead to an existing node.
pub fn node_at_path_mut<'a, T>(root: &'a mut TrieNode<T>, path: &[u8]) -> &'a mut TrieNode<T> {
    let mut node = root;
    for &key_byte in path {
        node = match node.children.next_mut(key_byte) {
            Some(child) => child,
            None => panic!("path leads to a non-existent child [{key_byte}]"),
        };
    }
    node
}

/// Count the items stored at `node` and below it.
pub fn count_items<T>(node: &TrieNode<T>) -> usize {
    let mut count = 0;
    let mut stack = vec![node];
    while let Some(node) = stack.pop() {
        count += usize::from(node.item.is_some());
        stack.extend(node.children.sorted());
    }
    count
}
