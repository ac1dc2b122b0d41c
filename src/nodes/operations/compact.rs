use crate::{NodeLimits, TrieNode};
use std::mem;


/// Return true if `node` holds no item, has exactly one child, and the two
/// prefixes together fit in a single node.
pub fn can_compact<T>(node: &TrieNode<T>, limits: &NodeLimits) -> bool {
    node.item.is_none()
        && node.children.len() == 1
        && node.prefix.len() + node.children.head().prefix.len() <= limits.max_prefix_per_node
}

/// Detach the only child of `node` and prepend the prefix of `node` to it.
///
/// The returned node takes the place of `node` in the trie. `node` is left
/// without a prefix or children.
///
/// # Panics
///  - Panics if `node` does not have exactly one child.
pub fn merge_with_only_child<T>(node: &mut TrieNode<T>) -> Box<TrieNode<T>> {
    assert_eq!(
        node.children.len(),
        1,
        "only a node with a single child can be merged"
    );

    let key_byte = node.children.head().key_byte();
    let mut child = node.children.remove(key_byte);

    let mut prefix = mem::take(&mut node.prefix);
    prefix.extend_from_slice(&child.prefix);
    child.prefix = prefix;

    if child.item.is_none() {
        child.item = node.item.take();
    }

    tracing::trace!(merged_prefix_len = child.prefix.len(), "compacted node");
    child
}

/// Compact an owned node which is not yet linked into a trie.
pub fn compact_owned<T>(mut node: Box<TrieNode<T>>, limits: &NodeLimits) -> Box<TrieNode<T>> {
    if can_compact(&node, limits) {
        merge_with_only_child(&mut node)
    } else {
        node
    }
}

/// Compact the root node in place. Returns true if the root was merged with
/// its child.
pub fn compact_root<T>(root: &mut Box<TrieNode<T>>, limits: &NodeLimits) -> bool {
    if !can_compact(root, limits) {
        return false;
    }

    *root = merge_with_only_child(root);
    true
}

/// Compact the child of `parent` stored under `key_byte`, putting the merged
/// node in its place. Returns true if the child was merged.
///
/// # Panics
///  - Panics if there is no child under `key_byte`.
pub fn compact_child<T>(parent: &mut TrieNode<T>, key_byte: u8, limits: &NodeLimits) -> bool {
    let child = match parent.children.next(key_byte) {
        Some(child) => child,
        None => panic!("compacting non-existent child [{key_byte}]"),
    };

    if !can_compact(child, limits) {
        return false;
    }

    // The child has to leave the list before its prefix is taken, the list
    // finds children by their leading byte.
    let mut child = parent.children.remove(key_byte);
    let merged = merge_with_only_child(&mut child);
    debug_assert!(child.is_vacant());
    parent.add_child(merged);
    true
}
