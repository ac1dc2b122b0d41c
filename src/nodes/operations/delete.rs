use crate::{
    compact_child, compact_root, count_items, node_at_path, node_at_path_mut,
    search_subtree_path, NodeLimits, TrieNode,
};


/// Remove the item stored exactly under `key` and restore the structural
/// invariants of the trie around it.
///
/// Nodes left with neither an item nor children are detached, and nodes left
/// with a single child are merged with it where the prefixes fit. If nothing
/// remains, the root is cleared.
pub fn delete_unchecked<T>(
    root: &mut Option<Box<TrieNode<T>>>,
    key: &[u8],
    limits: &NodeLimits,
) -> Option<T> {
    let root_node = root.as_deref_mut()?;
    let path = search_subtree_path(root_node, key).filter(|path| path.leftover_len == 0)?;

    let item = node_at_path_mut(root_node, &path.key_bytes).item.take()?;
    prune_and_compact(root, &path.key_bytes, &path.anchors, limits);

    Some(item)
}

/// Remove the shallowest node whose key starts with `key`, along with every
/// node below it. Returns the number of items removed.
pub fn delete_subtree_unchecked<T>(
    root: &mut Option<Box<TrieNode<T>>>,
    key: &[u8],
    limits: &NodeLimits,
) -> Option<usize> {
    let root_node = root.as_deref_mut()?;
    let path = search_subtree_path(root_node, key)?;

    let Some((&key_byte, parent_path)) = path.key_bytes.split_last() else {
        let removed = count_items(root_node);
        tracing::trace!(removed, "reset trie");
        *root = None;
        return Some(removed);
    };

    let detached = node_at_path_mut(root_node, parent_path)
        .children
        .remove(key_byte);
    let removed = count_items(&detached);
    tracing::trace!(removed, depth = path.depth(), "detached subtree");

    prune_and_compact(root, parent_path, &path.anchors[..parent_path.len() + 1], limits);

    Some(removed)
}

/// Fix up the trie after the node at `path` lost its item or a child.
///
/// `anchors` holds, for every node on the path, whether it was holding an item
/// or at least two children before the removal.
fn prune_and_compact<T>(
    root: &mut Option<Box<TrieNode<T>>>,
    path: &[u8],
    anchors: &[bool],
    limits: &NodeLimits,
) {
    let Some(root_node) = root.as_mut() else {
        return;
    };

    if !node_at_path(root_node, path).is_vacant() {
        compact_with_parent(root_node, path, limits);
        return;
    }

    // The vacant node is detached below its nearest ancestor that still has a
    // reason to exist. Everything in between is a chain leading only to it.
    let Some(anchor_depth) = (0..path.len()).rev().find(|&depth| anchors[depth]) else {
        tracing::trace!("reset trie");
        *root = None;
        return;
    };

    let anchor_path = &path[..anchor_depth];
    let pruned = node_at_path_mut(root_node, anchor_path)
        .children
        .remove(path[anchor_depth]);
    tracing::trace!(
        anchor_depth,
        pruned_nodes = pruned.total(),
        "pruned vacant chain"
    );

    compact_with_parent(root_node, anchor_path, limits);
}

/// Compact the node at `path`, and if that merged it, its parent as well.
fn compact_with_parent<T>(root: &mut Box<TrieNode<T>>, path: &[u8], limits: &NodeLimits) {
    if compact_at(root, path, limits) {
        if let Some((_, parent_path)) = path.split_last() {
            compact_at(root, parent_path, limits);
        }
    }
}

fn compact_at<T>(root: &mut Box<TrieNode<T>>, path: &[u8], limits: &NodeLimits) -> bool {
    match path.split_last() {
        None => compact_root(root, limits),
        Some((&key_byte, parent_path)) => {
            compact_child(node_at_path_mut(root, parent_path), key_byte, limits)
        },
    }
}
