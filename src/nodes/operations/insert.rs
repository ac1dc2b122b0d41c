use crate::{
    compact_child, compact_owned, node_at_path_mut, AsBytes, ChildList, Keyed, NodeLimits,
    TrieNode,
};
use std::mem;

#[cfg(test)]
mod tests;

/// The outcome of an insert.
#[derive(Debug, PartialEq, Eq)]
pub enum InsertResult<T> {
    /// There was no item under the key before.
    Inserted,
    /// An existing item was overwritten and is returned.
    Replaced(T),
    /// An item already existed and overwriting was not requested. The new
    /// item is handed back untouched.
    Rejected(T),
}

/// Insert `item` under its own key, creating the root if the trie is empty.
///
/// If an item is already stored under the key it is overwritten only when
/// `replace` is true.
///
/// The caller must make sure the key is not empty.
pub fn insert_unchecked<T: Keyed>(
    root: &mut Option<Box<TrieNode<T>>>,
    item: T,
    replace: bool,
    limits: &NodeLimits,
) -> InsertResult<T> {
    let key = item.key().as_bytes();
    let Some(mut node) = root.as_deref_mut() else {
        let split = key.len().min(limits.max_prefix_per_node);
        let mut new_root = Box::new(TrieNode::new(key[..split].to_vec(), limits));
        let leaf = append_chain(&mut new_root, &key[split..], limits);
        leaf.item = Some(item);
        *root = Some(new_root);
        return InsertResult::Inserted;
    };

    let mut remaining = key;
    // leading bytes of the nodes below the root on the way to `node`
    let mut path = Vec::new();
    let mut was_split = false;
    loop {
        let common = node.longest_common_prefix_len(remaining);
        remaining = &remaining[common..];

        if common < node.prefix.len() {
            split_node(node, common, limits);
            was_split = true;
            break;
        }

        if remaining.is_empty() {
            break;
        }

        let key_byte = remaining[0];
        if node.children.next(key_byte).is_none() {
            break;
        }
        // cannot fail, the child was found just above
        node = node
            .children
            .next_mut(key_byte)
            .expect("child was found by the previous lookup");
        path.push(key_byte);
    }

    let target = append_chain(node, remaining, limits);
    let result = place_item(target, item, replace);

    if was_split {
        if let Some(root) = root.as_deref_mut() {
            compact_split_parent(root, &path, limits);
        }
    }

    result
}

/// A split shortens the prefix of the node at `path`, so a parent without an
/// item that was too long to merge with it before may fit now.
///
/// The root is never merged with its child.
fn compact_split_parent<T>(root: &mut TrieNode<T>, path: &[u8], limits: &NodeLimits) {
    if let [grandparent_path @ .., parent_byte, _] = path {
        if compact_child(node_at_path_mut(root, grandparent_path), *parent_byte, limits) {
            tracing::trace!(depth = path.len() - 1, "compacted parent of split node");
        }
    }
}

/// Split `node` so that it keeps only the first `at` bytes of its prefix.
///
/// The rest of the prefix moves into a new child which takes over the item
/// and the children of `node`.
fn split_node<T>(node: &mut TrieNode<T>, at: usize, limits: &NodeLimits) {
    let tail_prefix = node.prefix.split_off(at);
    let tail = Box::new(TrieNode {
        prefix: tail_prefix,
        item: node.item.take(),
        children: mem::replace(
            &mut node.children,
            ChildList::new(limits.max_children_per_sparse_node),
        ),
    });
    // A bare root prefix that nothing was ever stored under is dropped
    // instead of becoming an empty leaf.
    if tail.is_vacant() {
        tracing::trace!(head_prefix_len = node.prefix.len(), "truncated vacant node");
        return;
    }
    let tail = compact_owned(tail, limits);

    tracing::trace!(
        head_prefix_len = node.prefix.len(),
        tail_prefix_len = tail.prefix.len(),
        "split node"
    );
    node.add_child(tail);
}

/// Hang a chain of new nodes below `node` which spells out `key`, each holding
/// at most `max_prefix_per_node` bytes. Returns the last node of the chain,
/// or `node` itself if `key` is empty.
fn append_chain<'a, T>(
    mut node: &'a mut TrieNode<T>,
    key: &[u8],
    limits: &NodeLimits,
) -> &'a mut TrieNode<T> {
    let max = limits.max_prefix_per_node.max(1);
    for fragment in key.chunks(max) {
        tracing::trace!(fragment_len = fragment.len(), "appending chain link");
        node.add_child(Box::new(TrieNode::new(fragment.to_vec(), limits)));
        node = node
            .children
            .next_mut(fragment[0])
            .expect("chain link was just added");
    }
    node
}

fn place_item<T>(node: &mut TrieNode<T>, item: T, replace: bool) -> InsertResult<T> {
    if node.item.is_some() && !replace {
        return InsertResult::Rejected(item);
    }

    match node.item.replace(item) {
        Some(existing) => InsertResult::Replaced(existing),
        None => InsertResult::Inserted,
    }
}
