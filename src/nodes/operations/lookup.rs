use crate::TrieNode;

#[cfg(test)]
mod tests;

/// The node a subtree query resolved to.
#[derive(Debug)]
pub struct SubtreeMatch<'a, T> {
    /// The shallowest node whose key starts with the query.
    pub node: &'a TrieNode<T>,
    /// The full key of `node`, which is the query followed by `leftover`.
    pub key_len: usize,
    /// The bytes of the node prefix that extend past the end of the query.
    pub leftover: &'a [u8],
}

impl<T> SubtreeMatch<'_, T> {
    /// Return true if the query ended exactly at the end of the node prefix.
    pub fn is_exact(&self) -> bool {
        self.leftover.is_empty()
    }
}

/// The leading bytes taken from the root to reach a node, along with which
/// nodes on the way must be kept when something below them is removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreePath {
    /// The leading byte of every node after the root, in descending order.
    pub key_bytes: Vec<u8>,
    /// One entry per node on the path, including the root and the final node.
    /// An entry is true when the node holds an item or has at least two
    /// children.
    pub anchors: Vec<bool>,
    /// Number of prefix bytes of the final node past the end of the query.
    pub leftover_len: usize,
}

impl TreePath {
    /// The depth of the final node, with the root at depth zero.
    pub fn depth(&self) -> usize {
        self.key_bytes.len()
    }
}

/// Search for the shallowest node whose full key starts with `key`.
///
/// The query may end in the middle of a node prefix, in which case the node
/// is still a match and the rest of its prefix is reported as leftover.
pub fn search_subtree<'a, T>(root: &'a TrieNode<T>, key: &[u8]) -> Option<SubtreeMatch<'a, T>> {
    let mut node = root;
    let mut depth = 0;

    loop {
        let common = node.longest_common_prefix_len(&key[depth..]);
        depth += common;

        if depth == key.len() {
            return Some(SubtreeMatch {
                node,
                key_len: key.len() + node.prefix.len() - common,
                leftover: &node.prefix[common..],
            });
        }

        if common < node.prefix.len() {
            return None;
        }

        node = node.children.next(key[depth])?;
    }
}

/// Search for the node whose full key is exactly `key`.
pub fn search_unchecked<'a, T>(root: &'a TrieNode<T>, key: &[u8]) -> Option<&'a TrieNode<T>> {
    search_subtree(root, key)
        .filter(SubtreeMatch::is_exact)
        .map(|found| found.node)
}

/// Search for the node whose full key is exactly `key`, mutably.
pub fn search_unchecked_mut<'a, T>(
    root: &'a mut TrieNode<T>,
    key: &[u8],
) -> Option<&'a mut TrieNode<T>> {
    let mut node = root;
    let mut depth = 0;

    loop {
        let common = node.longest_common_prefix_len(&key[depth..]);
        if common < node.prefix.len() {
            return None;
        }
        depth += common;

        if depth == key.len() {
            return Some(node);
        }

        node = node.children.next_mut(key[depth])?;
    }
}

/// Record the path to the shallowest node whose full key starts with `key`.
///
/// This follows the same matching rule as [`search_subtree`].
pub fn search_subtree_path<T>(root: &TrieNode<T>, key: &[u8]) -> Option<TreePath> {
    let mut path = TreePath::default();
    let mut node = root;
    let mut depth = 0;

    loop {
        path.anchors
            .push(node.item.is_some() || node.children.len() >= 2);

        let common = node.longest_common_prefix_len(&key[depth..]);
        depth += common;

        if depth == key.len() {
            path.leftover_len = node.prefix.len() - common;
            return Some(path);
        }

        if common < node.prefix.len() {
            return None;
        }

        let key_byte = key[depth];
        node = node.children.next(key_byte)?;
        path.key_bytes.push(key_byte);
    }
}
