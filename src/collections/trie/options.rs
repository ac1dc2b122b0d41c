use crate::{
    AsBytes, NodeLimits, DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE, DEFAULT_MAX_PREFIX_PER_NODE,
};
use serde::{Deserialize, Serialize};

/// Construction options for a [`Trie`](crate::Trie).
///
/// A limit of zero selects the default value for that limit.
///
/// # Examples
///
/// ```rust
/// use sprig::{Trie, TrieOptions};
///
/// let trie = Trie::<String>::with_options(
///     TrieOptions::default()
///         .max_prefix_per_node(4)
///         .max_children_per_sparse_node(2)
///         .prefix("/api/"),
/// );
/// assert_eq!(trie.root_prefix(), Some(&b"/api/"[..]));
/// assert!(trie.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct TrieOptions {
    /// Maximum number of key bytes held by a single node. Longer keys are
    /// spread over a chain of nodes.
    pub max_prefix_per_node: usize,
    /// Number of children a node keeps in a linearly scanned list before
    /// switching to a byte-indexed array.
    pub max_children_per_sparse_node: usize,
    /// Prefix the root node starts out with.
    pub prefix: Option<Vec<u8>>,
}

impl Default for TrieOptions {
    fn default() -> Self {
        TrieOptions {
            max_prefix_per_node: DEFAULT_MAX_PREFIX_PER_NODE,
            max_children_per_sparse_node: DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE,
            prefix: None,
        }
    }
}

impl TrieOptions {
    /// Set the maximum number of key bytes held by a single node.
    pub fn max_prefix_per_node(mut self, max_prefix_per_node: usize) -> Self {
        self.max_prefix_per_node = max_prefix_per_node;
        self
    }

    /// Set the number of children a sparse child list holds before it is
    /// converted to a dense one.
    pub fn max_children_per_sparse_node(mut self, max_children_per_sparse_node: usize) -> Self {
        self.max_children_per_sparse_node = max_children_per_sparse_node;
        self
    }

    /// Set the prefix the root node starts out with.
    pub fn prefix<K: AsBytes + ?Sized>(mut self, prefix: &K) -> Self {
        self.prefix = Some(prefix.as_bytes().to_vec());
        self
    }

    /// The node limits these options describe, with zero values replaced by
    /// the defaults.
    pub fn limits(&self) -> NodeLimits {
        fn or_default(value: usize, default: usize) -> usize {
            if value == 0 {
                default
            } else {
                value
            }
        }

        NodeLimits {
            max_prefix_per_node: or_default(self.max_prefix_per_node, DEFAULT_MAX_PREFIX_PER_NODE),
            max_children_per_sparse_node: or_default(
                self.max_children_per_sparse_node,
                DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE,
            ),
        }
    }
}
