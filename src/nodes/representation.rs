//! Trie node representation

use std::mem;

mod dense;
mod sparse;

pub use dense::*;
pub use sparse::*;


/// The default upper bound on the number of key bytes a single node holds.
pub const DEFAULT_MAX_PREFIX_PER_NODE: usize = 10;

/// The default number of children a sparse child list holds before it is
/// promoted to a dense child list.
pub const DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE: usize = 8;

/// The structural limits every node of a trie is built under.
///
/// These are fixed when the trie is created and passed down to every
/// operation that creates or merges nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeLimits {
    /// Maximum number of bytes in a single node prefix fragment.
    pub max_prefix_per_node: usize,
    /// Number of children a sparse child list can hold before it converts to
    /// a dense child list.
    pub max_children_per_sparse_node: usize,
}

impl Default for NodeLimits {
    fn default() -> Self {
        NodeLimits {
            max_prefix_per_node: DEFAULT_MAX_PREFIX_PER_NODE,
            max_children_per_sparse_node: DEFAULT_MAX_CHILDREN_PER_SPARSE_NODE,
        }
    }
}

/// The representation of a child list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildListType {
    /// Unordered, linearly scanned list with a bounded capacity
    Sparse,
    /// Byte-indexed array spanning the range of leading bytes present
    Dense,
}

/// A single node of the trie.
///
/// The node owns the portion of the key that was not consumed by its
/// ancestors, an optional item whose key ends exactly here, and its children.
#[derive(Debug, Clone)]
pub struct TrieNode<T> {
    pub(crate) prefix: Vec<u8>,
    pub(crate) item: Option<T>,
    pub(crate) children: ChildList<T>,
}

impl<T> TrieNode<T> {
    /// Create a node with the given prefix fragment, no item and no children.
    pub fn new(prefix: Vec<u8>, limits: &NodeLimits) -> Self {
        TrieNode {
            prefix,
            item: None,
            children: ChildList::new(limits.max_children_per_sparse_node),
        }
    }

    /// The key fragment owned by this node.
    pub fn prefix(&self) -> &[u8] {
        &self.prefix
    }

    /// The item stored exactly at this node, if any.
    pub fn item(&self) -> Option<&T> {
        self.item.as_ref()
    }

    /// The children of this node.
    pub fn children(&self) -> &ChildList<T> {
        &self.children
    }

    /// The first byte of the prefix, which is the byte this node is stored
    /// under in its parent's child list.
    ///
    /// # Panics
    ///  - Panics if the prefix is empty. Only the root may have an empty
    ///    prefix, and the root is never stored in a child list.
    pub fn key_byte(&self) -> u8 {
        match self.prefix.first() {
            Some(byte) => *byte,
            None => panic!("child node must have a non-empty prefix"),
        }
    }

    /// Compares the prefix of this node with the key and returns the number
    /// of equal leading bytes.
    pub fn longest_common_prefix_len(&self, key: &[u8]) -> usize {
        self.prefix
            .iter()
            .zip(key)
            .take_while(|(a, b)| **a == **b)
            .count()
    }

    /// Return true if the node holds neither an item nor children.
    pub fn is_vacant(&self) -> bool {
        self.item.is_none() && self.children.is_empty()
    }

    /// Count this node and every node below it.
    pub fn total(&self) -> usize {
        1 + self.children.total()
    }

    /// Insert a new child, promoting the child list to the dense
    /// representation if the sparse capacity is exhausted.
    ///
    /// # Panics
    ///  - Panics if a child with the same leading byte is already present.
    pub(crate) fn add_child(&mut self, child: Box<TrieNode<T>>) {
        let children = mem::replace(&mut self.children, ChildList::new(0));
        self.children = children.add(child);
    }
}

/// Storage for the children of a node, keyed by the first byte of each
/// child's prefix.
///
/// No two children in a list share the same leading byte.
#[derive(Debug, Clone)]
pub enum ChildList<T> {
    /// A small unordered list
    Sparse(SparseChildList<T>),
    /// A byte-indexed array
    Dense(DenseChildList<T>),
}

impl<T> ChildList<T> {
    /// Create an empty sparse child list which will hold up to
    /// `sparse_capacity` children before converting.
    pub fn new(sparse_capacity: usize) -> Self {
        ChildList::Sparse(SparseChildList::with_capacity(sparse_capacity))
    }

    /// Return the current representation of this list.
    pub fn list_type(&self) -> ChildListType {
        match self {
            ChildList::Sparse(_) => ChildListType::Sparse,
            ChildList::Dense(_) => ChildListType::Dense,
        }
    }

    /// Return the number of children in the list.
    pub fn len(&self) -> usize {
        match self {
            ChildList::Sparse(list) => list.len(),
            ChildList::Dense(list) => list.len(),
        }
    }

    /// Return true if there are no children in the list.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return some child of the list. The choice is deterministic for a given
    /// list state, and is only meaningful when the list has a single child.
    ///
    /// # Panics
    ///  - Panics if the list is empty.
    pub fn head(&self) -> &TrieNode<T> {
        match self {
            ChildList::Sparse(list) => list.head(),
            ChildList::Dense(list) => list.head(),
        }
    }

    /// Insert the child and return the list to use from now on, which may be a
    /// different representation.
    ///
    /// # Panics
    ///  - Panics if a child with the same leading byte is already present.
    pub fn add(self, child: Box<TrieNode<T>>) -> Self {
        match self {
            ChildList::Sparse(mut list) => {
                if list.is_full() {
                    tracing::debug!(
                        sparse_capacity = list.capacity(),
                        key_byte = child.key_byte(),
                        "promoting sparse child list to dense"
                    );
                    ChildList::Dense(DenseChildList::from_sparse(list, child))
                } else {
                    list.add(child);
                    ChildList::Sparse(list)
                }
            },
            ChildList::Dense(mut list) => {
                list.add(child);
                ChildList::Dense(list)
            },
        }
    }

    /// Remove and return the child stored under the given leading byte.
    ///
    /// # Panics
    ///  - Panics if there is no such child.
    pub fn remove(&mut self, key_byte: u8) -> Box<TrieNode<T>> {
        match self {
            ChildList::Sparse(list) => list.remove(key_byte),
            ChildList::Dense(list) => list.remove(key_byte),
        }
    }

    /// Swap the child stored under the given leading byte for `child`,
    /// returning the previous child.
    ///
    /// # Panics
    ///  - Panics if the leading byte of `child` is not `key_byte`, or if there
    ///    is no child stored under `key_byte`.
    pub fn replace(&mut self, key_byte: u8, child: Box<TrieNode<T>>) -> Box<TrieNode<T>> {
        let child_byte = child.key_byte();
        assert_eq!(
            child_byte, key_byte,
            "child prefix mismatch: {child_byte} != {key_byte}"
        );

        match self {
            ChildList::Sparse(list) => list.replace(key_byte, child),
            ChildList::Dense(list) => list.replace(key_byte, child),
        }
    }

    /// Look up the child stored under the given leading byte.
    pub fn next(&self, key_byte: u8) -> Option<&TrieNode<T>> {
        match self {
            ChildList::Sparse(list) => list.next(key_byte),
            ChildList::Dense(list) => list.next(key_byte),
        }
    }

    /// Look up the child stored under the given leading byte, mutably.
    pub fn next_mut(&mut self, key_byte: u8) -> Option<&mut TrieNode<T>> {
        match self {
            ChildList::Sparse(list) => list.next_mut(key_byte),
            ChildList::Dense(list) => list.next_mut(key_byte),
        }
    }

    /// Return all children ordered lexicographically by prefix.
    ///
    /// The ordering is recomputed on every call.
    pub fn sorted(&self) -> Vec<&TrieNode<T>> {
        match self {
            ChildList::Sparse(list) => list.sorted(),
            ChildList::Dense(list) => list.iter().collect(),
        }
    }

    /// Count every node below this list.
    pub fn total(&self) -> usize {
        match self {
            ChildList::Sparse(list) => list.iter().map(TrieNode::total).sum(),
            ChildList::Dense(list) => list.iter().map(TrieNode::total).sum(),
        }
    }
}
