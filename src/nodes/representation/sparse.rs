use crate::TrieNode;
use std::mem;

/// Child list with a small, unordered set of children.
///
/// Lookups scan the list linearly, which is cheap for the handful of children
/// this representation is limited to.
#[derive(Debug, Clone)]
pub struct SparseChildList<T> {
    children: Vec<Box<TrieNode<T>>>,
    capacity: usize,
}

impl<T> SparseChildList<T> {
    /// Create an empty list that can hold up to `capacity` children.
    pub fn with_capacity(capacity: usize) -> Self {
        SparseChildList {
            children: Vec::new(),
            capacity,
        }
    }

    /// The maximum number of children this list holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Return the number of children in the list.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Return true if there are no children in the list.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Return true if adding another child would exceed the capacity.
    pub fn is_full(&self) -> bool {
        self.children.len() >= self.capacity
    }

    /// Return the first child in storage order.
    ///
    /// # Panics
    ///  - Panics if the list is empty.
    pub fn head(&self) -> &TrieNode<T> {
        match self.children.first() {
            Some(child) => child,
            None => panic!("head of an empty child list"),
        }
    }

    /// Append a child.
    ///
    /// # Panics
    ///  - Panics if a child with the same leading byte is already present.
    pub(crate) fn add(&mut self, child: Box<TrieNode<T>>) {
        let key_byte = child.key_byte();
        assert!(
            self.position(key_byte).is_none(),
            "sparse child list collision detected at [{key_byte}]"
        );
        self.children.push(child);
    }

    /// Remove the child with the given leading byte.
    ///
    /// # Panics
    ///  - Panics if there is no such child.
    pub(crate) fn remove(&mut self, key_byte: u8) -> Box<TrieNode<T>> {
        match self.position(key_byte) {
            Some(idx) => self.children.swap_remove(idx),
            None => panic!("removing non-existent child [{key_byte}]"),
        }
    }

    /// Replace the child with the given leading byte.
    ///
    /// # Panics
    ///  - Panics if there is no such child.
    pub(crate) fn replace(&mut self, key_byte: u8, child: Box<TrieNode<T>>) -> Box<TrieNode<T>> {
        match self.position(key_byte) {
            Some(idx) => mem::replace(&mut self.children[idx], child),
            None => panic!("replacing non-existent child [{key_byte}]"),
        }
    }

    /// Look up the child with the given leading byte.
    pub fn next(&self, key_byte: u8) -> Option<&TrieNode<T>> {
        self.children
            .iter()
            .find(|child| child.key_byte() == key_byte)
            .map(|child| &**child)
    }

    /// Look up the child with the given leading byte, mutably.
    pub fn next_mut(&mut self, key_byte: u8) -> Option<&mut TrieNode<T>> {
        self.children
            .iter_mut()
            .find(|child| child.key_byte() == key_byte)
            .map(|child| &mut **child)
    }

    /// Iterate over the children in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &TrieNode<T>> {
        self.children.iter().map(|child| &**child)
    }

    /// Return the children ordered lexicographically by prefix.
    pub fn sorted(&self) -> Vec<&TrieNode<T>> {
        let mut children: Vec<_> = self.iter().collect();
        children.sort_unstable_by(|a, b| a.prefix().cmp(b.prefix()));
        children
    }

    /// Take every child out of the list, in storage order.
    pub(crate) fn into_children(self) -> Vec<Box<TrieNode<T>>> {
        self.children
    }

    fn position(&self, key_byte: u8) -> Option<usize> {
        self.children
            .iter()
            .position(|child| child.key_byte() == key_byte)
    }
}
