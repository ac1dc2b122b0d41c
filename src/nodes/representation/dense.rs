use crate::{SparseChildList, TrieNode};
use std::{iter, mem};

/// Child list backed by an array indexed by leading byte.
///
/// The array only spans `[min, max]` of the leading bytes that have been
/// added, so a node whose children cluster in a narrow byte range stays small.
/// Removing a child empties its slot but never shrinks the array.
#[derive(Debug, Clone)]
pub struct DenseChildList<T> {
    min: u8,
    max: u8,
    num_children: usize,
    /// Index of the first occupied slot, or `children.len()` if there is none.
    head_index: usize,
    children: Vec<Option<Box<TrieNode<T>>>>,
}

impl<T> DenseChildList<T> {
    /// Build a dense list out of a full sparse list and the child that did not
    /// fit into it.
    ///
    /// The bounds of the new array are the minimum and maximum leading bytes
    /// of all the children, including the new one.
    pub(crate) fn from_sparse(list: SparseChildList<T>, child: Box<TrieNode<T>>) -> Self {
        let first = child.key_byte();
        let (min, max) = list
            .iter()
            .map(TrieNode::key_byte)
            .fold((first, first), |(min, max), byte| {
                (min.min(byte), max.max(byte))
            });

        let mut dense = DenseChildList {
            min,
            max,
            num_children: 0,
            head_index: 0,
            children: iter::repeat_with(|| None)
                .take(usize::from(max - min) + 1)
                .collect(),
        };

        for existing in list.into_children() {
            dense.add(existing);
        }
        dense.add(child);

        dense
    }

    /// Return the number of children in the list.
    pub fn len(&self) -> usize {
        self.num_children
    }

    /// Return true if there are no children in the list.
    pub fn is_empty(&self) -> bool {
        self.num_children == 0
    }

    /// The smallest and largest leading byte the backing array can hold
    /// without reallocating.
    pub fn bounds(&self) -> (u8, u8) {
        (self.min, self.max)
    }

    /// The number of slots in the backing array, occupied or not.
    pub fn num_slots(&self) -> usize {
        self.children.len()
    }

    /// Return the child with the smallest leading byte.
    ///
    /// # Panics
    ///  - Panics if the list is empty.
    pub fn head(&self) -> &TrieNode<T> {
        match self.children.get(self.head_index) {
            Some(Some(child)) => child,
            _ => panic!("head of an empty child list"),
        }
    }

    /// Store a child, growing the backing array if the leading byte is outside
    /// of the current bounds.
    ///
    /// # Panics
    ///  - Panics if a child with the same leading byte is already present.
    pub(crate) fn add(&mut self, child: Box<TrieNode<T>>) {
        let key_byte = child.key_byte();

        if key_byte < self.min {
            let offset = usize::from(self.min - key_byte);
            let mut children = Vec::with_capacity(self.children.len() + offset);
            children.resize_with(offset, || None);
            children.append(&mut self.children);
            self.children = children;
            self.head_index += offset;
            self.min = key_byte;
            tracing::debug!(
                min = self.min,
                max = self.max,
                "extended dense child list downwards"
            );
        } else if key_byte > self.max {
            self.children
                .resize_with(usize::from(key_byte - self.min) + 1, || None);
            self.max = key_byte;
            tracing::debug!(
                min = self.min,
                max = self.max,
                "extended dense child list upwards"
            );
        }

        let idx = self.index_of(key_byte);
        let slot = &mut self.children[idx];
        assert!(
            slot.is_none(),
            "dense child list collision detected at [{key_byte}]"
        );
        *slot = Some(child);

        self.num_children += 1;
        if idx < self.head_index || self.num_children == 1 {
            self.head_index = idx;
        }
    }

    /// Remove the child with the given leading byte.
    ///
    /// # Panics
    ///  - Panics if there is no such child.
    pub(crate) fn remove(&mut self, key_byte: u8) -> Box<TrieNode<T>> {
        let removed = self
            .slot_mut(key_byte)
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("removing non-existent child [{key_byte}]"));
        self.num_children -= 1;

        let idx = self.index_of(key_byte);
        if idx == self.head_index {
            self.head_index = self.children[idx..]
                .iter()
                .position(Option::is_some)
                .map_or(self.children.len(), |offset| idx + offset);
        }

        removed
    }

    /// Replace the child with the given leading byte.
    ///
    /// # Panics
    ///  - Panics if there is no such child.
    pub(crate) fn replace(&mut self, key_byte: u8, child: Box<TrieNode<T>>) -> Box<TrieNode<T>> {
        match self.slot_mut(key_byte) {
            Some(Some(existing)) => mem::replace(existing, child),
            _ => panic!("replacing non-existent child [{key_byte}]"),
        }
    }

    /// Look up the child with the given leading byte.
    pub fn next(&self, key_byte: u8) -> Option<&TrieNode<T>> {
        if key_byte < self.min || self.max < key_byte {
            return None;
        }

        self.children[self.index_of(key_byte)].as_deref()
    }

    /// Look up the child with the given leading byte, mutably.
    pub fn next_mut(&mut self, key_byte: u8) -> Option<&mut TrieNode<T>> {
        self.slot_mut(key_byte)?.as_deref_mut()
    }

    /// Iterate over the children in ascending order of leading byte.
    pub fn iter(&self) -> impl Iterator<Item = &TrieNode<T>> {
        self.children.iter().flatten().map(|child| &**child)
    }

    /// Iterate over every slot in the backing array, with the leading byte it
    /// stands for.
    pub fn slots(&self) -> impl Iterator<Item = (u8, Option<&TrieNode<T>>)> {
        (self.min..=self.max).zip(self.children.iter().map(Option::as_deref))
    }

    /// The index of the first occupied slot, as tracked by the list.
    pub fn head_index(&self) -> usize {
        self.head_index
    }

    fn index_of(&self, key_byte: u8) -> usize {
        usize::from(key_byte - self.min)
    }

    fn slot_mut(&mut self, key_byte: u8) -> Option<&mut Option<Box<TrieNode<T>>>> {
        if key_byte < self.min || self.max < key_byte {
            return None;
        }

        let idx = self.index_of(key_byte);
        self.children.get_mut(idx)
    }
}
