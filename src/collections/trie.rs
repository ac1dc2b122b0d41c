//! Module containing the implementation of the [`Trie`] and its options,
//! errors and serialization.

use crate::{
    delete_subtree_unchecked, delete_unchecked, insert_unchecked, search_subtree,
    search_unchecked, search_unchecked_mut, walk_prefixes, walk_subtree, AsBytes, InsertResult,
    Keyed, NodeLimits, TrieNode, Walk,
};
use std::{convert::Infallible, fmt};

mod error;
mod options;
mod serialize;

pub use error::*;
pub use options::*;


/// A compressed prefix tree holding items keyed by byte strings.
///
/// Every item carries its own key (see [`Keyed`]). Each node stores a fragment
/// of at most `max_prefix_per_node` key bytes, and its children are kept in a
/// small unordered list until there are more than
/// `max_children_per_sparse_node` of them, after which they move to an array
/// indexed by leading byte.
///
/// # Examples
///
/// ```rust
/// use sprig::{Trie, Walk};
///
/// let mut trie: Trie<String> = ["car", "card", "care", "cat"]
///     .into_iter()
///     .map(String::from)
///     .collect();
///
/// assert_eq!(trie.get("car").map(String::as_str), Some("car"));
/// assert!(trie.contains_subtree("ca"));
///
/// assert!(trie.delete("card"));
/// assert!(!trie.contains_key("card"));
/// assert!(trie.contains_key("care"));
///
/// let mut keys = Vec::new();
/// trie.visit(|key, _| {
///     keys.push(String::from_utf8_lossy(key).into_owned());
///     Ok::<_, std::convert::Infallible>(Walk::Continue)
/// })
/// .unwrap();
/// assert_eq!(keys, ["car", "care", "cat"]);
/// ```
#[derive(Clone)]
pub struct Trie<T> {
    /// The number of items present in the trie.
    num_items: usize,
    /// The root node, absent when the trie is empty and was not given an
    /// initial prefix.
    root: Option<Box<TrieNode<T>>>,
    limits: NodeLimits,
    options: TrieOptions,
}

impl<T> Trie<T> {
    /// Create a new, empty [`Trie`] with the default limits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sprig::Trie;
    ///
    /// let trie = Trie::<String>::new();
    /// assert!(trie.is_empty());
    /// assert_eq!(trie.node_count(), 0);
    /// ```
    pub fn new() -> Self {
        Self::with_options(TrieOptions::default())
    }

    /// Create a new, empty [`Trie`] configured by `options`.
    pub fn with_options(options: TrieOptions) -> Self {
        let limits = options.limits();
        let root = options
            .prefix
            .as_ref()
            .map(|prefix| Box::new(TrieNode::new(prefix.clone(), &limits)));

        Trie {
            num_items: 0,
            root,
            limits,
            options,
        }
    }

    /// The options this trie was created with.
    pub fn options(&self) -> &TrieOptions {
        &self.options
    }

    /// The limits every node of this trie is built under.
    pub fn limits(&self) -> &NodeLimits {
        &self.limits
    }

    /// The root node of the trie, if there is one.
    pub fn root(&self) -> Option<&TrieNode<T>> {
        self.root.as_deref()
    }

    /// The prefix fragment held by the root node.
    ///
    /// This is the configured initial prefix until the first insert, and
    /// afterwards the longest prefix shared by every key in the trie, capped
    /// at `max_prefix_per_node` bytes.
    pub fn root_prefix(&self) -> Option<&[u8]> {
        self.root().map(TrieNode::prefix)
    }

    /// Returns the number of items in the trie.
    pub fn len(&self) -> usize {
        self.num_items
    }

    /// Returns true if the trie contains no items.
    pub fn is_empty(&self) -> bool {
        self.num_items == 0
    }

    /// Returns the number of nodes in the trie, including nodes which only
    /// hold a key fragment and no item.
    pub fn node_count(&self) -> usize {
        self.root().map_or(0, TrieNode::total)
    }

    /// Remove every item, returning the trie to the state it was created in.
    pub fn clear(&mut self) {
        *self = Trie::with_options(self.options.clone());
    }

    /// Returns a reference to the item stored under exactly `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        Q: AsBytes + ?Sized,
    {
        search_unchecked(self.root()?, key.as_bytes())?.item()
    }

    /// Returns a mutable reference to the item stored under exactly `key`.
    ///
    /// The key of the item must not be changed through the returned
    /// reference, otherwise the item can no longer be found under its key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut T>
    where
        Q: AsBytes + ?Sized,
    {
        search_unchecked_mut(self.root.as_deref_mut()?, key.as_bytes())?
            .item
            .as_mut()
    }

    /// Returns the item stored under exactly `key`.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::NotFound`] if there is no such item.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sprig::{Trie, TrieError};
    ///
    /// let trie: Trie<String> = ["car"].into_iter().map(String::from).collect();
    ///
    /// assert_eq!(trie.find("car").unwrap(), "car");
    /// assert_eq!(
    ///     trie.find("ca"),
    ///     Err(TrieError::NotFound { key: b"ca".to_vec() })
    /// );
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Result<&T, TrieError>
    where
        Q: AsBytes + ?Sized,
    {
        self.get(key).ok_or_else(|| TrieError::NotFound {
            key: key.as_bytes().to_vec(),
        })
    }

    /// Returns true if an item is stored under exactly `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: AsBytes + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns true if some node of the trie has a key starting with
    /// `prefix`. Always false for a trie without items.
    pub fn contains_subtree<Q>(&self, prefix: &Q) -> bool
    where
        Q: AsBytes + ?Sized,
    {
        !self.is_empty()
            && self
                .root()
                .and_then(|root| search_subtree(root, prefix.as_bytes()))
                .is_some()
    }

    /// Call `visitor` with every item and its key, in lexicographic key
    /// order.
    ///
    /// Returning [`Walk::SkipSubtree`] skips the items below the current one.
    /// Returning an error stops the walk and hands the error back.
    pub fn visit<'a, E, F>(&'a self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
    {
        match self.root() {
            Some(root) => walk_subtree(root, &mut Vec::new(), &mut visitor),
            None => Ok(()),
        }
    }

    /// Like [`Trie::visit`], but only for the items whose key starts with
    /// `prefix`. Does nothing if there are none.
    ///
    /// # Panics
    ///  - Panics if `prefix` is empty.
    pub fn visit_subtree<'a, Q, E, F>(&'a self, prefix: &Q, mut visitor: F) -> Result<(), E>
    where
        Q: AsBytes + ?Sized,
        F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
    {
        let prefix = prefix.as_bytes();
        assert!(!prefix.is_empty(), "empty key passed to `Trie::visit_subtree`");

        let Some(found) = self.root().and_then(|root| search_subtree(root, prefix)) else {
            return Ok(());
        };

        let mut key = prefix[..found.key_len - found.node.prefix().len()].to_vec();
        walk_subtree(found.node, &mut key, &mut visitor)
    }

    /// Call `visitor` with every item whose key is a prefix of `key`,
    /// shortest first. An item stored under exactly `key` is included.
    ///
    /// # Panics
    ///  - Panics if `key` is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sprig::{Trie, Walk};
    ///
    /// let trie: Trie<String> = ["a", "abc", "abcdef", "xyz"]
    ///     .into_iter()
    ///     .map(String::from)
    ///     .collect();
    ///
    /// let mut found = Vec::new();
    /// trie.visit_prefixes("abcdefgh", |_, item| {
    ///     found.push(item.as_str());
    ///     Ok::<_, std::convert::Infallible>(Walk::Continue)
    /// })
    /// .unwrap();
    /// assert_eq!(found, ["a", "abc", "abcdef"]);
    /// ```
    pub fn visit_prefixes<'a, Q, E, F>(&'a self, key: &Q, mut visitor: F) -> Result<(), E>
    where
        Q: AsBytes + ?Sized,
        F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
    {
        let key = key.as_bytes();
        assert!(!key.is_empty(), "empty key passed to `Trie::visit_prefixes`");

        match self.root() {
            Some(root) => walk_prefixes(root, key, &mut visitor),
            None => Ok(()),
        }
    }

    /// Collect references to every item, in lexicographic key order.
    pub fn list(&self) -> Vec<&T> {
        let mut items = Vec::with_capacity(self.num_items);
        let Ok(()) = self.visit(|_, item| {
            items.push(item);
            Ok::<_, Infallible>(Walk::Continue)
        });
        items
    }

    /// Remove the item stored under exactly `key` and return it.
    ///
    /// # Panics
    ///  - Panics if `key` is empty.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        Q: AsBytes + ?Sized,
    {
        let key = key.as_bytes();
        assert!(!key.is_empty(), "empty key passed to `Trie::remove`");

        let item = delete_unchecked(&mut self.root, key, &self.limits)?;
        self.num_items -= 1;
        Some(item)
    }

    /// Remove the item stored under exactly `key`. Returns false if there
    /// was no such item.
    ///
    /// # Panics
    ///  - Panics if `key` is empty.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        Q: AsBytes + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Remove every item whose key starts with `prefix`. Returns false if
    /// there were none.
    ///
    /// # Panics
    ///  - Panics if `prefix` is empty.
    pub fn delete_subtree<Q>(&mut self, prefix: &Q) -> bool
    where
        Q: AsBytes + ?Sized,
    {
        let prefix = prefix.as_bytes();
        assert!(
            !prefix.is_empty(),
            "empty key passed to `Trie::delete_subtree`"
        );
        if self.is_empty() {
            return false;
        }

        match delete_subtree_unchecked(&mut self.root, prefix, &self.limits) {
            Some(removed) => {
                self.num_items -= removed;
                true
            },
            None => false,
        }
    }
}

impl<T: Keyed> Trie<T> {
    /// Insert an item under its key, unless an item is already stored there.
    ///
    /// Returns true if the item was inserted. An existing item is left
    /// untouched and the new one is dropped.
    ///
    /// # Panics
    ///  - Panics if the key of the item is empty.
    pub fn insert(&mut self, item: T) -> bool {
        assert!(
            !item.key().as_bytes().is_empty(),
            "empty key passed to `Trie::insert`"
        );

        match insert_unchecked(&mut self.root, item, false, &self.limits) {
            InsertResult::Inserted => {
                self.num_items += 1;
                true
            },
            InsertResult::Rejected(_) => false,
            InsertResult::Replaced(_) => unreachable!("insert never replaces an existing item"),
        }
    }

    /// Insert an item under its key, replacing and returning any item that
    /// was already stored there.
    ///
    /// # Panics
    ///  - Panics if the key of the item is empty.
    pub fn set(&mut self, item: T) -> Option<T> {
        assert!(
            !item.key().as_bytes().is_empty(),
            "empty key passed to `Trie::set`"
        );

        match insert_unchecked(&mut self.root, item, true, &self.limits) {
            InsertResult::Inserted => {
                self.num_items += 1;
                None
            },
            InsertResult::Replaced(existing) => Some(existing),
            InsertResult::Rejected(_) => unreachable!("set always replaces an existing item"),
        }
    }
}

impl<T> Default for Trie<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Trie<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list()).finish()
    }
}

impl<T: PartialEq> PartialEq for Trie<T> {
    fn eq(&self, other: &Self) -> bool {
        self.num_items == other.num_items && self.list() == other.list()
    }
}

impl<T: Eq> Eq for Trie<T> {}

impl<T: Keyed> Extend<T> for Trie<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            let _ = self.set(item);
        }
    }
}

impl<T: Keyed> FromIterator<T> for Trie<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

impl<T: Keyed, const N: usize> From<[T; N]> for Trie<T> {
    fn from(items: [T; N]) -> Self {
        items.into_iter().collect()
    }
}
