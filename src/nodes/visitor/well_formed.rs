use crate::{
    visitor::{Visitable, Visitor},
    AsBytes, ChildListType, DenseChildList, Keyed, NodeLimits, SparseChildList, Trie, TrieNode,
};
use std::fmt;

/// A portion of an entire key that uniquely identifies each node in the trie.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct KeyPrefix(Box<[u8]>);

impl From<&[u8]> for KeyPrefix {
    fn from(src: &[u8]) -> Self {
        KeyPrefix(Box::from(src))
    }
}

impl<const LEN: usize> PartialEq<[u8; LEN]> for KeyPrefix {
    fn eq(&self, other: &[u8; LEN]) -> bool {
        self.0.as_ref() == other.as_slice()
    }
}

impl fmt::Debug for KeyPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0.escape_ascii().to_string())
    }
}

/// An issue with the well-formed-ness of the trie. See the documentation on
/// [`WellFormedChecker`] for more context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedTrieError {
    /// A node other than the root had an empty prefix
    #[error("found a child node at [{key_prefix:?}] with an empty prefix")]
    EmptyPrefix {
        /// The key prefix of the parent node
        key_prefix: KeyPrefix,
    },
    /// A node prefix was longer than the configured maximum
    #[error(
        "found a node at [{key_prefix:?}] with a prefix of [{prefix_len}] bytes, the maximum is \
         [{max_prefix_per_node}]"
    )]
    PrefixTooLong {
        /// The key prefix identifying the node
        key_prefix: KeyPrefix,
        /// Length of the node prefix
        prefix_len: usize,
        /// Maximum allowed length
        max_prefix_per_node: usize,
    },
    /// A node other than the root held neither an item nor children
    #[error("found a node at [{key_prefix:?}] with neither an item nor children")]
    VacantNode {
        /// The key prefix identifying the node
        key_prefix: KeyPrefix,
    },
    /// A node without an item had a single child which it could have been
    /// merged with
    #[error("found a node at [{key_prefix:?}] that should have been merged with its only child")]
    UncompactedNode {
        /// The key prefix identifying the node
        key_prefix: KeyPrefix,
    },
    /// A child was stored under a different byte than its leading byte
    #[error(
        "found a child at [{key_prefix:?}] stored under byte [{slot_byte}] but its prefix starts \
         with [{leading_byte}]"
    )]
    MisplacedChild {
        /// The key prefix identifying the child node
        key_prefix: KeyPrefix,
        /// The byte the child was stored under
        slot_byte: u8,
        /// The first byte of the child prefix
        leading_byte: u8,
    },
    /// Two children of the same node share a leading byte
    #[error("found two children under [{key_prefix:?}] with the leading byte [{leading_byte}]")]
    DuplicateLeadingByte {
        /// The key prefix of the parent node
        key_prefix: KeyPrefix,
        /// The repeated leading byte
        leading_byte: u8,
    },
    /// A child list recorded a different number of children than it holds
    #[error(
        "found a {list_type:?} child list at [{key_prefix:?}] recording [{recorded}] children \
         while holding [{actual}]"
    )]
    WrongChildrenCount {
        /// The key prefix of the parent node
        key_prefix: KeyPrefix,
        /// The representation of the child list
        list_type: ChildListType,
        /// The count the list reports
        recorded: usize,
        /// The number of children actually present
        actual: usize,
    },
    /// A sparse child list held more children than its capacity
    #[error(
        "found a sparse child list at [{key_prefix:?}] holding [{len}] children with a capacity \
         of [{capacity}]"
    )]
    SparseOverCapacity {
        /// The key prefix of the parent node
        key_prefix: KeyPrefix,
        /// The number of children present
        len: usize,
        /// The sparse capacity
        capacity: usize,
    },
    /// A dense child list tracked the wrong slot as its first occupied one
    #[error(
        "found a dense child list at [{key_prefix:?}] with head index [{recorded}], the first \
         occupied slot is [{actual}]"
    )]
    WrongHead {
        /// The key prefix of the parent node
        key_prefix: KeyPrefix,
        /// The index the list reports
        recorded: usize,
        /// The index of the first occupied slot
        actual: usize,
    },
    /// An item was stored at a node whose full key differs from the item key
    #[error("found an item at [{key_prefix:?}] whose key is [{item_key:?}]")]
    KeyMismatch {
        /// The full key of the node holding the item
        key_prefix: KeyPrefix,
        /// The key of the item
        item_key: KeyPrefix,
    },
    /// The number of items in the trie is different from its recorded length
    #[error("the trie records [{expected}] items but holds [{actual}]")]
    WrongItemCount {
        /// The recorded length
        expected: usize,
        /// The number of items found
        actual: usize,
    },
}

/// A visitor of the trie which checks that the trie is well-formed.
///
/// In this context, well-formed means that in the trie:
///  1. every node below the root has a non-empty prefix of at most
///     `max_prefix_per_node` bytes, and holds an item or children
///  2. every child is stored under its leading byte, no two siblings share a
///     leading byte, and child lists agree with their own bookkeeping
///  3. no node below the root has a single child and no item while the two
///     prefixes would fit in one node
///  4. every item sits at the node whose full key matches the item key
///
/// The root is exempt from #1 and #3, since it may carry a configured prefix
/// or an empty one.
///
/// This checker will only return a single issue at a time.
#[derive(Debug)]
pub struct WellFormedChecker {
    current_key_prefix: Vec<u8>,
    depth: usize,
    num_items: usize,
    limits: NodeLimits,
}

impl WellFormedChecker {
    /// Traverse the given trie and check that it is well-formed. Returns the
    /// number of nodes in the trie.
    ///
    /// # Errors
    ///
    /// Returns an error if the given trie is not well-formed.
    pub fn check<T: Keyed>(trie: &Trie<T>) -> Result<usize, MalformedTrieError> {
        Self::check_tree(trie.root(), trie.limits(), trie.len())
    }

    /// Traverse the trie below `root` and check that it is well-formed and
    /// holds exactly `num_items` items. Returns the number of nodes in the
    /// trie.
    ///
    /// # Errors
    ///
    /// Returns an error if the given trie is not well-formed.
    pub fn check_tree<T: Keyed>(
        root: Option<&TrieNode<T>>,
        limits: &NodeLimits,
        num_items: usize,
    ) -> Result<usize, MalformedTrieError> {
        let mut visitor = WellFormedChecker {
            current_key_prefix: vec![],
            depth: 0,
            num_items: 0,
            limits: *limits,
        };

        let num_nodes = match root {
            Some(root) => root.visit_with(&mut visitor)?,
            None => 0,
        };

        if visitor.num_items != num_items {
            return Err(MalformedTrieError::WrongItemCount {
                expected: num_items,
                actual: visitor.num_items,
            });
        }

        Ok(num_nodes)
    }

    fn key_prefix(&self) -> KeyPrefix {
        self.current_key_prefix.as_slice().into()
    }

    fn check_node<T: Keyed>(&mut self, node: &TrieNode<T>) -> Result<(), MalformedTrieError> {
        if self.depth > 0 {
            let prefix_len = node.prefix().len();
            if prefix_len == 0 {
                return Err(MalformedTrieError::EmptyPrefix {
                    key_prefix: self.key_prefix(),
                });
            }

            if prefix_len > self.limits.max_prefix_per_node {
                return Err(MalformedTrieError::PrefixTooLong {
                    key_prefix: self.key_prefix(),
                    prefix_len,
                    max_prefix_per_node: self.limits.max_prefix_per_node,
                });
            }

            if node.is_vacant() {
                return Err(MalformedTrieError::VacantNode {
                    key_prefix: self.key_prefix(),
                });
            }

            if crate::can_compact(node, &self.limits) {
                return Err(MalformedTrieError::UncompactedNode {
                    key_prefix: self.key_prefix(),
                });
            }
        }

        if let Some(item) = node.item() {
            let item_key = item.key().as_bytes();
            if item_key != self.current_key_prefix {
                return Err(MalformedTrieError::KeyMismatch {
                    key_prefix: self.key_prefix(),
                    item_key: item_key.into(),
                });
            }
            self.num_items += 1;
        }

        Ok(())
    }
}

impl<T: Keyed> Visitor<T> for WellFormedChecker {
    type Output = Result<usize, MalformedTrieError>;

    fn default_output(&self) -> Self::Output {
        Ok(0)
    }

    fn combine_output(&self, o1: Self::Output, o2: Self::Output) -> Self::Output {
        Ok(o1? + o2?)
    }

    fn visit_node(&mut self, t: &TrieNode<T>) -> Self::Output {
        let original_key_prefix_len = self.current_key_prefix.len();
        self.current_key_prefix.extend_from_slice(t.prefix());

        let result = self.check_node(t).and_then(|()| {
            self.depth += 1;
            let result = t.super_visit_with(self);
            self.depth -= 1;
            result
        });

        self.current_key_prefix.truncate(original_key_prefix_len);
        Ok(result? + 1)
    }

    fn visit_sparse(&mut self, t: &SparseChildList<T>) -> Self::Output {
        if t.len() > t.capacity() {
            return Err(MalformedTrieError::SparseOverCapacity {
                key_prefix: self.key_prefix(),
                len: t.len(),
                capacity: t.capacity(),
            });
        }

        let mut seen = [false; 256];
        for leading_byte in t.iter().filter_map(|child| child.prefix().first().copied()) {
            if std::mem::replace(&mut seen[usize::from(leading_byte)], true) {
                return Err(MalformedTrieError::DuplicateLeadingByte {
                    key_prefix: self.key_prefix(),
                    leading_byte,
                });
            }
        }

        t.super_visit_with(self)
    }

    fn visit_dense(&mut self, t: &DenseChildList<T>) -> Self::Output {
        let mut occupied = 0;
        let mut first_occupied = None;
        for (idx, (slot_byte, child)) in t.slots().enumerate() {
            let Some(child) = child else {
                continue;
            };

            occupied += 1;
            first_occupied.get_or_insert(idx);
            match child.prefix().first() {
                Some(&leading_byte) if leading_byte != slot_byte => {
                    let mut key_prefix = self.current_key_prefix.clone();
                    key_prefix.extend_from_slice(child.prefix());
                    return Err(MalformedTrieError::MisplacedChild {
                        key_prefix: key_prefix.as_slice().into(),
                        slot_byte,
                        leading_byte,
                    });
                },
                _ => {},
            }
        }

        if occupied != t.len() {
            return Err(MalformedTrieError::WrongChildrenCount {
                key_prefix: self.key_prefix(),
                list_type: ChildListType::Dense,
                recorded: t.len(),
                actual: occupied,
            });
        }

        let first_occupied = first_occupied.unwrap_or(t.num_slots());
        if t.head_index() != first_occupied {
            return Err(MalformedTrieError::WrongHead {
                key_prefix: self.key_prefix(),
                recorded: t.head_index(),
                actual: first_occupied,
            });
        }

        t.super_visit_with(self)
    }
}
