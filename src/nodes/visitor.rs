//! Utilities for inspecting the trie structure.

mod pretty_printer;
mod tree_stats;
mod well_formed;

use crate::{ChildList, DenseChildList, SparseChildList, TrieNode};
pub use pretty_printer::*;
pub use tree_stats::*;
pub use well_formed::*;

/// The `Visitable` trait allows [`Visitor`]s to traverse the structure of the
/// implementing type and produce some output.
pub trait Visitable<T> {
    /// This function provides the default traversal behavior for the
    /// implementing type.
    ///
    /// The implementation should call `visit_with(visitor)` for all relevant
    /// sub-fields of the type. If there are no relevant sub-fields, it should
    /// just produce the default output.
    fn super_visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output;

    /// This function will traverse the implementing type and execute any
    /// specific logic from the given [`Visitor`].
    ///
    /// This function should be overridden for types that have corresponding
    /// hooks in the [`Visitor`] trait. For example the [`Visitable`]
    /// implementation for [`TrieNode`] looks like:
    ///
    /// ```rust,compile_fail
    /// impl<T> Visitable<T> for TrieNode<T> {
    ///     ...
    ///
    ///     fn visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
    ///         visitor.visit_node(self)
    ///     }
    /// }
    /// ```
    ///
    /// The call to `visitor.visit_node(self)` allows the visitor to execute
    /// specific handling logic.
    fn visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        self.super_visit_with(visitor)
    }
}

impl<T> Visitable<T> for TrieNode<T> {
    fn super_visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        self.children.visit_with(visitor)
    }

    fn visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_node(self)
    }
}

impl<T> Visitable<T> for ChildList<T> {
    fn super_visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        match self {
            ChildList::Sparse(list) => list.visit_with(visitor),
            ChildList::Dense(list) => list.visit_with(visitor),
        }
    }
}

impl<T> Visitable<T> for SparseChildList<T> {
    fn super_visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        combine_child_output(self.iter(), visitor)
    }

    fn visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_sparse(self)
    }
}

impl<T> Visitable<T> for DenseChildList<T> {
    fn super_visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        combine_child_output(self.iter(), visitor)
    }

    fn visit_with<V: Visitor<T>>(&self, visitor: &mut V) -> V::Output {
        visitor.visit_dense(self)
    }
}

/// The `Visitor` trait allows creating new operations on the trie by
/// overriding specific handling methods for each of the node types.
pub trait Visitor<T>: Sized {
    /// The type of value that the visitor produces.
    type Output;

    /// Produce the default value of the [`Self::Output`] type.
    fn default_output(&self) -> Self::Output;

    /// Combine two instances of the [`Self::Output`] type for this [`Visitor`].
    fn combine_output(&self, o1: Self::Output, o2: Self::Output) -> Self::Output;

    /// Visit a [`TrieNode`].
    fn visit_node(&mut self, t: &TrieNode<T>) -> Self::Output {
        t.super_visit_with(self)
    }

    /// Visit a [`SparseChildList`].
    fn visit_sparse(&mut self, t: &SparseChildList<T>) -> Self::Output {
        t.super_visit_with(self)
    }

    /// Visit a [`DenseChildList`].
    fn visit_dense(&mut self, t: &DenseChildList<T>) -> Self::Output {
        t.super_visit_with(self)
    }
}

fn combine_child_output<'a, T: 'a, V: Visitor<T>>(
    mut iter: impl Iterator<Item = &'a TrieNode<T>>,
    visitor: &mut V,
) -> V::Output {
    if let Some(first) = iter.next() {
        let mut accum = first.visit_with(visitor);
        for child in iter {
            let output = child.visit_with(visitor);
            accum = visitor.combine_output(accum, output);
        }

        accum
    } else {
        visitor.default_output()
    }
}
