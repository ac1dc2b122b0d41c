//! Module containing the [`Trie`] collection and its configuration.

mod trie;
pub use trie::*;
