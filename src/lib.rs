#![deny(
    missing_docs,
    clippy::missing_panics_doc,
    deprecated_in_future,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    rustdoc::invalid_codeblock_attributes
)]
#![doc(
    html_playground_url = "https://play.rust-lang.org/",
    test(attr(deny(warnings)))
)]

//! Compressed prefix tree (radix trie) implementation
//!
//! A [`Trie`] stores items which carry their own byte-string key. Keys are
//! decomposed into bounded fragments held by the nodes along the path from
//! the root, and every node keeps its children either in a small unordered
//! list or, once it has many of them, in an array indexed by leading byte.
//!
//! Besides exact lookups the trie answers subtree queries (is any key
//! starting with this prefix stored?) and prefix queries (which stored keys
//! are prefixes of this key?), and walks items in lexicographic key order
//! with the option to skip whole subtrees.
//!
//! # Examples
//!
//! ```rust
//! use sprig::{Trie, TrieOptions, Walk};
//!
//! let mut routes = Trie::with_options(TrieOptions::default().max_children_per_sparse_node(4));
//! routes.insert((String::from("/"), "index"));
//! routes.insert((String::from("/users"), "list users"));
//! routes.insert((String::from("/users/profile"), "show profile"));
//!
//! let mut handlers = Vec::new();
//! routes
//!     .visit_prefixes("/users/profile/edit", |_, (_, handler)| {
//!         handlers.push(*handler);
//!         Ok::<_, std::convert::Infallible>(Walk::Continue)
//!     })
//!     .unwrap();
//! assert_eq!(handlers, ["index", "list users", "show profile"]);
//! ```

mod bytes;
mod collections;
mod nodes;

#[doc(hidden)]
pub mod tests_common;

pub use bytes::*;
pub use collections::*;
pub use nodes::{visitor, *};
