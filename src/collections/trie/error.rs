/// Errors returned by fallible [`Trie`](crate::Trie) lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// No item is stored under the requested key
    #[error("no item with the prefix {} available", String::from_utf8_lossy(.key))]
    NotFound {
        /// The key that was looked up
        key: Vec<u8>,
    },
}
