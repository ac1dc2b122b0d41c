use crate::{AsBytes, Keyed, Trie, Walk};
use serde::{
    de::{self, DeserializeSeed, SeqAccess, Visitor},
    ser::SerializeSeq,
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// A trie is written as the sequence of its items in key order. The shape of
/// the trie is not part of the output.
impl<T: Serialize> Serialize for Trie<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        self.visit(|_, item| seq.serialize_element(item).map(|()| Walk::Continue))?;
        seq.end()
    }
}

/// Reads a sequence of items into a trie with default options. Items with a
/// key that was already seen overwrite the earlier item.
impl<'de, T> Deserialize<'de> for Trie<T>
where
    T: Keyed + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut trie = Trie::new();
        DeserializeSeed::deserialize(&mut trie, deserializer)?;
        Ok(trie)
    }
}

/// Reads a sequence of items into an existing trie, keeping its options and
/// any items it already holds.
///
/// # Examples
///
/// ```rust
/// use serde::de::DeserializeSeed;
/// use sprig::{Trie, TrieOptions};
///
/// let mut trie = Trie::<String>::with_options(TrieOptions::default().max_prefix_per_node(2));
/// let mut deserializer = serde_json::Deserializer::from_str(r#"["card", "care"]"#);
/// (&mut trie).deserialize(&mut deserializer).unwrap();
///
/// assert_eq!(trie.len(), 2);
/// assert_eq!(trie.options().max_prefix_per_node, 2);
/// ```
impl<'de, T> DeserializeSeed<'de> for &mut Trie<T>
where
    T: Keyed + Deserialize<'de>,
{
    type Value = ();

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(TrieItemsVisitor { trie: self })
    }
}

struct TrieItemsVisitor<'a, T> {
    trie: &'a mut Trie<T>,
}

impl<'de, T> Visitor<'de> for TrieItemsVisitor<'_, T>
where
    T: Keyed + Deserialize<'de>,
{
    type Value = ();

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of trie items")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while let Some(item) = seq.next_element::<T>()? {
            if item.key().as_bytes().is_empty() {
                return Err(de::Error::invalid_value(
                    de::Unexpected::Other("item with an empty key"),
                    &self,
                ));
            }
            let _ = self.trie.set(item);
        }

        Ok(())
    }
}
