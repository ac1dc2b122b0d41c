use crate::TrieNode;


/// What a visitor wants the walk to do after seeing an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Walk {
    /// Keep walking, descending into the children of the current node.
    #[default]
    Continue,
    /// Do not descend into the children of the current node, but carry on
    /// with the rest of the walk.
    SkipSubtree,
}

/// Visit every item at and below `node` in lexicographic key order.
///
/// `key` must hold the bytes leading up to `node`. It is used as scratch
/// space while walking and is left unchanged on return. The walk stops at the
/// first error returned by the visitor.
pub fn walk_subtree<'a, T, E, F>(
    node: &'a TrieNode<T>,
    key: &mut Vec<u8>,
    visitor: &mut F,
) -> Result<(), E>
where
    F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
{
    let depth = key.len();
    key.extend_from_slice(&node.prefix);

    let result = walk_node_contents(node, key, visitor);

    key.truncate(depth);
    result
}

fn walk_node_contents<'a, T, E, F>(
    node: &'a TrieNode<T>,
    key: &mut Vec<u8>,
    visitor: &mut F,
) -> Result<(), E>
where
    F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
{
    if let Some(item) = &node.item {
        if visitor(key.as_slice(), item)? == Walk::SkipSubtree {
            return Ok(());
        }
    }

    for child in node.children.sorted() {
        walk_subtree(child, key, visitor)?;
    }

    Ok(())
}

/// Visit every item whose key is a prefix of `key`, from the shortest to the
/// longest. An item stored exactly under `key` is included.
///
/// Returning [`Walk::SkipSubtree`] from the visitor ends the walk, since every
/// remaining candidate lies below the current node.
pub fn walk_prefixes<'a, T, E, F>(
    root: &'a TrieNode<T>,
    key: &[u8],
    visitor: &mut F,
) -> Result<(), E>
where
    F: FnMut(&[u8], &'a T) -> Result<Walk, E>,
{
    let mut node = root;
    let mut depth = 0;

    loop {
        let common = node.longest_common_prefix_len(&key[depth..]);
        if common < node.prefix.len() {
            return Ok(());
        }
        depth += common;

        if let Some(item) = &node.item {
            if visitor(&key[..depth], item)? == Walk::SkipSubtree {
                return Ok(());
            }
        }

        if depth == key.len() {
            return Ok(());
        }

        node = match node.children.next(key[depth]) {
            Some(child) => child,
            None => return Ok(()),
        };
    }
}
