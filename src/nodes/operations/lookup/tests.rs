use crate::{
    insert_unchecked, search_subtree, search_subtree_path, search_unchecked, search_unchecked_mut,
    InsertResult, NodeLimits, TrieNode,
};

fn build(keys: &[&str], limits: &NodeLimits) -> Box<TrieNode<String>> {
    let mut root = None;
    for key in keys {
        assert_eq!(
            insert_unchecked(&mut root, String::from(*key), false, limits),
            InsertResult::Inserted
        );
    }
    root.unwrap()
}

#[test]
fn exact_search_finds_inner_and_leaf_items() {
    let root = build(&["car", "card", "care", "cat"], &NodeLimits::default());

    for key in ["car", "card", "care", "cat"] {
        let node = search_unchecked(&root, key.as_bytes()).unwrap();
        assert_eq!(node.item().map(String::as_str), Some(key));
    }

    // "ca" is the root prefix, which holds no item
    let node = search_unchecked(&root, b"ca").unwrap();
    assert_eq!(node.item(), None);

    assert!(search_unchecked(&root, b"c").is_none());
    assert!(search_unchecked(&root, b"cards").is_none());
    assert!(search_unchecked(&root, b"cab").is_none());
    assert!(search_unchecked(&root, b"dog").is_none());
}

#[test]
fn subtree_search_accepts_queries_ending_inside_a_prefix() {
    let root = build(&["abcdef", "abcxyz"], &NodeLimits::default());

    let found = search_subtree(&root, b"abcd").unwrap();
    assert_eq!(found.node.prefix(), b"def");
    assert_eq!(found.leftover, b"ef");
    assert_eq!(found.key_len, 6);
    assert!(!found.is_exact());

    let found = search_subtree(&root, b"ab").unwrap();
    assert_eq!(found.node.prefix(), b"abc");
    assert_eq!(found.leftover, b"c");
    assert_eq!(found.key_len, 3);

    let found = search_subtree(&root, b"abcxyz").unwrap();
    assert!(found.is_exact());
    assert_eq!(found.node.item().map(String::as_str), Some("abcxyz"));

    assert!(search_subtree(&root, b"abce").is_none());
    assert!(search_subtree(&root, b"abcdefg").is_none());
    assert!(search_subtree(&root, b"b").is_none());
}

#[test]
fn subtree_search_walks_long_chains() {
    let limits = NodeLimits {
        max_prefix_per_node: 2,
        ..NodeLimits::default()
    };
    let root = build(&["abcdefg"], &limits);

    let found = search_subtree(&root, b"abcde").unwrap();
    assert_eq!(found.node.prefix(), b"ef");
    assert_eq!(found.leftover, b"f");
    assert_eq!(found.key_len, 6);

    let node = search_unchecked(&root, b"abcdefg").unwrap();
    assert_eq!(node.prefix(), b"g");
}

#[test]
fn mutable_search_allows_updating_items() {
    let mut root = build(&["car", "cat"], &NodeLimits::default());

    let node = search_unchecked_mut(&mut root, b"cat").unwrap();
    node.item.as_mut().unwrap().push('!');

    assert_eq!(
        search_unchecked(&root, b"cat").unwrap().item().map(String::as_str),
        Some("cat!")
    );
    assert!(search_unchecked_mut(&mut root, b"c").is_none());
    assert!(search_unchecked_mut(&mut root, b"cart").is_none());
}

#[test]
fn subtree_path_records_leading_bytes_and_anchors() {
    let root = build(&["car", "card", "care", "cat", "dog"], &NodeLimits::default());

    // "" -> {"ca" -> {"r" -> {"d", "e"}, "t"}, "dog"}
    let path = search_subtree_path(&root, b"card").unwrap();
    assert_eq!(path.key_bytes, b"crd");
    assert_eq!(path.anchors, [true, true, true, true]);
    assert_eq!(path.leftover_len, 0);
    assert_eq!(path.depth(), 3);

    let path = search_subtree_path(&root, b"do").unwrap();
    assert_eq!(path.key_bytes, b"d");
    assert_eq!(path.anchors, [true, true]);
    assert_eq!(path.leftover_len, 1);

    let path = search_subtree_path(&root, b"c").unwrap();
    assert_eq!(path.key_bytes, b"c");
    assert_eq!(path.leftover_len, 1);

    assert!(search_subtree_path(&root, b"cab").is_none());
}

#[test]
fn subtree_path_marks_chain_links_as_removable() {
    let limits = NodeLimits {
        max_prefix_per_node: 2,
        ..NodeLimits::default()
    };
    let root = build(&["ab", "abcdef"], &limits);

    // "ab"(item) -> "cd" -> "ef"(item)
    let path = search_subtree_path(&root, b"abcdef").unwrap();
    assert_eq!(path.key_bytes, b"ce");
    assert_eq!(path.anchors, [true, false, true]);
}
