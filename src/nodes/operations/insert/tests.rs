use crate::{
    delete_unchecked, insert_unchecked, search_unchecked,
    tests_common::{
        generate_key_fixed_length, generate_key_with_prefix, generate_keys_skewed, Entry,
        PrefixExpansion,
    },
    visitor::WellFormedChecker,
    ChildListType, InsertResult, NodeLimits, TrieNode,
};

fn limits(max_prefix_per_node: usize, max_children_per_sparse_node: usize) -> NodeLimits {
    NodeLimits {
        max_prefix_per_node,
        max_children_per_sparse_node,
    }
}

fn child_prefixes<T>(node: &TrieNode<T>) -> Vec<&[u8]> {
    node.children().sorted().into_iter().map(TrieNode::prefix).collect()
}

#[test]
fn first_insert_builds_a_chain_of_bounded_fragments() {
    let limits = limits(3, 8);
    let mut root = None;

    let result = insert_unchecked(&mut root, String::from("abcdefgh"), false, &limits);
    assert_eq!(result, InsertResult::Inserted);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"abc");
    assert_eq!(root.item(), None);
    assert_eq!(child_prefixes(&root), [b"def"]);

    let link = root.children().head();
    assert_eq!(child_prefixes(link), [b"gh"]);
    assert_eq!(
        link.children().head().item().map(String::as_str),
        Some("abcdefgh")
    );
    assert_eq!(
        WellFormedChecker::check_tree(Some(&*root), &limits, 1),
        Ok(3)
    );
}

#[test]
fn diverging_keys_split_the_shared_prefix() {
    let limits = NodeLimits::default();
    let mut root = None;
    for key in ["car", "cat"] {
        assert_eq!(
            insert_unchecked(&mut root, String::from(key), false, &limits),
            InsertResult::Inserted
        );
    }

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"ca");
    assert_eq!(root.item(), None);
    assert_eq!(child_prefixes(&root), [b"r", b"t"]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 2), Ok(3));
}

#[test]
fn shorter_key_lands_on_the_split_point() {
    let limits = NodeLimits::default();
    let mut root = None;
    let _ = insert_unchecked(&mut root, String::from("card"), false, &limits);
    let _ = insert_unchecked(&mut root, String::from("car"), false, &limits);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"car");
    assert_eq!(root.item().map(String::as_str), Some("car"));
    assert_eq!(child_prefixes(&root), [b"d"]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 2), Ok(2));
}

#[test]
fn divergence_at_the_first_byte_leaves_an_empty_root() {
    let limits = NodeLimits::default();
    let mut root = None;
    let _ = insert_unchecked(&mut root, String::from("car"), false, &limits);
    let _ = insert_unchecked(&mut root, String::from("dog"), false, &limits);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"");
    assert_eq!(child_prefixes(&root), [b"car", b"dog"]);
}

#[test]
fn existing_items_are_replaced_only_on_request() {
    let limits = NodeLimits::default();
    let mut root = None;
    let _ = insert_unchecked(&mut root, Entry::new("key", 1), false, &limits);

    assert_eq!(
        insert_unchecked(&mut root, Entry::new("key", 2), false, &limits),
        InsertResult::Rejected(Entry::new("key", 2))
    );
    assert_eq!(
        search_unchecked(root.as_deref().unwrap(), b"key")
            .and_then(TrieNode::item)
            .map(|entry| entry.value),
        Some(1)
    );

    assert_eq!(
        insert_unchecked(&mut root, Entry::new("key", 3), true, &limits),
        InsertResult::Replaced(Entry::new("key", 1))
    );
    assert_eq!(
        search_unchecked(root.as_deref().unwrap(), b"key")
            .and_then(TrieNode::item)
            .map(|entry| entry.value),
        Some(3)
    );
}

#[test]
fn item_on_a_vacant_split_point_is_inserted() {
    let limits = NodeLimits::default();
    let mut root = None;
    let _ = insert_unchecked(&mut root, String::from("car"), false, &limits);
    let _ = insert_unchecked(&mut root, String::from("cat"), false, &limits);

    // "ca" exists as a node without an item
    assert_eq!(
        insert_unchecked(&mut root, String::from("ca"), false, &limits),
        InsertResult::Inserted
    );
    let root = root.unwrap();
    assert_eq!(root.item().map(String::as_str), Some("ca"));
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 3), Ok(3));
}

#[test]
fn full_sparse_list_is_promoted_to_dense() {
    let limits = limits(10, 2);
    let mut root = None;
    for key in ["a", "b"] {
        let _ = insert_unchecked(&mut root, String::from(key), false, &limits);
    }
    assert_eq!(
        root.as_ref().unwrap().children().list_type(),
        ChildListType::Sparse
    );

    let _ = insert_unchecked(&mut root, String::from("c"), false, &limits);
    let root = root.unwrap();
    assert_eq!(root.children().list_type(), ChildListType::Dense);
    assert_eq!(child_prefixes(&root), [b"a", b"b", b"c"]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 3), Ok(4));
}

#[test]
fn unused_root_prefix_is_truncated_on_divergence() {
    let limits = NodeLimits::default();
    let mut root = Some(Box::new(TrieNode::new(b"xyz".to_vec(), &limits)));

    let _ = insert_unchecked(&mut root, String::from("xa"), false, &limits);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"x");
    assert_eq!(child_prefixes(&root), [b"a"]);
    assert_eq!(root.total(), 2);
}

#[test]
fn key_inside_unused_root_prefix_is_stored_at_the_root() {
    let limits = NodeLimits::default();
    let mut root = Some(Box::new(TrieNode::new(b"xyz".to_vec(), &limits)));

    let _ = insert_unchecked(&mut root, String::from("xy"), false, &limits);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"xy");
    assert_eq!(root.item().map(String::as_str), Some("xy"));
    assert_eq!(root.total(), 1);
}

#[test]
fn split_tail_is_merged_with_its_only_child() {
    let limits = limits(5, 8);
    let mut root = None;
    // "abcde" -> "f"
    let _ = insert_unchecked(&mut root, String::from("abcdef"), false, &limits);
    // Splitting "abcde" at 1 leaves a tail "bcde" which fits together with "f"
    let _ = insert_unchecked(&mut root, String::from("ax"), false, &limits);

    let root = root.unwrap();
    assert_eq!(root.prefix(), b"a");
    assert_eq!(child_prefixes(&root), [b"bcdef".as_slice(), b"x".as_slice()]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 2), Ok(3));
}

fn build_unmergeable_link(limits: &NodeLimits) -> Option<Box<TrieNode<String>>> {
    let mut root = None;
    for key in ["ab", "acd", "x"] {
        let _ = insert_unchecked(&mut root, String::from(key), false, limits);
    }
    // "a" keeps its only child "cd", together they are over the limit
    assert_eq!(delete_unchecked(&mut root, b"ab", limits).as_deref(), Some("ab"));
    assert_eq!(WellFormedChecker::check_tree(root.as_deref(), limits, 2), Ok(4));
    root
}

#[test]
fn split_below_a_hollow_link_merges_the_link() {
    let limits = limits(2, 8);
    let mut root = build_unmergeable_link(&limits);

    // "cd" is split into "c" -> {"d", "e"}, and "a" now fits together with "c"
    let _ = insert_unchecked(&mut root, String::from("ace"), false, &limits);

    let root = root.unwrap();
    assert_eq!(child_prefixes(&root), [b"ac".as_slice(), b"x".as_slice()]);
    let merged = root.children().next(b'a').unwrap();
    assert!(merged.item().is_none());
    assert_eq!(child_prefixes(merged), [b"d".as_slice(), b"e".as_slice()]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 3), Ok(5));
    assert_eq!(
        search_unchecked(&root, b"ace").and_then(TrieNode::item).map(String::as_str),
        Some("ace")
    );
}

#[test]
fn item_on_a_split_below_a_hollow_link_merges_the_link() {
    let limits = limits(2, 8);
    let mut root = build_unmergeable_link(&limits);

    let _ = insert_unchecked(&mut root, String::from("ac"), false, &limits);

    let root = root.unwrap();
    let merged = root.children().next(b'a').unwrap();
    assert_eq!(merged.prefix(), b"ac");
    assert_eq!(merged.item().map(String::as_str), Some("ac"));
    assert_eq!(child_prefixes(merged), [b"d".as_slice()]);
    assert_eq!(WellFormedChecker::check_tree(Some(&*root), &limits, 3), Ok(4));
}

fn check_inserts_stay_well_formed(limits: NodeLimits) {
    let keys: Vec<Box<[u8]>> = generate_key_fixed_length(2, 15)
        .chain(generate_keys_skewed(20))
        .chain(generate_key_with_prefix(
            3,
            3,
            [PrefixExpansion {
                base_index: 1,
                expanded_length: 12,
            }],
        ))
        .collect();

    let mut root = None;
    for (count, key) in keys.iter().enumerate() {
        assert_eq!(
            insert_unchecked(&mut root, key.clone(), false, &limits),
            InsertResult::Inserted
        );
        if let Err(err) = WellFormedChecker::check_tree(root.as_deref(), &limits, count + 1) {
            panic!("trie malformed after inserting {key:?}: {err}");
        }
    }

    let root = root.unwrap();
    for key in &keys {
        let found = search_unchecked(&root, key).and_then(TrieNode::item);
        assert_eq!(found, Some(key));
    }
}

macro_rules! inserts_stay_well_formed {
    ($($name:ident => ($max_prefix:expr, $max_sparse:expr)),* $(,)?) => {
        paste::paste! {
            $(
                #[test]
                fn [<inserts_stay_well_formed_ $name>]() {
                    check_inserts_stay_well_formed(limits($max_prefix, $max_sparse));
                }
            )*
        }
    };
}

inserts_stay_well_formed!(
    single_byte_fragments => (1, 1),
    short_fragments => (2, 3),
    default_limits => (10, 8),
    wide_sparse_lists => (16, 32),
);
