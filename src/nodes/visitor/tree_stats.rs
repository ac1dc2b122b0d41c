use crate::{
    visitor::{Visitable, Visitor},
    DenseChildList, NodeLimits, SparseChildList, Trie, TrieNode,
};
use std::{fmt, mem, ops::RangeInclusive};

/// A visitor of the trie which collects statistics about the trie, like how
/// many child lists of each representation there are and how full they are.
#[derive(Debug)]
pub struct TreeStatsCollector {
    stats: TreeStats,
}

impl TreeStatsCollector {
    /// Run the stats collection on the given trie, then return the accumulated
    /// stats.
    pub fn collect<T>(trie: &Trie<T>) -> TreeStats {
        Self::collect_tree(trie.root(), trie.limits())
    }

    /// Run the stats collection on the trie below `root`.
    pub fn collect_tree<T>(root: Option<&TrieNode<T>>, limits: &NodeLimits) -> TreeStats {
        let mut collector = TreeStatsCollector {
            stats: TreeStats::new(limits),
        };

        if let Some(root) = root {
            root.visit_with(&mut collector);
        }

        collector.stats
    }
}

/// Collection of stats about the nodes present in a trie
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    node_count: u64,
    item_count: u64,
    max_depth: usize,
    current_depth: usize,
    prefix_len_dist: ExactHistogram,
    sparse_num_children_dist: ExactHistogram,
    dense_num_children_dist: ExactHistogram,
    dense_num_slots: u64,
    total_node_bytes: usize,
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct DisplayAsDebug<'a, T>(&'a T);

        impl<T: fmt::Display> fmt::Debug for DisplayAsDebug<'_, T> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                <T as fmt::Display>::fmt(self.0, f)
            }
        }

        f.debug_struct("TreeStats")
            .field("node_count", &self.node_count)
            .field("item_count", &self.item_count)
            .field("max_depth", &self.max_depth)
            .field("prefix_len", &DisplayAsDebug(&self.prefix_len_dist))
            .field("sparse", &DisplayAsDebug(&self.sparse_num_children_dist))
            .field("dense", &DisplayAsDebug(&self.dense_num_children_dist))
            .field("dense_empty_slots", &self.dense_empty_slots())
            .field("total_prefix_bytes", &self.total_prefix_bytes())
            .field("total_node_bytes", &self.total_node_bytes)
            .finish()
    }
}

impl TreeStats {
    fn new(limits: &NodeLimits) -> Self {
        let max_children = u64::try_from(limits.max_children_per_sparse_node)
            .expect("sparse capacity should fit in a u64");
        let max_prefix =
            u64::try_from(limits.max_prefix_per_node).expect("prefix limit should fit in a u64");

        TreeStats {
            node_count: 0,
            item_count: 0,
            max_depth: 0,
            current_depth: 0,
            // the root prefix is not bound by the limit, so longer prefixes
            // are clamped into the last bucket
            prefix_len_dist: ExactHistogram::new(0..=max_prefix),
            sparse_num_children_dist: ExactHistogram::new(0..=max_children),
            dense_num_children_dist: ExactHistogram::new(0..=256),
            dense_num_slots: 0,
            total_node_bytes: 0,
        }
    }

    /// Number of nodes present in the trie, including the root.
    pub fn node_count(&self) -> u64 {
        self.node_count
    }

    /// Number of items present in the trie.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// The number of nodes on the longest path from the root, including the
    /// root itself.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of sparse child lists present in the trie.
    pub fn sparse_count(&self) -> u64 {
        self.sparse_num_children_dist.total_count()
    }

    /// Number of dense child lists present in the trie.
    pub fn dense_count(&self) -> u64 {
        self.dense_num_children_dist.total_count()
    }

    /// The number of slots in dense child lists that do not hold a child.
    ///
    /// This value is useful to measure how much space the dense
    /// representation is wasting.
    pub fn dense_empty_slots(&self) -> u64 {
        let occupied: u64 = self
            .dense_num_children_dist
            .entries()
            .map(|(value, count)| value * count)
            .sum();

        self.dense_num_slots - occupied
    }

    /// The total number of key bytes held in node prefixes.
    pub fn total_prefix_bytes(&self) -> u64 {
        self.prefix_len_dist
            .entries()
            .map(|(value, count)| value * count)
            .sum()
    }

    /// The approximate number of bytes used by nodes, not counting the items.
    pub fn total_node_bytes(&self) -> usize {
        self.total_node_bytes
    }
}

impl<T> Visitor<T> for TreeStatsCollector {
    type Output = ();

    fn default_output(&self) -> Self::Output {}

    fn combine_output(&self, _: Self::Output, _: Self::Output) -> Self::Output {}

    fn visit_node(&mut self, t: &TrieNode<T>) -> Self::Output {
        let stats = &mut self.stats;
        stats.node_count += 1;
        stats.item_count += u64::from(t.item().is_some());
        stats.current_depth += 1;
        stats.max_depth = stats.max_depth.max(stats.current_depth);
        stats.prefix_len_dist.record_clamped(
            t.prefix()
                .len()
                .try_into()
                .expect("prefix length should fit in a u64"),
        );
        stats.total_node_bytes += mem::size_of_val(t) + t.prefix().len();

        t.super_visit_with(self);
        self.stats.current_depth -= 1;
    }

    fn visit_sparse(&mut self, t: &SparseChildList<T>) -> Self::Output {
        self.stats.sparse_num_children_dist.record_clamped(
            t.len()
                .try_into()
                .expect("number of children should fit in a u64"),
        );
        self.stats.total_node_bytes += t.len() * mem::size_of::<Box<TrieNode<T>>>();

        t.super_visit_with(self)
    }

    fn visit_dense(&mut self, t: &DenseChildList<T>) -> Self::Output {
        self.stats.dense_num_children_dist.record_clamped(
            t.len()
                .try_into()
                .expect("number of children should fit in a u64"),
        );
        let num_slots = t.num_slots();
        self.stats.dense_num_slots += u64::try_from(num_slots).expect("slots should fit in a u64");
        self.stats.total_node_bytes += num_slots * mem::size_of::<Option<Box<TrieNode<T>>>>();

        t.super_visit_with(self)
    }
}

/// This represents a discrete distribution of data over a fixed, inclusive
/// range of values.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ExactHistogram {
    value_range: RangeInclusive<u64>,
    counts: Vec<u64>,
    total_count: u64,
}

impl fmt::Display for ExactHistogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();

        let mut zeros: Vec<RangeInclusive<u64>> = vec![];
        map.entries(self.entries().filter(|(value, count)| {
            let is_zero = *count == 0;

            if is_zero {
                match zeros.last_mut() {
                    Some(last) if *last.end() == (*value - 1) => {
                        *last = (*last.start())..=(*value);
                    },
                    _ => zeros.push(*value..=*value),
                }
            }

            !is_zero
        }));

        if !zeros.is_empty() {
            map.entry(
                &"zeros",
                &zeros
                    .into_iter()
                    .map(|range| {
                        if range.start() == range.end() {
                            range.start().to_string()
                        } else {
                            format!("{}..={}", range.start(), range.end())
                        }
                    })
                    .collect::<Vec<_>>(),
            );
        }

        map.entry(&"total", &self.total_count());

        map.finish()
    }
}

impl ExactHistogram {
    /// Create a new histogram that will accept the given range of values.
    fn new(value_range: RangeInclusive<u64>) -> ExactHistogram {
        let num_values = usize::try_from(value_range.end() - value_range.start() + 1)
            .expect("histogram range should fit in usize");

        ExactHistogram {
            value_range,
            counts: vec![0; num_values],
            total_count: 0,
        }
    }

    /// Record a value in the histogram, incrementing its count by 1.
    ///
    /// Values outside of the `value_range` are counted against the nearest
    /// end of the range.
    fn record_clamped(&mut self, value: u64) {
        let value = value.clamp(*self.value_range.start(), *self.value_range.end());
        let translated_value = usize::try_from(value - self.value_range.start())
            .expect("scaled value should fit in usize");
        self.counts[translated_value] += 1;
        self.total_count += 1;
    }

    /// Return an iterator over the pairs of `(value, count)`, including
    /// `count`s of 0.
    fn entries(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.value_range.clone().zip(self.counts.iter().copied())
    }

    /// Return the total number of values recorded.
    fn total_count(&self) -> u64 {
        self.total_count
    }
}
