//! # BK-Tree
//!
//! Burkhard-Keller tree over a metric space, used here for 64-bit
//! fingerprints under Hamming distance.
//!
//! Each node keys its children by their exact distance from the node. A
//! range query at radius `r` only descends into children whose key lies in
//! `[d - r, d + r]`, where `d` is the query's distance to the node; by the
//! triangle inequality no match can hide anywhere else.

use crate::core::hasher::{HammingMetric, Metric};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    /// distance from `value` -> child subtree
    children: BTreeMap<u32, Node<T>>,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            children: BTreeMap::new(),
        }
    }
}

/// A BK-tree over values of `T` measured by `M`
#[derive(Debug, Clone)]
pub struct BkTree<T, M = HammingMetric> {
    root: Option<Node<T>>,
    metric: M,
    len: usize,
}

impl<T, M: Metric<T> + Default> BkTree<T, M> {
    /// Create an empty tree with the default metric
    pub fn new() -> Self {
        Self::with_metric(M::default())
    }
}

impl<T, M: Metric<T> + Default> Default for BkTree<T, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, M: Metric<T>> BkTree<T, M> {
    /// Create an empty tree measuring distances with `metric`
    pub fn with_metric(metric: M) -> Self {
        Self {
            root: None,
            metric,
            len: 0,
        }
    }

    /// Number of distinct values stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert `value`, returning `false` if an identical value is already stored
    ///
    /// Walks down from the root following the child keyed by the distance
    /// at each node, and hangs a new leaf off the first node that has no
    /// child at that distance.
    pub fn insert(&mut self, value: T) -> bool {
        let mut node = match self.root {
            None => {
                self.root = Some(Node::new(value));
                self.len = 1;
                return true;
            }
            Some(ref mut root) => root,
        };

        loop {
            let distance = self.metric.distance(&node.value, &value);
            if distance == 0 {
                return false;
            }

            match node.children.entry(distance) {
                Entry::Occupied(child) => node = child.into_mut(),
                Entry::Vacant(slot) => {
                    slot.insert(Node::new(value));
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    /// Every stored value within `max_distance` of `query`, in no particular order
    pub fn search(&self, query: &T, max_distance: u32) -> Vec<&T> {
        let mut matches = Vec::new();
        let Some(root) = &self.root else {
            return matches;
        };

        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            let distance = self.metric.distance(&node.value, query);
            if distance <= max_distance {
                matches.push(&node.value);
            }

            let lo = distance.saturating_sub(max_distance);
            let hi = distance.saturating_add(max_distance);
            stack.extend(node.children.range(lo..=hi).map(|(_, child)| child));
        }

        matches
    }

    /// All stored values, depth-first
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        let mut stack: Vec<&Node<T>> = self.root.iter().collect();
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.values());
            Some(&node.value)
        })
    }

    /// Depth of the deepest node (0 for an empty tree, 1 for a lone root)
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(&Node<T>, usize)> = self.root.iter().map(|n| (n, 1)).collect();
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.values().map(|c| (c, depth + 1)));
        }
        deepest
    }
}

impl<T, M: Metric<T>> Extend<T> for BkTree<T, M> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, M: Metric<T> + Default> FromIterator<T> for BkTree<T, M> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hasher::{hamming_distance, Fingerprint};
    use std::collections::HashSet;

    fn values(seed: u64, count: usize) -> Vec<u64> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state ^= state >> 12;
                state ^= state << 25;
                state ^= state >> 27;
                state.wrapping_mul(0x2545_F491_4F6C_DD1D)
            })
            .collect()
    }

    /// Values clustered around a few centres so small radii still hit something
    fn clustered(seed: u64, count: usize) -> Vec<u64> {
        let centres = values(seed, 4);
        let noise = values(seed ^ 0xABCD, count * 2);
        (0..count)
            .map(|i| {
                let flips = noise[2 * i] & noise[2 * i + 1] & noise[(2 * i + 3) % noise.len()];
                centres[i % centres.len()] ^ flips
            })
            .collect()
    }

    fn result_set(tree: &BkTree<u64>, query: u64, max_distance: u32) -> HashSet<u64> {
        tree.search(&query, max_distance).into_iter().copied().collect()
    }

    #[test]
    fn empty_tree_finds_nothing() {
        let tree: BkTree<u64> = BkTree::new();
        assert!(tree.is_empty());
        assert!(tree.search(&0, 64).is_empty());
        assert_eq!(tree.depth(), 0);
    }

    #[test]
    fn first_insert_becomes_root() {
        let mut tree: BkTree<u64> = BkTree::new();
        assert!(tree.insert(42));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.search(&42, 0), vec![&42]);
    }

    #[test]
    fn small_radius_excludes_farther_values() {
        let tree: BkTree<u64> = [0b000, 0b001, 0b011].into_iter().collect();

        let found = result_set(&tree, 0, 1);
        assert_eq!(found, HashSet::from([0b000, 0b001]));
        assert!(!found.contains(&0b011));
    }

    #[test]
    fn radius_64_returns_everything() {
        let inserted = values(3, 200);
        let tree: BkTree<u64> = inserted.iter().copied().collect();

        let found = result_set(&tree, 0xDEAD_BEEF, 64);
        assert_eq!(found, inserted.into_iter().collect::<HashSet<_>>());
    }

    #[test]
    fn duplicate_values_are_stored_once() {
        let mut tree: BkTree<u64> = BkTree::new();
        assert!(tree.insert(7));
        assert!(tree.insert(8));
        assert!(!tree.insert(7));
        assert!(!tree.insert(8));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.search(&7, 64).len(), 2);
    }

    #[test]
    fn equidistant_values_chain_instead_of_becoming_siblings() {
        // 0b01 and 0b10 are both at distance 1 from the root 0b00
        let mut tree: BkTree<u64> = BkTree::new();
        tree.insert(0b00);
        tree.insert(0b01);
        tree.insert(0b10);

        // 0b10 lands under 0b01 (distance 2), not beside it
        assert_eq!(tree.depth(), 3);
        assert_eq!(result_set(&tree, 0b10, 0), HashSet::from([0b10]));
        assert_eq!(result_set(&tree, 0b00, 1), HashSet::from([0b00, 0b01, 0b10]));
    }

    #[test]
    fn search_matches_brute_force() {
        for seed in [1u64, 2, 5, 11] {
            let inserted = clustered(seed, 300);
            let tree: BkTree<u64> = inserted.iter().copied().collect();
            let mut queries: Vec<u64> = inserted
                .iter()
                .step_by(30)
                .enumerate()
                .map(|(i, v)| v ^ (1 << i))
                .collect();
            queries.extend(values(seed + 100, 3));

            for &query in &queries {
                for max_distance in [0, 1, 3, 8, 16, 32, 64] {
                    let expected: HashSet<u64> = inserted
                        .iter()
                        .copied()
                        .filter(|&v| hamming_distance(v, query) <= max_distance)
                        .collect();
                    assert_eq!(
                        result_set(&tree, query, max_distance),
                        expected,
                        "seed {seed}, query {query:#x}, radius {max_distance}"
                    );
                }
            }
        }
    }

    #[test]
    fn search_results_have_no_duplicates() {
        let inserted = clustered(9, 150);
        let tree: BkTree<u64> = inserted.iter().copied().collect();

        let results = tree.search(&inserted[0], 20);
        let unique: HashSet<_> = results.iter().collect();
        assert_eq!(results.len(), unique.len());
    }

    #[test]
    fn iter_visits_every_value() {
        let inserted = values(21, 50);
        let tree: BkTree<u64> = inserted.iter().copied().collect();

        let visited: HashSet<u64> = tree.iter().copied().collect();
        assert_eq!(visited.len(), tree.len());
        assert_eq!(visited, inserted.into_iter().collect());
    }

    #[test]
    fn works_over_fingerprints() {
        let tree: BkTree<Fingerprint> = [0xFF_u64, 0xFE, 0x00]
            .into_iter()
            .map(Fingerprint::from)
            .collect();

        let found = tree.search(&Fingerprint::new(0xFF), 1);
        assert_eq!(found.len(), 2);
    }
}
