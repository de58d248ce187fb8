//! Per-algorithm fingerprint repository with its lazily built BK-tree.

use super::bk_tree::BkTree;
use super::TreeMaintenance;
use crate::core::hasher::{AlgorithmKind, Fingerprint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Counters describing one algorithm's repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Algorithm the repository belongs to
    pub algorithm: AlgorithmKind,
    /// Distinct fingerprints stored
    pub entries: usize,
    /// Whether a search tree is currently cached
    pub tree_materialized: bool,
    /// Nodes in the cached tree (0 when absent)
    pub tree_nodes: usize,
}

/// Fingerprint -> identifier map for one algorithm, plus its cached tree
///
/// A cached tree holds every fingerprint that was in the map when it was
/// built, plus everything stored while it stayed cached.
#[derive(Debug)]
pub struct HashRepository {
    algorithm: AlgorithmKind,
    entries: HashMap<Fingerprint, String>,
    tree: Option<BkTree<Fingerprint>>,
}

impl HashRepository {
    pub fn new(algorithm: AlgorithmKind) -> Self {
        Self {
            algorithm,
            entries: HashMap::new(),
            tree: None,
        }
    }

    /// Map `fingerprint` to `identifier`, replacing any previous identifier
    ///
    /// A cached tree gets the fingerprint inserted directly. Without one,
    /// `RebuildOnStore` builds a fresh tree from the whole map, while
    /// `DeferToQuery` leaves that to the next search.
    pub fn store(&mut self, fingerprint: Fingerprint, identifier: String, policy: TreeMaintenance) {
        if let Some(previous) = self.entries.insert(fingerprint, identifier) {
            debug!(
                algorithm = %self.algorithm,
                %fingerprint,
                %previous,
                "Replaced identifier for existing fingerprint"
            );
        }

        if let Some(tree) = self.tree.as_mut() {
            tree.insert(fingerprint);
        } else if policy == TreeMaintenance::RebuildOnStore {
            self.tree = Some(self.build_tree());
        }
    }

    /// Fingerprints within `max_distance` of `query`, building the tree if needed
    pub fn search(&mut self, query: Fingerprint, max_distance: u32) -> Vec<Fingerprint> {
        if self.tree.is_none() {
            self.tree = Some(self.build_tree());
        }

        self.tree
            .as_ref()
            .map(|tree| tree.search(&query, max_distance).into_iter().copied().collect())
            .unwrap_or_default()
    }

    /// Identifier currently stored for `fingerprint`
    pub fn identifier(&self, fingerprint: &Fingerprint) -> Option<&str> {
        self.entries.get(fingerprint).map(String::as_str)
    }

    /// Drop the cached tree, keeping every stored fingerprint
    pub fn clear_tree(&mut self) {
        self.tree = None;
    }

    /// Drop everything
    pub fn clear(&mut self) {
        self.entries.clear();
        self.tree = None;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            algorithm: self.algorithm,
            entries: self.entries.len(),
            tree_materialized: self.tree.is_some(),
            tree_nodes: self.tree.as_ref().map_or(0, BkTree::len),
        }
    }

    fn build_tree(&self) -> BkTree<Fingerprint> {
        debug!(
            algorithm = %self.algorithm,
            entries = self.entries.len(),
            "Building BK-tree from repository"
        );
        self.entries.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp(value: u64) -> Fingerprint {
        Fingerprint::new(value)
    }

    #[test]
    fn first_store_builds_tree_with_rebuild_policy() {
        let mut repo = HashRepository::new(AlgorithmKind::Block);
        repo.store(fp(1), "a.jpg".into(), TreeMaintenance::RebuildOnStore);

        let stats = repo.stats();
        assert!(stats.tree_materialized);
        assert_eq!(stats.tree_nodes, 1);
    }

    #[test]
    fn cold_store_rebuilds_from_all_entries() {
        let mut repo = HashRepository::new(AlgorithmKind::Block);
        repo.store(fp(1), "a.jpg".into(), TreeMaintenance::RebuildOnStore);
        repo.store(fp(2), "b.jpg".into(), TreeMaintenance::RebuildOnStore);
        repo.clear_tree();
        assert!(!repo.stats().tree_materialized);

        repo.store(fp(3), "c.jpg".into(), TreeMaintenance::RebuildOnStore);
        assert_eq!(repo.stats().tree_nodes, 3);
    }

    #[test]
    fn defer_policy_leaves_tree_for_query() {
        let mut repo = HashRepository::new(AlgorithmKind::Block);
        repo.store(fp(1), "a.jpg".into(), TreeMaintenance::DeferToQuery);
        assert!(!repo.stats().tree_materialized);

        assert_eq!(repo.search(fp(1), 0), vec![fp(1)]);
        assert!(repo.stats().tree_materialized);

        // Warm tree now takes inserts directly
        repo.store(fp(3), "c.jpg".into(), TreeMaintenance::DeferToQuery);
        assert_eq!(repo.stats().tree_nodes, 2);
    }

    #[test]
    fn same_fingerprint_keeps_last_identifier() {
        let mut repo = HashRepository::new(AlgorithmKind::Difference);
        repo.store(fp(9), "first.jpg".into(), TreeMaintenance::RebuildOnStore);
        repo.store(fp(9), "second.jpg".into(), TreeMaintenance::RebuildOnStore);

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.identifier(&fp(9)), Some("second.jpg"));
        assert_eq!(repo.search(fp(9), 0), vec![fp(9)]);
    }

    #[test]
    fn clear_drops_entries_and_tree() {
        let mut repo = HashRepository::new(AlgorithmKind::Perceptual);
        repo.store(fp(5), "x.png".into(), TreeMaintenance::RebuildOnStore);
        repo.clear();

        assert!(repo.is_empty());
        assert!(repo.search(fp(5), 64).is_empty());
    }
}
