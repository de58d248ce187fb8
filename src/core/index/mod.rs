//! # Index Module
//!
//! Finds similar images without comparing against the whole corpus.
//!
//! ## How It Works
//! 1. Each algorithm gets its own repository mapping fingerprint -> identifier
//! 2. Each repository caches a BK-tree over its fingerprints
//! 3. Range queries walk the tree, pruning by the triangle inequality
//! 4. Matching fingerprints are mapped back to identifiers
//!
//! ## Cache Maintenance
//! A cached tree absorbs new fingerprints incrementally. Once dropped (via
//! [`SimilarityIndex::clear_tree_cache`]) it is rebuilt from the repository,
//! either on the next store or the next query depending on
//! [`TreeMaintenance`].
//!
//! ## Suggested Distances (64-bit hashes)
//! | Distance | Meaning       |
//! |----------|---------------|
//! | 0        | Same content  |
//! | 1-5      | Near-exact    |
//! | 6-10     | Similar       |
//! | 11+      | Likely different |

mod bk_tree;
mod repository;
mod service;

pub use bk_tree::BkTree;
pub use repository::{HashRepository, IndexStats};
pub use service::{IndexBuilder, SimilarityIndex};

use serde::{Deserialize, Serialize};

/// Largest meaningful Hamming distance between two 64-bit fingerprints
pub const MAX_DISTANCE: u32 = 64;

/// When a repository without a cached tree gets one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TreeMaintenance {
    /// Storing into a repository without a tree rebuilds it from every entry
    #[default]
    RebuildOnStore,
    /// Storing never builds a tree; the next query does
    DeferToQuery,
}
