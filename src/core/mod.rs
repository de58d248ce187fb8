//! # Core Module
//!
//! The fingerprinting and similarity-search engine.
//!
//! ## Modules
//! - `hasher` - Computes 64-bit perceptual fingerprints from intensity grids
//! - `sampler` - Decodes images and resamples them into intensity grids
//! - `index` - BK-tree backed similarity index, one repository per algorithm
//! - `scanner` - Discovers image files in directories

pub mod hasher;
pub mod index;
pub mod sampler;
pub mod scanner;

// Re-export commonly used types
pub use hasher::{compute_hash, AlgorithmKind, Fingerprint, IntensityGrid};
pub use index::{BkTree, IndexStats, SimilarityIndex, TreeMaintenance};
pub use sampler::Sampler;
