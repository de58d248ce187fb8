//! # Image Similarity
//!
//! Perceptual fingerprints for images, indexed for near-duplicate lookup.
//!
//! ## Core Ideas
//! - **Fingerprint** - every image reduces to 64 bits (pHash, dHash or blockhash)
//! - **Hamming distance** - similar images differ in few bits
//! - **BK-tree** - range queries prune by the triangle inequality instead of
//!   scanning every stored fingerprint
//!
//! ## Architecture
//! - `core` - The hashing and indexing engine
//! - `error` - Error types
//! - `cli` - Command-line interface (binary only)
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::{AlgorithmKind, SimilarityIndex};
//!
//! let index = SimilarityIndex::new();
//! index.index_file(Path::new("cat.jpg"), AlgorithmKind::Perceptual)?;
//! let similar = index.find_similar_to_file(Path::new("cat-small.jpg"), AlgorithmKind::Perceptual, 10)?;
//! ```

pub mod core;
pub mod error;

// Re-export commonly used types at the crate root
pub use crate::core::{AlgorithmKind, Fingerprint, IntensityGrid, SimilarityIndex};
pub use error::{Result, SimilarityError};

/// Initialize tracing for the library
///
/// This should be called by the application entry point. `RUST_LOG`
/// overrides `default_level` when set.
pub fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    // Keep whichever subscriber was installed first
    let _ = tracing::subscriber::set_global_default(subscriber);
}
