//! # Hasher Module
//!
//! Computes 64-bit perceptual fingerprints from grayscale intensity grids.
//!
//! ## Supported Algorithms
//! - **pHash (Perceptual Hash)** - 32x32 grid, DCT-based, most robust to edits
//! - **dHash (Difference Hash)** - 9x8 grid, horizontal gradients
//! - **blockhash** - 8x8 grid, intensities against their median
//!
//! ## How It Works
//! 1. A sampler reduces the image to the algorithm's grid (see `core::sampler`)
//! 2. The algorithm derives 64 bits from pixel relationships
//! 3. Bits are packed MSB-first into a [`Fingerprint`]
//! 4. Fingerprints are compared using Hamming distance
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::core::hasher::{compute_hash, AlgorithmKind, IntensityGrid};
//!
//! let grid = IntensityGrid::filled(8, 8, 128);
//! let fingerprint = compute_hash(&grid, AlgorithmKind::Block)?;
//! ```

mod algorithms;
mod dct;
mod grid;
mod metric;
mod traits;

pub use algorithms::{BlockHasher, DifferenceHasher, PerceptualHasher};
pub use grid::IntensityGrid;
pub use metric::{hamming_distance, HammingMetric, Metric};
pub use traits::{AlgorithmKind, Fingerprint, HashAlgorithm};

use crate::error::HashError;

/// Fingerprint `grid` with the algorithm selected by `kind`
///
/// Pure: the same grid and kind always produce the same fingerprint.
/// Fails with [`HashError::GridShapeMismatch`] when the grid does not have
/// the algorithm's shape.
pub fn compute_hash(grid: &IntensityGrid, kind: AlgorithmKind) -> Result<Fingerprint, HashError> {
    match kind {
        AlgorithmKind::Perceptual => PerceptualHasher.hash(grid),
        AlgorithmKind::Difference => DifferenceHasher.hash(grid),
        AlgorithmKind::Block => BlockHasher.hash(grid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_for(kind: AlgorithmKind) -> IntensityGrid {
        let (width, height) = kind.grid_dimensions();
        IntensityGrid::from_fn(width, height, |x, y| ((x * 31 + y * 17) % 251) as u8)
    }

    #[test]
    fn compute_hash_is_deterministic_for_every_kind() {
        for kind in AlgorithmKind::ALL {
            let grid = grid_for(kind);
            let first = compute_hash(&grid, kind).unwrap();
            let second = compute_hash(&grid, kind).unwrap();
            assert_eq!(first, second, "{kind} is not deterministic");
        }
    }

    #[test]
    fn compute_hash_dispatches_on_kind() {
        let grid = grid_for(AlgorithmKind::Block);
        assert_eq!(
            compute_hash(&grid, AlgorithmKind::Block).unwrap(),
            BlockHasher.hash(&grid).unwrap()
        );
    }

    #[test]
    fn compute_hash_rejects_mismatched_grid() {
        let grid = grid_for(AlgorithmKind::Block);
        let result = compute_hash(&grid, AlgorithmKind::Perceptual);
        assert!(matches!(
            result,
            Err(HashError::GridShapeMismatch {
                algorithm: AlgorithmKind::Perceptual,
                ..
            })
        ));
    }

    #[test]
    fn monochrome_blockhash_is_zero() {
        let grid = IntensityGrid::filled(8, 8, 90);
        assert_eq!(compute_hash(&grid, AlgorithmKind::Block).unwrap().value(), 0);
    }

    #[test]
    fn increasing_rows_dhash_is_zero() {
        let grid = IntensityGrid::from_fn(9, 8, |x, _| (x * 25) as u8);
        assert_eq!(compute_hash(&grid, AlgorithmKind::Difference).unwrap().value(), 0);
    }
}
