//! Difference Hash (dHash) implementation.
//!
//! dHash works by:
//! 1. Sampling the image as a 9x8 grayscale grid
//! 2. Comparing each pixel to the one to its right
//! 3. If left pixel is brighter, set bit to 1, else 0
//!
//! This captures the relative gradient of brightness changes.

use super::super::grid::IntensityGrid;
use super::super::traits::{AlgorithmKind, Fingerprint, HashAlgorithm};
use super::pack_bits;

/// Difference Hash (dHash) implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct DifferenceHasher;

impl HashAlgorithm for DifferenceHasher {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Difference
    }

    fn hash_grid(&self, grid: &IntensityGrid) -> Fingerprint {
        // One extra column supplies the right-hand neighbour of the last comparison
        let (width, height) = self.kind().grid_dimensions();
        let columns = width - 1;

        let bits = (0..height).flat_map(|y| {
            (0..columns).map(move |x| grid.get(x, y) > grid.get(x + 1, y))
        });

        pack_bits(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn left_to_right_gradient() -> IntensityGrid {
        IntensityGrid::from_fn(9, 8, |x, y| (x * 20 + y) as u8)
    }

    fn right_to_left_gradient() -> IntensityGrid {
        IntensityGrid::from_fn(9, 8, |x, y| ((8 - x) * 20 + y) as u8)
    }

    #[test]
    fn increasing_rows_produce_zero_hash() {
        let hash = DifferenceHasher.hash(&left_to_right_gradient()).unwrap();
        assert_eq!(hash.value(), 0);
    }

    #[test]
    fn decreasing_rows_produce_all_ones() {
        let hash = DifferenceHasher.hash(&right_to_left_gradient()).unwrap();
        assert_eq!(hash.value(), u64::MAX);
    }

    #[test]
    fn equal_neighbours_produce_zero_bits() {
        let hash = DifferenceHasher.hash(&IntensityGrid::filled(9, 8, 200)).unwrap();
        assert_eq!(hash.value(), 0);
    }

    #[test]
    fn first_row_first_column_is_most_significant_bit() {
        // Only (0,0) > (1,0)
        let grid = IntensityGrid::from_fn(9, 8, |x, y| if x == 0 && y == 0 { 255 } else { 0 });
        let hash = DifferenceHasher.hash(&grid).unwrap();
        assert_eq!(hash.value(), 1 << 63);
    }

    #[test]
    fn last_row_last_column_is_least_significant_bit() {
        let grid = IntensityGrid::from_fn(9, 8, |x, y| if x == 7 && y == 7 { 255 } else { 0 });
        let hash = DifferenceHasher.hash(&grid).unwrap();
        assert_eq!(hash.value(), 1);
    }

    #[test]
    fn identical_grids_produce_identical_hash() {
        let grid = IntensityGrid::from_fn(9, 8, |x, y| ((x * 37 + y * 91) % 256) as u8);
        let hash1 = DifferenceHasher.hash(&grid).unwrap();
        let hash2 = DifferenceHasher.hash(&grid).unwrap();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn square_grid_is_rejected() {
        assert!(DifferenceHasher.hash(&IntensityGrid::filled(8, 8, 0)).is_err());
    }

    #[test]
    fn kind_returns_difference() {
        assert_eq!(DifferenceHasher.kind(), AlgorithmKind::Difference);
    }
}
