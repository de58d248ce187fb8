//! Block Hash implementation.
//!
//! Every pixel of an 8x8 grayscale grid is compared against the median
//! intensity of the grid; brighter pixels set their bit.

use super::super::grid::IntensityGrid;
use super::super::traits::{AlgorithmKind, Fingerprint, HashAlgorithm};
use super::{median, pack_bits};

/// Block Hash implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockHasher;

impl HashAlgorithm for BlockHasher {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Block
    }

    fn hash_grid(&self, grid: &IntensityGrid) -> Fingerprint {
        let samples = grid.samples();
        let threshold = median(samples, Ord::cmp);

        pack_bits(samples.iter().map(|&v| v > threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monochrome_grid_produces_zero_hash() {
        for value in [0u8, 128, 255] {
            let hash = BlockHasher.hash(&IntensityGrid::filled(8, 8, value)).unwrap();
            assert_eq!(hash.value(), 0);
        }
    }

    #[test]
    fn threshold_is_upper_middle_value() {
        // 0..64: sorted[32] = 32, so exactly 33..=63 are strictly greater
        let grid = IntensityGrid::from_fn(8, 8, |x, y| (y * 8 + x) as u8);
        let hash = BlockHasher.hash(&grid).unwrap();
        assert_eq!(hash.value(), (1u64 << 31) - 1);
    }

    #[test]
    fn bright_top_half_sets_high_bits() {
        let grid = IntensityGrid::from_fn(8, 8, |_, y| if y < 4 { 200 } else { 10 });
        let hash = BlockHasher.hash(&grid).unwrap();
        // Median lands on 200, so nothing is strictly greater
        assert_eq!(hash.value(), 0);

        let grid = IntensityGrid::from_fn(8, 8, |_, y| if y < 3 { 200 } else { 10 });
        let hash = BlockHasher.hash(&grid).unwrap();
        assert_eq!(hash.value(), 0xFFFF_FF00_0000_0000);
    }

    #[test]
    fn wrong_shape_is_rejected() {
        assert!(BlockHasher.hash(&IntensityGrid::filled(9, 8, 0)).is_err());
    }

    #[test]
    fn kind_returns_block() {
        assert_eq!(BlockHasher.kind(), AlgorithmKind::Block);
    }
}
