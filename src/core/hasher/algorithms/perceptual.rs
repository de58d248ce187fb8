//! Perceptual Hash (pHash) implementation.
//!
//! pHash uses the Discrete Cosine Transform (DCT) to extract
//! frequency information from the image. This makes it more
//! robust to:
//! - Scaling
//! - Minor rotations
//! - Brightness/contrast changes
//! - Compression artifacts
//!
//! The 32x32 grid is transformed, the top-left 8x8 block of
//! lowest-frequency coefficients is kept, and each coefficient
//! sets its bit when it is strictly above the block's median.

use super::super::dct::dct_2d;
use super::super::grid::IntensityGrid;
use super::super::traits::{AlgorithmKind, Fingerprint, HashAlgorithm};
use super::{median, pack_bits};

/// Side of the low-frequency block that feeds the hash
const LOW_FREQUENCY_SIZE: usize = 8;

/// Perceptual Hash (pHash) implementation using DCT
#[derive(Debug, Clone, Copy, Default)]
pub struct PerceptualHasher;

impl PerceptualHasher {
    /// The 64 lowest-frequency coefficients, row-major over (u, v)
    pub(crate) fn low_frequency_coefficients(&self, grid: &IntensityGrid) -> Vec<f64> {
        let n = grid.width() as usize;
        let input: Vec<f64> = grid.samples().iter().map(|&v| f64::from(v)).collect();
        let coefficients = dct_2d(&input, n);

        (0..LOW_FREQUENCY_SIZE)
            .flat_map(|u| {
                coefficients[u * n..u * n + LOW_FREQUENCY_SIZE]
                    .iter()
                    .copied()
            })
            .collect()
    }
}

impl HashAlgorithm for PerceptualHasher {
    fn kind(&self) -> AlgorithmKind {
        AlgorithmKind::Perceptual
    }

    fn hash_grid(&self, grid: &IntensityGrid) -> Fingerprint {
        let coefficients = self.low_frequency_coefficients(grid);
        let threshold = median(&coefficients, |a, b| a.total_cmp(b));

        pack_bits(coefficients.iter().map(|&c| c > threshold))
    }
}
