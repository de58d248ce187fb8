//! Trait and type definitions for perceptual hashing.

use super::grid::IntensityGrid;
use super::metric::hamming_distance;
use crate::error::HashError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// Perceptual Hash (pHash) - DCT-based, robust to edits and recompression
    #[serde(rename = "phash")]
    Perceptual,
    /// Difference Hash (dHash) - Horizontal brightness gradients
    #[serde(rename = "dhash")]
    Difference,
    /// Block Hash - Intensities thresholded against their median
    #[serde(rename = "blockhash")]
    Block,
}

impl AlgorithmKind {
    /// Every supported algorithm
    pub const ALL: [AlgorithmKind; 3] = [
        AlgorithmKind::Perceptual,
        AlgorithmKind::Difference,
        AlgorithmKind::Block,
    ];

    /// The (width, height) of the grid this algorithm hashes
    pub fn grid_dimensions(&self) -> (u32, u32) {
        match self {
            AlgorithmKind::Perceptual => (32, 32),
            AlgorithmKind::Difference => (9, 8),
            AlgorithmKind::Block => (8, 8),
        }
    }

    /// Get a human-readable description of the algorithm
    pub fn description(&self) -> &'static str {
        match self {
            AlgorithmKind::Perceptual => {
                "Perceptual Hash (pHash) - low-frequency DCT coefficients against their median"
            }
            AlgorithmKind::Difference => {
                "Difference Hash (dHash) - compares brightness of horizontally adjacent pixels"
            }
            AlgorithmKind::Block => {
                "Block Hash - pixel intensities against the median intensity"
            }
        }
    }

    /// Fail unless `grid` has exactly this algorithm's shape
    pub fn check_grid(&self, grid: &IntensityGrid) -> Result<(), HashError> {
        let (expected_width, expected_height) = self.grid_dimensions();
        if grid.width() != expected_width || grid.height() != expected_height {
            return Err(HashError::GridShapeMismatch {
                algorithm: *self,
                expected_width,
                expected_height,
                width: grid.width(),
                height: grid.height(),
            });
        }
        Ok(())
    }

    /// Position in [`AlgorithmKind::ALL`]
    pub(crate) fn index(&self) -> usize {
        match self {
            AlgorithmKind::Perceptual => 0,
            AlgorithmKind::Difference => 1,
            AlgorithmKind::Block => 2,
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmKind::Perceptual => write!(f, "pHash"),
            AlgorithmKind::Difference => write!(f, "dHash"),
            AlgorithmKind::Block => write!(f, "blockhash"),
        }
    }
}

impl FromStr for AlgorithmKind {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "phash" | "perceptual" => Ok(AlgorithmKind::Perceptual),
            "dhash" | "difference" => Ok(AlgorithmKind::Difference),
            "blockhash" | "block" => Ok(AlgorithmKind::Block),
            _ => Err(HashError::UnsupportedAlgorithm {
                name: s.to_string(),
            }),
        }
    }
}

/// A 64-bit perceptual fingerprint, bits packed MSB-first
///
/// Fingerprints from different algorithms share this type but are not
/// comparable to one another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The raw 64-bit value
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Hamming distance to another fingerprint (0-64)
    pub fn distance(&self, other: &Self) -> u32 {
        hamming_distance(self.0, other.0)
    }

    /// Get the fingerprint as a 16-digit hexadecimal string
    pub fn to_hex(&self) -> String {
        format!("{:016x}", self.0)
    }
}

impl From<u64> for Fingerprint {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Fingerprint> for u64 {
    fn from(fingerprint: Fingerprint) -> Self {
        fingerprint.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl FromStr for Fingerprint {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches("0x");
        u64::from_str_radix(digits, 16)
            .map(Fingerprint)
            .map_err(|_| HashError::InvalidFingerprint {
                value: s.to_string(),
            })
    }
}

/// Trait for hash algorithm implementations
pub trait HashAlgorithm: Send + Sync {
    /// Get the algorithm kind
    fn kind(&self) -> AlgorithmKind;

    /// Hash a grid already known to have this algorithm's shape
    fn hash_grid(&self, grid: &IntensityGrid) -> Fingerprint;

    /// Check the grid shape, then hash it
    fn hash(&self, grid: &IntensityGrid) -> Result<Fingerprint, HashError> {
        self.kind().check_grid(grid)?;
        Ok(self.hash_grid(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_counts_differing_bits() {
        let a = Fingerprint::new(0xFF);
        let b = Fingerprint::new(0x00);
        assert_eq!(a.distance(&b), 8);
    }

    #[test]
    fn to_hex_is_zero_padded() {
        assert_eq!(Fingerprint::new(0xDEADBEEF).to_hex(), "00000000deadbeef");
        assert_eq!(Fingerprint::new(u64::MAX).to_string(), "ffffffffffffffff");
    }

    #[test]
    fn fingerprint_parses_from_hex() {
        let parsed: Fingerprint = "0x00000000deadbeef".parse().unwrap();
        assert_eq!(parsed.value(), 0xDEADBEEF);
        assert!("not-hex".parse::<Fingerprint>().is_err());
    }

    #[test]
    fn algorithm_kind_display() {
        assert_eq!(AlgorithmKind::Perceptual.to_string(), "pHash");
        assert_eq!(AlgorithmKind::Difference.to_string(), "dHash");
        assert_eq!(AlgorithmKind::Block.to_string(), "blockhash");
    }

    #[test]
    fn algorithm_kind_parses_short_and_long_names() {
        assert_eq!("PHASH".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Perceptual);
        assert_eq!("difference".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Difference);
        assert_eq!("blockhash".parse::<AlgorithmKind>().unwrap(), AlgorithmKind::Block);
    }

    #[test]
    fn unknown_algorithm_is_unsupported() {
        let result = "ahash".parse::<AlgorithmKind>();
        assert!(matches!(
            result,
            Err(HashError::UnsupportedAlgorithm { ref name }) if name == "ahash"
        ));
    }

    #[test]
    fn grid_dimensions_per_algorithm() {
        assert_eq!(AlgorithmKind::Perceptual.grid_dimensions(), (32, 32));
        assert_eq!(AlgorithmKind::Difference.grid_dimensions(), (9, 8));
        assert_eq!(AlgorithmKind::Block.grid_dimensions(), (8, 8));
    }

    #[test]
    fn check_grid_rejects_wrong_shape() {
        let grid = IntensityGrid::filled(8, 8, 0);
        assert!(AlgorithmKind::Block.check_grid(&grid).is_ok());
        assert!(AlgorithmKind::Difference.check_grid(&grid).is_err());
    }

    #[test]
    fn indices_match_all_order() {
        for (i, kind) in AlgorithmKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
