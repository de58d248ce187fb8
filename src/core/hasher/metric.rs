//! Hamming distance, the metric every index in this crate is built on.
//!
//! The BK-tree prunes subtrees using the triangle inequality, so any
//! [`Metric`] handed to it must be a true metric.

use super::traits::Fingerprint;

/// Number of differing bits between two 64-bit values
#[inline]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// A distance function over `T`
///
/// Must be non-negative, symmetric, zero only for equal values and satisfy
/// the triangle inequality.
pub trait Metric<T> {
    fn distance(&self, a: &T, b: &T) -> u32;
}

/// Hamming distance over fingerprints and raw 64-bit values
#[derive(Debug, Clone, Copy, Default)]
pub struct HammingMetric;

impl Metric<Fingerprint> for HammingMetric {
    fn distance(&self, a: &Fingerprint, b: &Fingerprint) -> u32 {
        a.distance(b)
    }
}

impl Metric<u64> for HammingMetric {
    fn distance(&self, a: &u64, b: &u64) -> u32 {
        hamming_distance(*a, *b)
    }
}
