//! Hash algorithm implementations.

mod block;
mod difference;
mod perceptual;

pub use block::BlockHasher;
pub use difference::DifferenceHasher;
pub use perceptual::PerceptualHasher;

use super::traits::Fingerprint;

/// Pack up to 64 bits MSB-first: the first bit yielded ends up in bit 63.
pub(crate) fn pack_bits(bits: impl IntoIterator<Item = bool>) -> Fingerprint {
    let mut hash = 0u64;
    for bit in bits {
        hash = (hash << 1) | u64::from(bit);
    }
    Fingerprint::new(hash)
}

/// Middle element after an ascending sort (index `len / 2`).
///
/// For even lengths this is the upper of the two middle values, never an
/// average of them.
pub(crate) fn median<T: Copy>(values: &[T], cmp: impl Fn(&T, &T) -> std::cmp::Ordering) -> T {
    let mut sorted = values.to_vec();
    sorted.sort_by(cmp);
    sorted[sorted.len() / 2]
}
