//! # Sampler Module
//!
//! Turns images into the grayscale intensity grids the hashers consume.
//!
//! ## Pipeline
//! 1. Decode the file (`zune-jpeg` for JPEG, `image` for everything else)
//! 2. Convert to 8-bit luminance
//! 3. Resample to the grid shape the algorithm asks for
//!
//! Decoding failures surface as [`SampleError::UnreadableImage`] and are
//! never recovered here.

mod decode;
mod resize;

pub use decode::{FastDecoder, ImageFormat};
pub use resize::{FastResizer, ResampleFilter};

use crate::core::hasher::{AlgorithmKind, IntensityGrid};
use crate::error::SampleError;
use image::DynamicImage;
use std::path::Path;

/// Produces intensity grids from images at a requested resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler {
    filter: ResampleFilter,
}

impl Sampler {
    /// Create a sampler using the default (bilinear) filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resampling filter
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sample an already-decoded image to `width x height`
    pub fn sample_image(
        &self,
        image: &DynamicImage,
        width: u32,
        height: u32,
    ) -> Result<IntensityGrid, SampleError> {
        FastResizer::new(self.filter).resize_to_grid(image, width, height)
    }

    /// Decode `path` and sample it to `width x height`
    pub fn sample_file(
        &self,
        path: &Path,
        width: u32,
        height: u32,
    ) -> Result<IntensityGrid, SampleError> {
        let image = FastDecoder::decode(path)?;
        self.sample_image(&image, width, height)
    }

    /// Decode `path` and sample it to the grid shape `kind` hashes
    pub fn sample_file_for(&self, path: &Path, kind: AlgorithmKind) -> Result<IntensityGrid, SampleError> {
        let (width, height) = kind.grid_dimensions();
        self.sample_file(path, width, height)
    }
}
