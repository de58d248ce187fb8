//! # Scanner Module
//!
//! Discovers image files to feed into the index.
//!
//! ## Supported Formats
//! - JPEG (.jpg, .jpeg)
//! - PNG (.png)
//! - WebP (.webp)
//! - GIF (.gif)
//! - BMP (.bmp)
//! - TIFF (.tiff, .tif)
//!
//! ## Example
//! ```rust,ignore
//! use image_similarity::core::scanner::{ScanConfig, WalkDirScanner};
//!
//! let scanner = WalkDirScanner::new(ScanConfig::default());
//! let result = scanner.scan(&["/Users/photos".into()]);
//! ```

mod filter;
mod walker;

pub use filter::ImageFilter;
pub use walker::{ScanConfig, WalkDirScanner};

use crate::error::ScanError;
use std::path::PathBuf;

/// Result of a scan operation
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Image files found, in walk order
    pub images: Vec<PathBuf>,
    /// Errors that occurred during scanning (non-fatal)
    pub errors: Vec<ScanError>,
}
