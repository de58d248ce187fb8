//! # Error Module
//!
//! Error types for fingerprinting and similarity search.
//!
//! ## Design Principles
//! - **Never panic** on caller data - return errors instead
//! - **Include context** - paths, algorithm, what went wrong
//! - **Fail before mutating** - an index operation that errors leaves the index untouched

use crate::core::hasher::AlgorithmKind;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level library error
#[derive(Error, Debug)]
pub enum SimilarityError {
    #[error("Sampling error: {0}")]
    Sample(#[from] SampleError),

    #[error("Hashing error: {0}")]
    Hash(#[from] HashError),

    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    #[error("Scanning error: {0}")]
    Scan(#[from] ScanError),
}

/// Errors raised while turning an image into an intensity grid
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("Unreadable image {path}: {reason}")]
    UnreadableImage { path: PathBuf, reason: String },

    #[error("Failed to open image file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sample dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Resampling failed: {reason}")]
    Resize { reason: String },
}

/// Errors raised while computing a fingerprint
#[derive(Error, Debug)]
pub enum HashError {
    #[error("Unsupported hash algorithm: {name}")]
    UnsupportedAlgorithm { name: String },

    #[error("{algorithm} expects a {expected_width}x{expected_height} grid, got {width}x{height}")]
    GridShapeMismatch {
        algorithm: AlgorithmKind,
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("Grid of {width}x{height} cannot hold {samples} samples")]
    InvalidGrid {
        width: u32,
        height: u32,
        samples: usize,
    },

    #[error("Invalid fingerprint literal: {value}")]
    InvalidFingerprint { value: String },
}

/// Errors raised by the similarity index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Invalid distance: {value} (must be 0-64)")]
    InvalidDistance { value: u32 },

    #[error("The {algorithm} repository is unusable after a panic in another thread")]
    Poisoned { algorithm: AlgorithmKind },
}

/// Errors raised while discovering image files
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Failed to read directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience Result type alias
pub type Result<T> = std::result::Result<T, SimilarityError>;
