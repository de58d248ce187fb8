//! Directory walking implementation using walkdir.

use super::{filter::ImageFilter, ScanResult};
use crate::error::ScanError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Configuration for the directory scanner
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Whether to follow symbolic links
    pub follow_symlinks: bool,
    /// Whether to include hidden files and directories
    pub include_hidden: bool,
    /// Maximum directory depth (None = unlimited)
    pub max_depth: Option<usize>,
    /// Custom extensions to include (None = use defaults)
    pub extensions: Option<Vec<String>>,
}

/// Scanner implementation using the walkdir crate
pub struct WalkDirScanner {
    config: ScanConfig,
    filter: ImageFilter,
}

impl WalkDirScanner {
    /// Create a new scanner with the given configuration
    pub fn new(config: ScanConfig) -> Self {
        let mut filter = ImageFilter::new().with_hidden(config.include_hidden);

        if let Some(ref extensions) = config.extensions {
            filter = filter.with_extensions(extensions.clone());
        }

        Self { config, filter }
    }

    /// Scan every root; a missing root is recorded as an error, not fatal
    pub fn scan(&self, roots: &[PathBuf]) -> ScanResult {
        let mut result = ScanResult::default();
        for root in roots {
            if let Err(e) = self.scan_directory(root, &mut result) {
                result.errors.push(e);
            }
        }
        result
    }

    fn scan_directory(&self, root: &Path, result: &mut ScanResult) -> Result<(), ScanError> {
        if !root.is_dir() {
            return Err(ScanError::DirectoryNotFound {
                path: root.to_path_buf(),
            });
        }

        let mut walker = WalkDir::new(root).follow_links(self.config.follow_symlinks);
        if let Some(depth) = self.config.max_depth {
            walker = walker.max_depth(depth);
        }

        // Hidden directories are pruned whole, not just skipped
        let entries = walker
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || !self.filter.is_excluded_hidden(entry.path()));

        for entry in entries {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && self.filter.should_include(entry.path()) {
                        result.images.push(entry.into_path());
                    }
                }
                Err(e) => {
                    let path = e.path().map(Path::to_path_buf).unwrap_or_default();
                    result.errors.push(ScanError::ReadDirectory {
                        path,
                        source: std::io::Error::other(e.to_string()),
                    });
                }
            }
        }

        Ok(())
    }
}
