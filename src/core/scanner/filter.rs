//! File filtering logic for the scanner.

use std::collections::HashSet;
use std::path::Path;

/// Extensions the sampler can decode
const DEFAULT_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif"];

/// Filters files to determine if they are supported images
#[derive(Debug, Clone)]
pub struct ImageFilter {
    /// Lowercase file extensions to include
    extensions: HashSet<String>,
    /// Whether to include hidden files
    include_hidden: bool,
}

impl ImageFilter {
    /// Create a new filter with default supported extensions
    pub fn new() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            include_hidden: false,
        }
    }

    /// Include hidden files (starting with .)
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Override the list of extensions to accept
    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions.into_iter().map(|e| e.to_lowercase()).collect();
        self
    }

    /// Whether `path`'s name marks it hidden and hidden entries are excluded
    pub fn is_excluded_hidden(&self, path: &Path) -> bool {
        !self.include_hidden
            && path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|name| name.starts_with('.'))
    }

    /// Check if a file should be included
    pub fn should_include(&self, path: &Path) -> bool {
        if self.is_excluded_hidden(path) {
            return false;
        }

        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.contains(&ext.to_lowercase()))
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new()
    }
}
