//! Similarity index implementation.

use super::repository::{HashRepository, IndexStats};
use super::{TreeMaintenance, MAX_DISTANCE};
use crate::core::hasher::{compute_hash, AlgorithmKind, Fingerprint, IntensityGrid};
use crate::core::sampler::Sampler;
use crate::error::{IndexError, Result};
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Builder for index configuration
#[derive(Debug, Clone, Default)]
pub struct IndexBuilder {
    maintenance: TreeMaintenance,
    sampler: Sampler,
}

impl IndexBuilder {
    /// Create a new index builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set when cold repositories rebuild their tree
    pub fn tree_maintenance(mut self, maintenance: TreeMaintenance) -> Self {
        self.maintenance = maintenance;
        self
    }

    /// Set the sampler used by the file-based operations
    pub fn sampler(mut self, sampler: Sampler) -> Self {
        self.sampler = sampler;
        self
    }

    /// Build the index
    pub fn build(self) -> SimilarityIndex {
        SimilarityIndex {
            repositories: AlgorithmKind::ALL.map(|kind| Mutex::new(HashRepository::new(kind))),
            maintenance: self.maintenance,
            sampler: self.sampler,
        }
    }
}

/// Fingerprint store and BK-tree index, one repository per algorithm
///
/// Each repository and its cached tree sit behind one lock, so the index
/// can be shared across threads while the two always change together.
#[derive(Debug)]
pub struct SimilarityIndex {
    repositories: [Mutex<HashRepository>; 3],
    maintenance: TreeMaintenance,
    sampler: Sampler,
}

impl SimilarityIndex {
    /// Create an empty index with default settings
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> IndexBuilder {
        IndexBuilder::new()
    }

    /// Fingerprint a grid without storing anything
    pub fn compute_hash(&self, grid: &IntensityGrid, kind: AlgorithmKind) -> Result<Fingerprint> {
        Ok(compute_hash(grid, kind)?)
    }

    /// Fingerprint `grid` and record it under `identifier`
    ///
    /// An identifier already stored for the same fingerprint is replaced.
    /// Nothing is mutated if hashing fails.
    pub fn compute_and_store(
        &self,
        grid: &IntensityGrid,
        kind: AlgorithmKind,
        identifier: impl Into<String>,
    ) -> Result<Fingerprint> {
        let fingerprint = compute_hash(grid, kind)?;
        let identifier = identifier.into();
        debug!(algorithm = %kind, %fingerprint, %identifier, "Storing fingerprint");

        self.repository(kind)?
            .store(fingerprint, identifier, self.maintenance);
        Ok(fingerprint)
    }

    /// Stored fingerprints within `max_distance` of `fingerprint`
    pub fn find_similar_by_fingerprint(
        &self,
        fingerprint: Fingerprint,
        kind: AlgorithmKind,
        max_distance: u32,
    ) -> Result<HashSet<Fingerprint>> {
        check_distance(max_distance)?;
        let matches = self.repository(kind)?.search(fingerprint, max_distance);
        Ok(matches.into_iter().collect())
    }

    /// Identifiers of stored images within `max_distance` of `grid`
    ///
    /// Order is unspecified. A match whose repository entry has vanished is
    /// skipped.
    pub fn find_similar_by_image(
        &self,
        grid: &IntensityGrid,
        kind: AlgorithmKind,
        max_distance: u32,
    ) -> Result<Vec<String>> {
        check_distance(max_distance)?;
        let query = compute_hash(grid, kind)?;

        let mut repository = self.repository(kind)?;
        let matches = repository.search(query, max_distance);
        debug!(algorithm = %kind, %query, matches = matches.len(), "Similarity search");

        Ok(matches
            .iter()
            .filter_map(|fingerprint| repository.identifier(fingerprint))
            .map(str::to_string)
            .collect())
    }

    /// Decode and sample `path`, then store it under its file name
    pub fn index_file(&self, path: &Path, kind: AlgorithmKind) -> Result<Fingerprint> {
        let grid = self.sampler.sample_file_for(path, kind)?;
        self.compute_and_store(&grid, kind, identifier_for(path))
    }

    /// Identifiers of stored images within `max_distance` of the image at `path`
    pub fn find_similar_to_file(
        &self,
        path: &Path,
        kind: AlgorithmKind,
        max_distance: u32,
    ) -> Result<Vec<String>> {
        let grid = self.sampler.sample_file_for(path, kind)?;
        self.find_similar_by_image(&grid, kind, max_distance)
    }

    /// Identifier currently stored for `fingerprint`
    pub fn identifier(&self, fingerprint: &Fingerprint, kind: AlgorithmKind) -> Result<Option<String>> {
        Ok(self
            .repository(kind)?
            .identifier(fingerprint)
            .map(str::to_string))
    }

    /// Empty every repository and drop every cached tree
    pub fn clear_all(&self) -> Result<()> {
        for kind in AlgorithmKind::ALL {
            self.repository(kind)?.clear();
        }
        Ok(())
    }

    /// Drop cached trees only; the next query or store rebuilds them
    pub fn clear_tree_cache(&self) -> Result<()> {
        for kind in AlgorithmKind::ALL {
            self.repository(kind)?.clear_tree();
        }
        Ok(())
    }

    pub fn stats(&self, kind: AlgorithmKind) -> Result<IndexStats> {
        Ok(self.repository(kind)?.stats())
    }

    pub fn tree_maintenance(&self) -> TreeMaintenance {
        self.maintenance
    }

    fn repository(&self, kind: AlgorithmKind) -> Result<MutexGuard<'_, HashRepository>> {
        self.repositories[kind.index()]
            .lock()
            .map_err(|_| IndexError::Poisoned { algorithm: kind }.into())
    }
}

impl Default for SimilarityIndex {
    fn default() -> Self {
        Self::new()
    }
}

fn check_distance(max_distance: u32) -> std::result::Result<(), IndexError> {
    if max_distance > MAX_DISTANCE {
        return Err(IndexError::InvalidDistance {
            value: max_distance,
        });
    }
    Ok(())
}

/// File name when there is one, the whole path otherwise
fn identifier_for(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
