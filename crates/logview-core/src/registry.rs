//! Project registry: the mapping from project names to log file paths.
//!
//! A [`ProjectRegistry`] is an immutable snapshot, validated at construction:
//! every path must exist and be a regular file. [`SharedRegistry`] hands out
//! cheap `Arc` clones of the current snapshot and swaps the whole snapshot on
//! update, so a streaming session keeps the view it resolved against even if
//! the mapping is replaced mid-stream.

use crate::error::{ConfigError, RegistryError};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

// ---------------------------------------------------------------------------
// ProjectRegistry
// ---------------------------------------------------------------------------

/// Immutable, validated project-name to log-file-path mapping.
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    projects: BTreeMap<String, PathBuf>,
}

impl ProjectRegistry {
    /// Validate a proposed mapping and build a registry from it.
    ///
    /// Fails on the first path that is missing or not a regular file. No
    /// registry is produced in that case, so a caller holding a previous
    /// snapshot keeps serving it unchanged.
    pub fn new(mapping: BTreeMap<String, PathBuf>) -> Result<Self, ConfigError> {
        for path in mapping.values() {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.clone()));
            }
            if !path.is_file() {
                return Err(ConfigError::NotARegularFile(path.clone()));
            }
        }
        Ok(Self { projects: mapping })
    }

    /// Read and validate the JSON mapping file used at startup.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mapping: BTreeMap<String, PathBuf> =
            serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::new(mapping)
    }

    /// Resolve a project name to its log file path.
    pub fn resolve(&self, project: &str) -> Result<&Path, RegistryError> {
        self.projects
            .get(project)
            .map(PathBuf::as_path)
            .ok_or_else(|| RegistryError::UnknownProject(project.to_string()))
    }

    /// Iterate entries in name order. Stable ordering keeps rendered tables
    /// and tests deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.projects
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

// ---------------------------------------------------------------------------
// SharedRegistry
// ---------------------------------------------------------------------------

/// Shared handle on the current registry snapshot.
///
/// Readers clone the `Arc` out; updates swap it under a short write lock.
/// The lock is never held across I/O or an `.await`, so the only observable
/// question is "which snapshot did this request see".
#[derive(Debug, Default)]
pub struct SharedRegistry {
    current: RwLock<Arc<ProjectRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: ProjectRegistry) -> Self {
        Self {
            current: RwLock::new(Arc::new(registry)),
        }
    }

    /// The current snapshot. Holders keep this view across later updates.
    pub fn snapshot(&self) -> Arc<ProjectRegistry> {
        // A poisoned lock still holds a valid snapshot: swaps are a single
        // pointer store, never a partial write.
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Install an already-validated registry as the new snapshot.
    pub fn replace(&self, registry: ProjectRegistry) {
        let mut current = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(registry);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
