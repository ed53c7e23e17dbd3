//! Error taxonomy for registry lookups and mapping validation.
//!
//! The two types propagate differently: an unknown project is terminal for
//! the one request that asked, while an invalid mapping is rejected
//! synchronously and leaves the live registry untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Failure to resolve a project name against a registry snapshot.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The requested project has no mapping entry.
    #[error("project '{0}' not found")]
    UnknownProject(String),
}

/// Failure to load or validate a project-to-logfile mapping.
///
/// Validation rejects the whole mapping on the first offending path.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The mapping file could not be read.
    #[error("cannot read mapping file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mapping file is not a JSON object of project names to paths.
    #[error("mapping file {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A mapped path does not exist.
    #[error("log file does not exist: {0}")]
    MissingFile(PathBuf),

    /// A mapped path exists but is not a regular file.
    #[error("not a regular file: {0}")]
    NotARegularFile(PathBuf),
}
