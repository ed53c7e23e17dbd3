//! logview-core — project registry and settings for logview.
//!
//! Two concerns live here, both belonging to the layer around the tailing
//! engine:
//!
//! - [`registry`]: the validated project-name to log-file-path mapping,
//!   shared as immutable snapshots via [`SharedRegistry`].
//! - [`config`]: tunable settings (bind address, poll pacing, tail window),
//!   layered from an optional TOML file over built-in defaults.
//!
//! Streaming itself lives in `logview-tail`. This crate never reads a log
//! file; it only stats mapped paths to validate them.

pub mod config;
pub mod error;
pub mod registry;

pub use config::{ServerSettings, Settings, TailSettings};
pub use error::{ConfigError, RegistryError};
pub use registry::{ProjectRegistry, SharedRegistry};
