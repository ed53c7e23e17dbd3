//! Runtime settings for logview.
//!
//! [`Settings::load`] layers an optional TOML file over the built-in
//! defaults. [`Settings::defaults`] returns the same defaults without
//! touching the filesystem (useful in tests). The project-to-logfile mapping
//! is a separate JSON file, handled by [`crate::registry::ProjectRegistry`].

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_SETTINGS: &str = r#"
[server]
host = "127.0.0.1"
port = 5050

[tail]
poll_interval_active_ms = 500
poll_interval_idle_ms   = 1000
window_lines            = 10
"#;

// ---------------------------------------------------------------------------
// Public settings types
// ---------------------------------------------------------------------------

/// Top-level settings, optionally loaded from a TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub tail: TailSettings,
}

/// `[server]` section: where the HTTP listener binds.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 5050 }

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// `[tail]` section: pacing and backlog window for streaming sessions.
#[derive(Debug, Clone, Deserialize)]
pub struct TailSettings {
    /// Pause after each line delivered within a burst, in milliseconds.
    #[serde(default = "default_poll_interval_active_ms")]
    pub poll_interval_active_ms: u64,
    /// Pause between polls while the file is quiet, in milliseconds.
    #[serde(default = "default_poll_interval_idle_ms")]
    pub poll_interval_idle_ms: u64,
    /// How many trailing lines a newly attached session sees as backlog.
    #[serde(default = "default_window_lines")]
    pub window_lines: usize,
}

fn default_poll_interval_active_ms() -> u64 { 500 }
fn default_poll_interval_idle_ms() -> u64 { 1000 }
fn default_window_lines() -> usize { 10 }

impl Default for TailSettings {
    fn default() -> Self {
        Self {
            poll_interval_active_ms: default_poll_interval_active_ms(),
            poll_interval_idle_ms: default_poll_interval_idle_ms(),
            window_lines: default_window_lines(),
        }
    }
}

impl TailSettings {
    pub fn active_delay(&self) -> Duration {
        Duration::from_millis(self.poll_interval_active_ms)
    }

    pub fn idle_delay(&self) -> Duration {
        Duration::from_millis(self.poll_interval_idle_ms)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Settings {
    /// Load settings, layering `path` (when given) over the built-in
    /// defaults. A named file that cannot be read is an error; no file at
    /// all just means defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_SETTINGS,
            config::FileFormat::Toml,
        ));
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_SETTINGS,
                config::FileFormat::Toml,
            ))
            .build()
            .expect("built-in default settings must be valid TOML")
            .try_deserialize()
            .expect("built-in default settings must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
