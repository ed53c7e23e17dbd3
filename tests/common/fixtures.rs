//! Filesystem fixtures and app builders.

use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logview_core::{ProjectRegistry, SharedRegistry};
use logview_tail::TailConfig;
use logview_web::{router, AppContext};
use tokio_util::sync::CancellationToken;

/// A throwaway log file inside its own temp directory.
///
/// The directory lives as long as the fixture, so rotation can park the old
/// file next to the new one the way logrotate does.
pub struct TempLog {
    dir: tempfile::TempDir,
    pub path: PathBuf,
}

impl TempLog {
    /// An empty `svc.log` in a fresh temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("svc.log");
        std::fs::File::create(&path).expect("create temp log");
        Self { dir, path }
    }

    /// A log seeded with newline-terminated lines.
    pub fn with_lines(lines: &[&str]) -> Self {
        let log = Self::new();
        log.append_lines(lines);
        log
    }

    /// Append newline-terminated lines.
    pub fn append_lines(&self, lines: &[&str]) {
        append_lines(&self.path, lines);
    }

    /// Append raw text exactly as given, no terminator added.
    pub fn append_raw(&self, raw: &str) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("open log for append");
        write!(file, "{raw}").expect("append raw text");
    }

    /// The classic logrotate move: rename the file aside and recreate an
    /// empty one at the same path.
    pub fn rotate(&self) {
        let parked = self.dir.path().join("svc.log.1");
        std::fs::rename(&self.path, &parked).expect("rename rotated log");
        std::fs::File::create(&self.path).expect("recreate log after rotation");
    }

    /// Truncate the file in place to zero bytes.
    pub fn truncate(&self) {
        OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&self.path)
            .expect("truncate log");
    }

    /// Delete the file, leaving the directory in place.
    pub fn remove(&self) {
        std::fs::remove_file(&self.path).expect("remove log");
    }

    /// Recreate an empty file at the same path.
    pub fn recreate(&self) {
        std::fs::File::create(&self.path).expect("recreate log");
    }
}

/// Append newline-terminated lines to any path, creating it if needed.
pub fn append_lines(path: &Path, lines: &[&str]) {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .expect("open log for append");
    for line in lines {
        writeln!(file, "{line}").expect("append line");
    }
}

/// Tail pacing tuned for wall-clock tests: real streaming, tight intervals.
pub fn quick_tail() -> TailConfig {
    TailConfig {
        window_lines: 10,
        active_delay: Duration::from_millis(10),
        idle_delay: Duration::from_millis(20),
    }
}

/// Build a validated registry from `(project, log path)` pairs.
pub fn registry_of(projects: &[(&str, &Path)]) -> ProjectRegistry {
    let mapping: BTreeMap<String, PathBuf> = projects
        .iter()
        .map(|(name, path)| (name.to_string(), path.to_path_buf()))
        .collect();
    ProjectRegistry::new(mapping).expect("test mapping should validate")
}

/// A router wired like `main` does it, plus the shutdown token that ends
/// its stream sessions.
pub fn test_app(
    projects: &[(&str, &Path)],
    tail: TailConfig,
) -> (axum::Router, CancellationToken) {
    let shutdown = CancellationToken::new();
    let context = AppContext::new(
        SharedRegistry::new(registry_of(projects)),
        tail,
        shutdown.clone(),
    );
    (router(context), shutdown)
}
