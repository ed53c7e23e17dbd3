//! logview-tail — the tailing engine behind logview.
//!
//! [`TailSource`] turns one log file into batches of newly appended complete
//! lines, surviving rotation and truncation with a byte-offset cursor plus a
//! file-identity check. [`StreamSession`] drives one source per viewer,
//! pacing delivery into a [`LineSink`] until the viewer disconnects or the
//! process shuts down.
//!
//! ```text
//! log file ──► TailSource::poll() ──► StreamSession::run() ──► LineSink
//!              (cursor + identity)    (active/idle pacing)     (transport)
//! ```
//!
//! Scheduling is cooperative polling with bounded sleeps, not file-change
//! notification: sub-second staleness is fine for a human viewer, and
//! polling keeps rotation handling trivial.

pub mod session;
pub mod sink;
pub mod source;

pub use session::{SessionEnd, StreamSession};
pub use sink::{ChannelSink, LineSink, SinkClosed};
pub use source::{SourceUnavailable, TailSource};

use std::time::Duration;

/// Pacing and backlog tuning for a streaming session.
#[derive(Debug, Clone, Copy)]
pub struct TailConfig {
    /// Trailing lines a newly attached session sees as backlog.
    pub window_lines: usize,
    /// Pause after each line delivered within a burst.
    pub active_delay: Duration,
    /// Pause between polls while the file is quiet.
    pub idle_delay: Duration,
}

impl Default for TailConfig {
    fn default() -> Self {
        Self {
            window_lines: 10,
            active_delay: Duration::from_millis(500),
            idle_delay: Duration::from_secs(1),
        }
    }
}
