//! Streaming session: one viewer, one tail source, one pacing loop.
//!
//! The loop polls the source and pushes each new line into the sink,
//! sleeping between steps: a short pause after every delivered line, a
//! longer one when the file is quiet or unreadable. Every pause races the
//! cancellation token and the sink's closed notification, and every send
//! races the token as well, so shutdown and viewer disconnects are observed
//! within one interval even when the file never produces another line or
//! the consumer stops draining its channel.

use crate::sink::LineSink;
use crate::source::TailSource;
use crate::TailConfig;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Why a session's loop ended. There is no "end of log": a live tail stops
/// only when told to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The viewer disconnected; the sink reported closure.
    SinkClosed,
    /// The surrounding scope was cancelled (process shutdown).
    Cancelled,
}

/// Drives one [`TailSource`] into one [`LineSink`] until disconnect or
/// cancellation.
#[derive(Debug)]
pub struct StreamSession<S> {
    source: TailSource,
    sink: S,
    active_delay: Duration,
    idle_delay: Duration,
    cancel: CancellationToken,
}

impl<S: LineSink> StreamSession<S> {
    pub fn new(
        source: TailSource,
        sink: S,
        config: &TailConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            source,
            sink,
            active_delay: config.active_delay,
            idle_delay: config.idle_delay,
            cancel,
        }
    }

    /// Run the pacing loop to completion.
    ///
    /// An unavailable source is retried forever: rotation windows are
    /// expected, and a viewer would rather wait than be disconnected.
    pub async fn run(mut self) -> SessionEnd {
        loop {
            if self.cancel.is_cancelled() {
                return SessionEnd::Cancelled;
            }

            match self.source.poll().await {
                Ok(lines) if !lines.is_empty() => {
                    for line in lines {
                        if let Some(end) = self.deliver(line).await {
                            return end;
                        }
                        if let Some(end) = self.pause(self.active_delay).await {
                            return end;
                        }
                    }
                }
                Ok(_) => {
                    if let Some(end) = self.pause(self.idle_delay).await {
                        return end;
                    }
                }
                Err(err) => {
                    tracing::debug!(
                        path = %self.source.path().display(),
                        error = %err,
                        "source unavailable, retrying after idle pause"
                    );
                    if let Some(end) = self.pause(self.idle_delay).await {
                        return end;
                    }
                }
            }
        }
    }

    /// Push one line, racing cancellation: a consumer that stops draining
    /// leaves the send parked on a full channel, and shutdown has to reach
    /// the session there too. Returns the terminal state when delivery did
    /// not complete.
    async fn deliver(&mut self, line: String) -> Option<SessionEnd> {
        tokio::select! {
            sent = self.sink.send(line) => match sent {
                Ok(()) => None,
                Err(_) => Some(SessionEnd::SinkClosed),
            },
            _ = self.cancel.cancelled() => Some(SessionEnd::Cancelled),
        }
    }

    /// Sleep racing disconnect and cancellation. Returns the terminal state
    /// when one of them interrupted the delay.
    async fn pause(&mut self, delay: Duration) -> Option<SessionEnd> {
        tokio::select! {
            _ = self.cancel.cancelled() => Some(SessionEnd::Cancelled),
            _ = self.sink.closed() => Some(SessionEnd::SinkClosed),
            _ = tokio::time::sleep(delay) => None,
        }
    }
}
