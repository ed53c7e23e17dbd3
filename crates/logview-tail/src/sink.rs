//! Delivery seam between a streaming session and its transport.
//!
//! The session only knows [`LineSink`]: push one line, learn when the far
//! end hung up. [`ChannelSink`] adapts the bounded mpsc channel the HTTP
//! layer reads from; tests plug in receivers the same way.

use thiserror::Error;
use tokio::sync::mpsc;

/// The consumer has disconnected; no further lines can be delivered.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("sink closed by consumer")]
pub struct SinkClosed;

/// Destination for delivered log lines.
pub trait LineSink {
    /// Deliver one `\n`-terminated line, waiting for capacity if the
    /// transport applies backpressure.
    fn send(
        &mut self,
        line: String,
    ) -> impl std::future::Future<Output = Result<(), SinkClosed>> + Send;

    /// Resolves once the consumer is gone. Lets a session tear down between
    /// sends instead of discovering the disconnect at the next delivery.
    fn closed(&mut self) -> impl std::future::Future<Output = ()> + Send;
}

/// [`LineSink`] over a bounded mpsc channel.
///
/// Dropping the receiver closes the sink, which is how a viewer disconnect
/// reaches the session.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<String>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::Sender<String>) -> Self {
        Self { tx }
    }
}

impl LineSink for ChannelSink {
    async fn send(&mut self, line: String) -> Result<(), SinkClosed> {
        self.tx.send(line).await.map_err(|_| SinkClosed)
    }

    async fn closed(&mut self) {
        self.tx.closed().await;
    }
}
