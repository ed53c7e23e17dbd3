//! Shared state for the HTTP layer.

use logview_core::SharedRegistry;
use logview_tail::TailConfig;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Everything a handler needs: the registry handle, tail tuning, and the
/// token that tears down streaming sessions on shutdown.
#[derive(Debug)]
pub struct AppContext {
    pub registry: SharedRegistry,
    pub tail: TailConfig,
    pub shutdown: CancellationToken,
}

impl AppContext {
    pub fn new(registry: SharedRegistry, tail: TailConfig, shutdown: CancellationToken) -> Self {
        Self {
            registry,
            tail,
            shutdown,
        }
    }
}

/// Shared application state passed to all handlers.
pub type AppState = Arc<AppContext>;
