//! Route table and router construction.
//!
//! Static segments win over the `{project}` capture in axum's router, so
//! `/health` and `/log_stream/{...}` are never shadowed by project names.
//! A project literally named "health" would lose its viewer page; it keeps
//! its stream route, which is the one that matters.

use crate::handlers;
use crate::state::{AppContext, AppState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Build the application router around shared state.
pub fn router(context: AppContext) -> Router {
    let state: AppState = Arc::new(context);

    Router::new()
        .route("/", get(handlers::index).post(handlers::replace_mapping))
        .route("/health", get(handlers::health))
        .route("/log_stream/{project}", get(handlers::stream_logs))
        .route("/{project}", get(handlers::viewer_page))
        .with_state(state)
}
