//! logview-web — the HTTP surface for logview.
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | HTML table of configured projects |
//! | `POST /` | validate and install a replacement mapping |
//! | `GET /{project}` | live viewer page |
//! | `GET /log_stream/{project}` | the line stream, framed as SSE |
//! | `GET /health` | liveness check |
//!
//! Handlers are thin glue over `logview-core` (which owns the mapping) and
//! `logview-tail` (which does the work): resolve a snapshot, spawn a
//! session, bridge its channel into the response body.

pub mod error;
pub mod handlers;
pub mod pages;
pub mod routes;
pub mod state;

pub use error::HttpError;
pub use routes::router;
pub use state::{AppContext, AppState};
