//! Shared helpers for the logview integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top
//! of a harness file. The fixtures are plain filesystem helpers and stay
//! deterministic under `tokio::time::pause()`; the live-server helpers use
//! real sockets and belong in wall-clock tests only.
#![allow(dead_code)]

pub mod fixtures;
pub mod live_server;

pub use fixtures::*;
pub use live_server::*;
