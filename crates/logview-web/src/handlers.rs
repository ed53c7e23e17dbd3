//! Request handlers for the logview routes.
//!
//! Handlers stay thin: resolve against a registry snapshot, hand real work
//! to `logview-tail`, render with [`crate::pages`]. The streaming handler is
//! the only one with moving parts, documented inline.

use crate::error::HttpError;
use crate::pages;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Html;
use axum::Json;
use logview_core::ProjectRegistry;
use logview_tail::{ChannelSink, StreamSession, TailSource};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};

/// Lines buffered between a session and its HTTP response body. Small on
/// purpose: the session paces itself, and a stalled client should feel
/// backpressure rather than grow a queue.
const STREAM_BUFFER_LINES: usize = 32;

/// `GET /health`
pub async fn health() -> &'static str {
    "OK"
}

/// `GET /` — the project table.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(pages::config_table(&state.registry.snapshot()))
}

/// `POST /` — validate and install a replacement mapping.
///
/// The candidate registry is validated before the swap, so a rejected
/// mapping leaves the running one untouched.
pub async fn replace_mapping(
    State(state): State<AppState>,
    Json(mapping): Json<BTreeMap<String, PathBuf>>,
) -> Result<Html<String>, HttpError> {
    let replacement = ProjectRegistry::new(mapping)?;
    let projects = replacement.len();
    state.registry.replace(replacement);
    tracing::info!(projects, "project mapping replaced");
    Ok(Html(pages::config_table(&state.registry.snapshot())))
}

/// `GET /{project}` — the live viewer page. 404s before rendering anything
/// for a name the current snapshot does not know.
pub async fn viewer_page(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Html<String>, HttpError> {
    state.registry.snapshot().resolve(&project)?;
    Ok(Html(pages::viewer(&project)))
}

/// `GET /log_stream/{project}` — the live line stream.
///
/// Resolution happens before any tailing starts, so an unknown project is a
/// plain 404 with no file I/O behind it. The session runs on its own task
/// and owns the tail cursor; the response body drains the channel between
/// them. When the client goes away the body is dropped, the channel closes,
/// and the session observes that within one pause. Process shutdown reaches
/// the session through a child of the shutdown token.
pub async fn stream_logs(
    State(state): State<AppState>,
    Path(project): Path<String>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static>, HttpError> {
    let snapshot = state.registry.snapshot();
    let path = snapshot.resolve(&project)?.to_path_buf();

    let (tx, rx) = mpsc::channel(STREAM_BUFFER_LINES);
    let source = TailSource::new(path.clone(), state.tail.window_lines);
    let session = StreamSession::new(
        source,
        ChannelSink::new(tx),
        &state.tail,
        state.shutdown.child_token(),
    );

    tracing::debug!(project = %project, path = %path.display(), "stream session starting");
    tokio::spawn(async move {
        let end = session.run().await;
        tracing::debug!(project = %project, reason = ?end, "stream session ended");
    });

    // One SSE event per line. The terminator is the line framing's job now,
    // so it is stripped at this boundary; the core keeps emitting
    // `\n`-terminated lines for transports that need them.
    let stream = ReceiverStream::new(rx)
        .map(|line| Ok(Event::default().data(line.trim_end_matches('\n'))));
    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}
