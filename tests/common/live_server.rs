//! Ephemeral HTTP server and a bare-bones SSE reader.
//!
//! End-to-end streaming cannot run through `oneshot`: the response body
//! never ends. These helpers serve the real router on a random local port
//! and read the raw socket, which also pins down what actually goes over
//! the wire.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

/// Serve `app` on an ephemeral local port. The listener is bound before
/// this returns, so requests can follow immediately.
pub async fn spawn_server(app: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("test server");
    });
    addr
}

/// Open a project's stream endpoint and return the connected socket once
/// the request is on the wire. The caller reads the response at its own
/// pace.
pub async fn open_stream(addr: SocketAddr, project: &str) -> TcpStream {
    let mut stream = TcpStream::connect(addr).await.expect("connect to server");
    let request = format!(
        "GET /log_stream/{project} HTTP/1.1\r\nHost: {addr}\r\nAccept: text/event-stream\r\n\r\n"
    );
    stream
        .write_all(request.as_bytes())
        .await
        .expect("send stream request");
    stream
}

/// Read until at least `events` SSE data lines arrived or `timeout` passed.
/// Returns everything read so far, headers and body framing included.
pub async fn read_until_events(stream: &mut TcpStream, events: usize, timeout: Duration) -> String {
    let deadline = tokio::time::Instant::now() + timeout;
    let mut collected = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let text = String::from_utf8_lossy(&collected).into_owned();
        if data_lines(&text).len() >= events {
            return text;
        }
        let Some(remaining) = deadline.checked_duration_since(tokio::time::Instant::now()) else {
            return text;
        };
        match tokio::time::timeout(remaining, stream.read(&mut chunk)).await {
            Ok(Ok(0)) => return text,
            Ok(Ok(n)) => collected.extend_from_slice(&chunk[..n]),
            Ok(Err(err)) => panic!("stream read failed: {err}"),
            Err(_) => return text,
        }
    }
}

/// The `data:` payloads in raw SSE text. Status line, headers, chunked
/// framing and keep-alive comments all fall out of the filter.
pub fn data_lines(raw: &str) -> Vec<String> {
    raw.lines()
        .filter_map(|line| line.strip_prefix("data: ").map(str::to_string))
        .collect()
}
