//! Tail source: incremental line reads from one log file.
//!
//! Every poll opens the file fresh, reconciles a byte-offset cursor against
//! the file's identity and size, and consumes bytes up to the last newline.
//! No descriptor survives between polls, so external rotation or truncation
//! never invalidates held state: both are detected and the cursor resets to
//! the top of the replacement content.

use std::io::SeekFrom;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Chunk size for the backward scan that positions a fresh cursor on the
/// trailing lines of an existing file.
const SCAN_CHUNK: u64 = 8 * 1024;

/// The tailed file could not be opened or read this poll.
///
/// Transient by contract: rotation windows and permission flaps are
/// expected, so sessions retry after the idle interval instead of
/// terminating.
#[derive(Debug, Error)]
#[error("log source unavailable: {path}: {source}")]
pub struct SourceUnavailable {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

/// Identity of the file behind a path, used to detect rotation.
///
/// On Unix this is the (device, inode) pair. Elsewhere there is no cheap
/// stable identity, so rotation detection falls back to size shrinkage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileIdentity {
    #[cfg(unix)]
    device: u64,
    #[cfg(unix)]
    inode: u64,
}

impl FileIdentity {
    #[cfg(unix)]
    fn of(meta: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            device: meta.dev(),
            inode: meta.ino(),
        }
    }

    #[cfg(not(unix))]
    fn of(_meta: &std::fs::Metadata) -> Self {
        Self {}
    }
}

/// Read position within one incarnation of the file.
///
/// `offset` always sits on a line boundary, just past the last consumed
/// newline. Bytes beyond it without a terminator are re-read next poll.
#[derive(Debug, Clone, Copy, Default)]
struct TailCursor {
    identity: Option<FileIdentity>,
    offset: u64,
}

// ---------------------------------------------------------------------------
// TailSource
// ---------------------------------------------------------------------------

/// Incremental reader for one log file.
///
/// Owned exclusively by a single session. Concurrent viewers of the same
/// file each hold their own source and cursor, trading redundant reads for
/// zero coordination.
#[derive(Debug)]
pub struct TailSource {
    path: PathBuf,
    window_lines: usize,
    cursor: TailCursor,
}

impl TailSource {
    pub fn new(path: impl Into<PathBuf>, window_lines: usize) -> Self {
        Self {
            path: path.into(),
            window_lines,
            cursor: TailCursor::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read lines appended since the previous poll.
    ///
    /// The first poll attaches to the file and returns at most
    /// `window_lines` of existing backlog. Later polls return everything
    /// appended since, in order, each line `\n`-terminated. A trailing
    /// fragment with no terminator stays unconsumed until it is completed.
    pub async fn poll(&mut self) -> Result<Vec<String>, SourceUnavailable> {
        let mut file = File::open(&self.path)
            .await
            .map_err(|source| self.unavailable(source))?;
        let meta = file
            .metadata()
            .await
            .map_err(|source| self.unavailable(source))?;
        let identity = FileIdentity::of(&meta);
        let size = meta.len();

        match self.cursor.identity {
            None => {
                // First attach: skip ahead so the viewer gets a bounded
                // backlog instead of the whole history.
                let offset = window_start(&mut file, size, self.window_lines)
                    .await
                    .map_err(|source| self.unavailable(source))?;
                self.cursor = TailCursor {
                    identity: Some(identity),
                    offset,
                };
            }
            Some(known) if known != identity => {
                tracing::debug!(
                    path = %self.path.display(),
                    "file rotated, restarting from the top"
                );
                self.cursor = TailCursor {
                    identity: Some(identity),
                    offset: 0,
                };
            }
            Some(_) if size < self.cursor.offset => {
                tracing::debug!(
                    path = %self.path.display(),
                    "file truncated, restarting from the top"
                );
                self.cursor.offset = 0;
            }
            Some(_) => {}
        }

        if size == self.cursor.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.cursor.offset))
            .await
            .map_err(|source| self.unavailable(source))?;
        let mut buf = Vec::with_capacity(size.saturating_sub(self.cursor.offset) as usize);
        file.read_to_end(&mut buf)
            .await
            .map_err(|source| self.unavailable(source))?;

        let (lines, consumed) = complete_lines(&buf);
        self.cursor.offset += consumed as u64;
        Ok(lines)
    }

    fn unavailable(&self, source: std::io::Error) -> SourceUnavailable {
        SourceUnavailable {
            path: self.path.clone(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Line assembly
// ---------------------------------------------------------------------------

/// Split `buf` into complete lines, reporting how many bytes were consumed.
///
/// Only bytes up to and including the last `\n` are consumed. Each returned
/// line is lossily UTF-8 decoded, has a `\r` before the terminator stripped,
/// and ends in exactly one `\n`.
fn complete_lines(buf: &[u8]) -> (Vec<String>, usize) {
    let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
        return (Vec::new(), 0);
    };
    let consumed = last_newline + 1;
    let lines = buf[..consumed]
        .split_inclusive(|&b| b == b'\n')
        .map(|raw| {
            let body = raw.strip_suffix(b"\n").unwrap_or(raw);
            let body = body.strip_suffix(b"\r").unwrap_or(body);
            let mut line = String::from_utf8_lossy(body).into_owned();
            line.push('\n');
            line
        })
        .collect();
    (lines, consumed)
}

/// Find the offset where the trailing `lines` terminated lines begin.
///
/// Scans backward from EOF in chunks, counting newlines. Bytes after the
/// final newline (an in-progress line) sit outside the window. Returns 0
/// when the file holds fewer terminated lines than requested.
async fn window_start(file: &mut File, size: u64, lines: usize) -> std::io::Result<u64> {
    if size == 0 {
        return Ok(0);
    }

    // The window's first line begins just past newline `lines + 1`, counted
    // from the end of the file.
    let mut remaining = lines + 1;
    let mut end = size;
    let mut chunk = vec![0u8; SCAN_CHUNK as usize];

    while end > 0 {
        let start = end.saturating_sub(SCAN_CHUNK);
        let len = (end - start) as usize;
        file.seek(SeekFrom::Start(start)).await?;
        file.read_exact(&mut chunk[..len]).await?;

        for (i, &byte) in chunk[..len].iter().enumerate().rev() {
            if byte != b'\n' {
                continue;
            }
            remaining -= 1;
            if remaining == 0 {
                return Ok(start + i as u64 + 1);
            }
        }
        end = start;
    }

    Ok(0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
