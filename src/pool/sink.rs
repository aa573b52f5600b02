//! Serialized line output.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// Output shared by every job.
///
/// Each [`LineSink::emit`] writes one whole line and flushes it under a lock,
/// so concurrent jobs never interleave partial lines. Ordering between jobs is
/// whatever order they finish in.
pub struct LineSink<W> {
    inner: Mutex<W>,
}

impl<W: Write> LineSink<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        LineSink {
            inner: Mutex::new(writer),
        }
    }

    /// Writes `line` followed by a newline, then flushes.
    ///
    /// The write is blocking; a stalled stdout reader stalls the calling
    /// worker thread until the pipe drains.
    pub fn emit(&self, line: &str) -> io::Result<()> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writeln!(writer, "{line}")?;
        writer.flush()
    }

    /// Returns the writer, e.g. to inspect captured output.
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}
