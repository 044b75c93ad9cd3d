//! Console side of the logger.
//!
//! Log lines and rotation notices go to the "out" stream, append failures
//! to the "err" stream. Both default to the process's stdout and stderr;
//! [`CaptureBuffer`] lets tests and embedders collect them in memory.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Output and error streams used for console lines.
#[derive(Clone)]
pub struct Console {
    out: SharedWriter,
    err: SharedWriter,
}

impl Console {
    /// Console writing to stdout and stderr.
    pub fn stdio() -> Self {
        Self::from_writers(io::stdout(), io::stderr())
    }

    /// Console writing to arbitrary writers.
    pub fn from_writers<O, E>(out: O, err: E) -> Self
    where
        O: Write + Send + 'static,
        E: Write + Send + 'static,
    {
        Self {
            out: Arc::new(Mutex::new(Box::new(out))),
            err: Arc::new(Mutex::new(Box::new(err))),
        }
    }

    /// Write one line to the output stream.
    ///
    /// Console failures are not reported anywhere.
    pub fn print_line(&self, line: &str) {
        let mut out = lock(&self.out);
        let _ = writeln!(out, "{}", line);
        let _ = out.flush();
    }

    /// Write one diagnostic line to the error stream.
    pub fn print_error(&self, line: &str) {
        let mut err = lock(&self.err);
        let _ = writeln!(err, "{}", line);
        let _ = err.flush();
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdio()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console").finish_non_exhaustive()
    }
}

fn lock(writer: &SharedWriter) -> MutexGuard<'_, Box<dyn Write + Send>> {
    writer.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory writer whose clones share one buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, decoded lossily as UTF-8.
    pub fn contents(&self) -> String {
        let buf = self.buf.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Captured output split into lines.
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
