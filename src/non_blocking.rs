//! Fire-and-forget logging.
//!
//! [`NonBlockingLogger`] prints the console line on the caller's thread and
//! queues the file line for a single background worker, which performs the
//! append and the rotation bookkeeping. The queue is FIFO and holds up to
//! 128 000 lines; it never drops lines, so a caller blocks while the queue is
//! full. File appends happen in submission order. Pending lines are flushed
//! when the [`WorkerGuard`] is dropped; after that, lines only reach the
//! console.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder};
pub use tracing_appender::non_blocking::WorkerGuard;

use crate::format::{FormattedLine, LineFormat};
use crate::logger::LogSink;
use crate::writer::{LineSink, RotatingFile};
use crate::{Console, RotatingLogger};

const WORKER_THREAD_NAME: &str = "duolog-file-writer";

/// Logger whose file appends run on a background thread.
#[derive(Clone)]
pub struct NonBlockingLogger {
    format: LineFormat,
    console: Console,
    writer: NonBlocking,
    file: Arc<RotatingFile>,
    closed: Arc<AtomicBool>,
}

impl NonBlockingLogger {
    /// Move `logger`'s file onto a background worker.
    pub fn new(logger: RotatingLogger) -> (Self, WorkerGuard) {
        let (format, console, file) = logger.into_parts();
        let (writer, guard) = NonBlockingBuilder::default()
            .lossy(false)
            .thread_name(WORKER_THREAD_NAME)
            .finish(LineSink::new(Arc::clone(&file)));

        (
            Self {
                format,
                console,
                writer,
                file,
                closed: Arc::new(AtomicBool::new(false)),
            },
            guard,
        )
    }

    /// Print `message` now and queue it for the log file.
    pub fn write(&self, level: &str, message: &str) {
        let FormattedLine { plain, console } = self.format.render(level, message);
        self.console.print_line(&console);

        if self.closed.load(Ordering::Acquire) {
            return;
        }

        // Only fails once the worker is gone, i.e. after the guard was dropped.
        if let Err(e) = self.writer.clone().write_all(plain.as_bytes())
            && !self.closed.swap(true, Ordering::AcqRel)
        {
            self.console.print_error(&format!(
                "failed to queue log line, file logging stopped: {}",
                e
            ));
        }
    }

    /// Whether the worker has stopped accepting lines.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write("info", message.as_ref());
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.write("debug", message.as_ref());
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.write("warn", message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write("error", message.as_ref());
    }

    /// Sequence number of the current file, as far as the worker got.
    pub fn sequence(&self) -> u64 {
        self.file.sequence()
    }

    /// Lines the worker has appended to the current file.
    pub fn line_count(&self) -> u64 {
        self.file.line_count()
    }

    pub fn current_file(&self) -> PathBuf {
        self.file.current_file()
    }
}

impl std::fmt::Debug for NonBlockingLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonBlockingLogger")
            .field("format", &self.format)
            .field("file", &self.file)
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl LogSink for NonBlockingLogger {
    fn write(&self, level: &str, message: &str) {
        NonBlockingLogger::write(self, level, message);
    }
}

impl RotatingLogger {
    /// Turn this logger into a [`NonBlockingLogger`].
    ///
    /// Keep the returned guard alive for as long as lines are logged.
    pub fn into_non_blocking(self) -> (NonBlockingLogger, WorkerGuard) {
        NonBlockingLogger::new(self)
    }
}
