use std::path::PathBuf;
use std::sync::Arc;

use crate::format::{FormattedLine, LineFormat};
use crate::rotation::{FileNaming, LineRotation};
use crate::writer::RotatingFile;
use crate::{Console, LoggerConfig, Result};

/// Something that accepts leveled log lines.
///
/// Writes never fail from the caller's point of view; sinks report their
/// own errors.
pub trait LogSink: Send + Sync {
    /// Log `message` under `level` (`info`, `debug`, `warn`, `error`, any case).
    fn write(&self, level: &str, message: &str);
}

/// Leveled logger writing to the console and to a line-count rotated file.
///
/// Every line goes to the console first, then is appended to
/// `<stem>-<sequence><ext>`. After `max_lines` lines the sequence number is
/// bumped and later lines go to the next file.
///
/// ```rust,no_run
/// use duolog::{LoggerConfig, RotatingLogger};
///
/// let logger = RotatingLogger::new(
///     &LoggerConfig::new().with_prefix("API").with_file("/var/log/api.log"),
/// )?;
/// logger.info("listening on :8080");
/// logger.error("upstream timed out");
/// # Ok::<(), duolog::Error>(())
/// ```
#[derive(Debug)]
pub struct RotatingLogger {
    format: LineFormat,
    console: Console,
    file: Arc<RotatingFile>,
}

impl RotatingLogger {
    /// Create a logger printing to stdout and stderr.
    pub fn new(config: &LoggerConfig) -> Result<Self> {
        Self::with_console(config, Console::stdio())
    }

    /// Create a logger printing to the given console.
    ///
    /// No file is touched here; the first log line creates the first file.
    pub fn with_console(config: &LoggerConfig, console: Console) -> Result<Self> {
        config.validate()?;
        let base_path = config.resolve_base_path()?;
        let naming = FileNaming::from_base_path(&base_path)?;
        let rotation = LineRotation::new(naming, config.max_lines)?;

        Ok(Self {
            format: LineFormat::new(config.prefix.clone(), config.use_colors),
            file: Arc::new(RotatingFile::new(rotation, console.clone())),
            console,
        })
    }

    /// Log `message` under an arbitrary level.
    ///
    /// The level is shown upper-cased; only info, debug, warn and error are
    /// colored. Append failures are reported on stderr and swallowed.
    pub fn write(&self, level: &str, message: &str) {
        let FormattedLine { plain, console } = self.format.render(level, message);
        self.console.print_line(&console);
        self.file.append(&plain);
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

    /// Sequence number of the current file, starting at 1.
    pub fn sequence(&self) -> u64 {
        self.file.sequence()
    }

    /// Lines appended to the current file so far.
    pub fn line_count(&self) -> u64 {
        self.file.line_count()
    }

    pub fn max_lines(&self) -> u64 {
        self.file.max_lines()
    }

    /// Path the next line will be appended to.
    pub fn current_file(&self) -> PathBuf {
        self.file.current_file()
    }

    pub fn prefix(&self) -> &str {
        self.format.prefix()
    }

    pub fn use_colors(&self) -> bool {
        self.format.use_colors()
    }

    #[cfg(feature = "non-blocking")]
    pub(crate) fn into_parts(self) -> (LineFormat, Console, Arc<RotatingFile>) {
        (self.format, self.console, self.file)
    }
}

impl LogSink for RotatingLogger {
    fn write(&self, level: &str, message: &str) {
        RotatingLogger::write(self, level, message);
    }
}
