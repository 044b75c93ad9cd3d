//! Builder pattern for constructing a logger.
//!
//! # Example
//!
//! ```rust,no_run
//! let logger = duolog::builder()
//!     .with_prefix("API")
//!     .with_file("/var/log/api.log")
//!     .with_max_lines(50_000)
//!     .build()
//!     .expect("Failed to create logger");
//!
//! logger.info("started");
//! ```

use std::path::PathBuf;

#[cfg(feature = "non-blocking")]
use crate::non_blocking::{NonBlockingLogger, WorkerGuard};
use crate::{Console, LoggerConfig, Result, RotatingLogger};

/// A builder for configuring a [`RotatingLogger`].
#[derive(Debug, Clone, Default)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    console: Option<Console>,
}

impl LoggerBuilder {
    /// Create a new LoggerBuilder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a LoggerBuilder from an existing configuration.
    pub fn from_config(config: LoggerConfig) -> Self {
        Self {
            config,
            console: None,
        }
    }

    /// Set the tag inserted into every line.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.config = self.config.with_prefix(prefix);
        self
    }

    /// Set the base log file path.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_file(path);
        self
    }

    /// Set the directory relative file paths are resolved against.
    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config = self.config.with_log_dir(dir);
        self
    }

    /// Enable or disable ANSI colors on the console.
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.config = self.config.with_colors(use_colors);
        self
    }

    /// Set the number of lines per file.
    pub fn with_max_lines(mut self, max_lines: u64) -> Self {
        self.config = self.config.with_max_lines(max_lines);
        self
    }

    /// Set the filter level used by `init`.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.config = self.config.with_level(level);
        self
    }

    /// Print console lines somewhere other than stdout/stderr.
    pub fn with_console(mut self, console: Console) -> Self {
        self.console = Some(console);
        self
    }

    /// Get the current configuration without building.
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Build a synchronous logger.
    ///
    /// # Errors
    ///
    /// Returns an error if `max_lines` is zero, the file path has no file
    /// name, or the default log directory cannot be determined.
    pub fn build(self) -> Result<RotatingLogger> {
        let console = self.console.unwrap_or_default();
        RotatingLogger::with_console(&self.config, console)
    }

    /// Build a logger whose file appends run on a background thread.
    #[cfg(feature = "non-blocking")]
    pub fn build_non_blocking(self) -> Result<(NonBlockingLogger, WorkerGuard)> {
        Ok(self.build()?.into_non_blocking())
    }

    /// Install the configured logger as the global tracing subscriber.
    ///
    /// A console set with [`with_console`](Self::with_console) is not used
    /// here; the global logger prints to stdout and stderr.
    #[cfg(feature = "tracing-integration")]
    pub fn init(self) -> Result<()> {
        crate::init_logging(&self.config, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaptureBuffer;

    #[test]
    fn test_builder_new() {
        let builder = LoggerBuilder::new();
        assert_eq!(builder.config(), &LoggerConfig::new());
    }

    #[test]
    fn test_builder_chaining() {
        let builder = LoggerBuilder::new()
            .with_prefix("JOB")
            .with_file("jobs.log")
            .with_log_dir("/srv")
            .with_colors(false)
            .with_max_lines(12)
            .with_level("debug");

        let config = builder.config();
        assert_eq!(config.prefix, "JOB");
        assert_eq!(config.file, PathBuf::from("jobs.log"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/srv")));
        assert!(!config.use_colors);
        assert_eq!(config.max_lines, 12);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_builder_from_config() {
        let original = LoggerConfig::new().with_prefix("X").with_max_lines(3);
        let builder = LoggerBuilder::from_config(original.clone());
        assert_eq!(builder.config(), &original);
    }

    #[test]
    fn test_builder_build_uses_console() {
        let dir = tempfile::tempdir().unwrap();
        let out = CaptureBuffer::new();
        let logger = LoggerBuilder::new()
            .with_log_dir(dir.path())
            .with_colors(false)
            .with_console(Console::from_writers(out.clone(), std::io::sink()))
            .build()
            .unwrap();

        logger.info("built");
        assert!(out.contents().contains("[INFO] built"));
        assert!(dir.path().join("app-1.log").exists());
    }

    #[test]
    fn test_builder_build_rejects_zero_max_lines() {
        assert!(LoggerBuilder::new().with_max_lines(0).build().is_err());
    }

    #[cfg(feature = "non-blocking")]
    #[test]
    fn test_builder_build_non_blocking() {
        let dir = tempfile::tempdir().unwrap();
        let (logger, guard) = LoggerBuilder::new()
            .with_log_dir(dir.path())
            .with_file("nb.log")
            .with_console(Console::from_writers(std::io::sink(), std::io::sink()))
            .build_non_blocking()
            .unwrap();

        logger.warn("later");
        drop(guard);

        let content = std::fs::read_to_string(dir.path().join("nb-1.log")).unwrap();
        assert!(content.contains("[WARN] later"));
    }
}
