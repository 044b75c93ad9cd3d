//! # Duolog
//!
//! Leveled logging to the console and to line-count rotated log files.
//!
//! ## Features
//!
//! - Timestamped `[time] [prefix] [LEVEL] message` lines
//! - Console output colored by level
//! - Plain-text log files named `<stem>-<sequence><ext>`, rotated every
//!   `max_lines` lines
//! - Fire-and-forget file appends on a background worker (`non-blocking`)
//! - A `tracing` layer feeding the same files (`tracing-integration`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use duolog::{LoggerConfig, RotatingLogger};
//!
//! let config = LoggerConfig::new()
//!     .with_prefix("MY_APP")
//!     .with_file("my_app.log")
//!     .with_max_lines(5);
//! let logger = RotatingLogger::new(&config)?;
//!
//! for i in 1..=5 {
//!     logger.info(format!("line {i}"));
//! }
//! // The fifth line filled my_app-1.log; this one goes to my_app-2.log.
//! logger.info("line 6 in the new file");
//! # Ok::<(), duolog::Error>(())
//! ```

pub mod builder;
pub mod config;
pub mod console;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
pub mod rotation;
pub mod writer;

#[cfg(feature = "non-blocking")]
pub mod non_blocking;

#[cfg(feature = "tracing-integration")]
pub mod tracing_init;

pub use builder::LoggerBuilder;
pub use config::LoggerConfig;
pub use console::{CaptureBuffer, Console};
pub use error::{Error, Result};
pub use level::Level;
pub use logger::{LogSink, RotatingLogger};
pub use rotation::{FileNaming, LineRotation};
pub use writer::RotatingFile;

#[cfg(feature = "non-blocking")]
pub use non_blocking::{NonBlockingLogger, WorkerGuard};

#[cfg(feature = "tracing-integration")]
pub use tracing_init::{RotatingLayer, init_logging, shutdown_logging};

/// Start configuring a logger.
pub fn builder() -> LoggerBuilder {
    LoggerBuilder::new()
}
