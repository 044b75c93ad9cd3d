//! Routing `tracing` events into a rotating logger.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use once_cell::sync::Lazy;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::logger::LogSink;
use crate::{Error, LoggerConfig, Result, RotatingLogger};

static LOG_GUARD: Lazy<Mutex<Option<WorkerGuard>>> = Lazy::new(|| Mutex::new(None));

/// A [`Layer`] writing every event to a [`LogSink`].
///
/// TRACE and DEBUG events become `debug` lines. Events emitted by this
/// crate are skipped, since the sink itself emits them while writing.
pub struct RotatingLayer<S> {
    sink: Arc<S>,
}

impl<S: LogSink> RotatingLayer<S> {
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }
}

impl<S, C> Layer<C> for RotatingLayer<S>
where
    S: LogSink + 'static,
    C: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, C>) {
        let metadata = event.metadata();
        if is_own_target(metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.sink
            .write(level_name(metadata.level()), &visitor.finish());
    }
}

/// `duolog` or any of its modules, but not `duolog_ext` or `duologger`.
fn is_own_target(target: &str) -> bool {
    target
        .strip_prefix(env!("CARGO_CRATE_NAME"))
        .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
}

fn level_name(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "error",
        Level::WARN => "warn",
        Level::INFO => "info",
        Level::DEBUG | Level::TRACE => "debug",
    }
}

/// Collects `message` and appends the other fields as `key=value`.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Install a global subscriber sending events to a non-blocking rotating logger.
///
/// The worker guard is kept for the rest of the process.
pub fn init_logging(config: &LoggerConfig, cli_verbose: Option<u8>) -> Result<()> {
    let log_spec = effective_log_spec(config, cli_verbose);
    let env_filter = EnvFilter::try_new(&log_spec).map_err(|e| Error::Init(e.to_string()))?;

    let (logger, guard) = RotatingLogger::new(config)?.into_non_blocking();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(RotatingLayer::new(Arc::new(logger)))
        .try_init()
        .map_err(|e| Error::Init(e.to_string()))?;

    *LOG_GUARD
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(guard);

    Ok(())
}

/// Flush and stop the worker started by [`init_logging`].
///
/// Events logged afterwards still reach the console but no longer the file;
/// a single notice on stderr reports that the worker has stopped.
pub fn shutdown_logging() {
    let guard = LOG_GUARD
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .take();
    drop(guard);
}

/// Determine the filter specification, considering config and CLI overrides.
fn effective_log_spec(config: &LoggerConfig, cli_verbose: Option<u8>) -> String {
    // RUST_LOG takes precedence over everything
    if let Ok(rust_log) = std::env::var("RUST_LOG")
        && !rust_log.is_empty()
    {
        return rust_log;
    }

    let level = if config.level.is_empty() {
        "info"
    } else {
        config.level.as_str()
    };

    match cli_verbose {
        None | Some(0) => level.to_string(),
        Some(1) => "debug".to_string(),
        Some(_) => "trace".to_string(),
    }
}
