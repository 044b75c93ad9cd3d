use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::Result;
use crate::level::colorize;

/// `2026-01-09T14:03:27.512Z`
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

/// Format a UTC instant with millisecond precision.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String> {
    Ok(at.format(TIMESTAMP_FORMAT)?)
}

fn now_timestamp() -> String {
    let now = OffsetDateTime::now_utc();
    format_timestamp(now).unwrap_or_else(|_| now.unix_timestamp().to_string())
}

/// Build `[<timestamp>] [<prefix>] [<LEVEL>] <message>`.
pub fn format_line(timestamp: &str, prefix: &str, level: &str, message: &str) -> String {
    format!(
        "[{}] [{}] [{}] {}",
        timestamp,
        prefix,
        level.to_uppercase(),
        message
    )
}

/// A line rendered for both sinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    /// Text appended to the log file, without the trailing newline.
    pub plain: String,
    /// Text printed on the console, possibly wrapped in color codes.
    pub console: String,
}

/// Prefix and color settings shared by every line of one logger.
#[derive(Debug, Clone)]
pub struct LineFormat {
    prefix: String,
    use_colors: bool,
}

impl LineFormat {
    pub fn new(prefix: impl Into<String>, use_colors: bool) -> Self {
        Self {
            prefix: prefix.into(),
            use_colors,
        }
    }

    /// Render a message stamped with the current time.
    pub fn render(&self, level: &str, message: &str) -> FormattedLine {
        self.render_at(&now_timestamp(), level, message)
    }

    /// Render a message with an explicit timestamp.
    pub fn render_at(&self, timestamp: &str, level: &str, message: &str) -> FormattedLine {
        let plain = format_line(timestamp, &self.prefix, level, message);
        let console = if self.use_colors {
            colorize(level, &plain)
        } else {
            plain.clone()
        };
        FormattedLine { plain, console }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn use_colors(&self) -> bool {
        self.use_colors
    }
}
