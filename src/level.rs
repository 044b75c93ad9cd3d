//! Log levels and their console colors.

use std::fmt;
use std::str::FromStr;

/// ANSI SGR sequence that resets all attributes.
pub const RESET: &str = "\x1b[0m";

/// Severity of a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Debug,
    Warn,
    Error,
}

impl Level {
    /// Lower-case name, as passed to [`RotatingLogger::write`](crate::RotatingLogger::write).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Foreground color escape used on the console.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Info => "\x1b[32m",
            Self::Debug => "\x1b[34m",
            Self::Warn => "\x1b[33m",
            Self::Error => "\x1b[31m",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

/// Wrap `line` in the color of `level`.
///
/// Levels outside the known four are returned unchanged.
pub fn colorize(level: &str, line: &str) -> String {
    match level.parse::<Level>() {
        Ok(level) => format!("{}{}{}", level.color(), line, RESET),
        Err(_) => line.to_string(),
    }
}
