use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Configuration for a [`RotatingLogger`](crate::RotatingLogger)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Tag inserted into every line
    #[serde(default)]
    pub prefix: String,
    /// Base log file path; `app.log` produces `app-1.log`, `app-2.log`, ...
    #[serde(default = "default_file")]
    pub file: PathBuf,
    /// Directory a relative `file` is resolved against.
    /// Defaults to the directory of the running executable.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    /// Wrap console lines in ANSI colors
    #[serde(default = "default_use_colors")]
    pub use_colors: bool,
    /// Lines per file before rotating.
    /// Can be a number or a string with units (k/m), e.g. 500, "10k", "1M".
    #[serde(
        default = "default_max_lines",
        deserialize_with = "crate::rotation::deserialize_max_lines"
    )]
    pub max_lines: u64,
    /// Filter level used when installed as a tracing subscriber
    #[serde(default = "default_level")]
    pub level: String,
}

impl LoggerConfig {
    /// Create a new LoggerConfig with defaults
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            file: default_file(),
            log_dir: None,
            use_colors: default_use_colors(),
            max_lines: default_max_lines(),
            level: default_level(),
        }
    }

    /// Set line prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Set base log file path
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = file.into();
        self
    }

    /// Set the directory relative file paths are anchored to
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(log_dir.into());
        self
    }

    /// Enable or disable console colors
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set rotation threshold
    pub fn with_max_lines(mut self, max_lines: u64) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set tracing filter level
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Check values that deserialization alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        if self.max_lines == 0 {
            return Err(Error::Config(
                "max_lines must be a positive integer".to_string(),
            ));
        }
        if self.file.as_os_str().is_empty() {
            return Err(Error::Config("log file path is empty".to_string()));
        }
        Ok(())
    }

    /// Resolve `file` to the base path rotated files are derived from.
    ///
    /// Absolute paths are kept; relative ones are joined onto `log_dir`, or
    /// onto the executable's directory when no `log_dir` is set, so the
    /// result does not depend on the process working directory.
    pub fn resolve_base_path(&self) -> Result<PathBuf> {
        if self.file.is_absolute() {
            return Ok(self.file.clone());
        }
        let dir = match &self.log_dir {
            Some(dir) => dir.clone(),
            None => default_log_dir()?,
        };
        Ok(dir.join(&self.file))
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Directory containing the running executable.
pub fn default_log_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        Error::Config(format!(
            "executable path has no parent directory: {}",
            exe.display()
        ))
    })
}

fn default_file() -> PathBuf {
    PathBuf::from("app.log")
}

fn default_use_colors() -> bool {
    true
}

fn default_max_lines() -> u64 {
    10_000
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_config_new() {
        let config = LoggerConfig::new();
        assert_eq!(config.prefix, "");
        assert_eq!(config.file, PathBuf::from("app.log"));
        assert!(config.log_dir.is_none());
        assert!(config.use_colors);
        assert_eq!(config.max_lines, 10_000);
        assert_eq!(config.level, "info");
    }

    #[test]
    fn test_logger_config_default() {
        assert_eq!(LoggerConfig::default(), LoggerConfig::new());
    }

    #[test]
    fn test_logger_config_with_methods() {
        let config = LoggerConfig::new()
            .with_prefix("API")
            .with_file("api.log")
            .with_log_dir("/var/log/api")
            .with_colors(false)
            .with_max_lines(5)
            .with_level("debug");

        assert_eq!(config.prefix, "API");
        assert_eq!(config.file, PathBuf::from("api.log"));
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/api")));
        assert!(!config.use_colors);
        assert_eq!(config.max_lines, 5);
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_validate_rejects_zero_max_lines() {
        let config = LoggerConfig::new().with_max_lines(0);
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let config = LoggerConfig::new().with_file("");
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_resolve_relative_against_log_dir() {
        let config = LoggerConfig::new()
            .with_file("logs/app.log")
            .with_log_dir("/srv/app");
        assert_eq!(
            config.resolve_base_path().unwrap(),
            PathBuf::from("/srv/app/logs/app.log")
        );
    }

    #[test]
    fn test_resolve_absolute_ignores_log_dir() {
        let config = LoggerConfig::new()
            .with_file("/tmp/abs.log")
            .with_log_dir("/srv/app");
        assert_eq!(
            config.resolve_base_path().unwrap(),
            PathBuf::from("/tmp/abs.log")
        );
    }

    #[test]
    fn test_resolve_defaults_to_executable_dir() {
        let resolved = LoggerConfig::new().resolve_base_path().unwrap();
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(resolved, exe_dir.join("app.log"));
        assert!(resolved.is_absolute());
    }

    #[test]
    fn test_deserialize_yaml_defaults() {
        let config: LoggerConfig = serde_yaml::from_str("prefix: WORKER").unwrap();
        assert_eq!(config.prefix, "WORKER");
        assert_eq!(config.file, PathBuf::from("app.log"));
        assert!(config.use_colors);
        assert_eq!(config.max_lines, 10_000);
    }

    #[test]
    fn test_deserialize_yaml_full() {
        let yaml = r#"
prefix: API
file: api.log
log_dir: /var/log/api
use_colors: false
max_lines: "50k"
level: warn
"#;
        let config: LoggerConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            config,
            LoggerConfig::new()
                .with_prefix("API")
                .with_file("api.log")
                .with_log_dir("/var/log/api")
                .with_colors(false)
                .with_max_lines(50_000)
                .with_level("warn")
        );
    }

    #[test]
    fn test_deserialize_toml() {
        let toml_str = r#"
prefix = "JOB"
file = "jobs.txt"
max_lines = 250
"#;
        let config: LoggerConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.prefix, "JOB");
        assert_eq!(config.file, PathBuf::from("jobs.txt"));
        assert_eq!(config.max_lines, 250);
    }

    #[test]
    fn test_deserialize_rejects_non_positive_max_lines() {
        assert!(serde_yaml::from_str::<LoggerConfig>("max_lines: 0").is_err());
        assert!(serde_yaml::from_str::<LoggerConfig>("max_lines: -10").is_err());
        assert!(toml::from_str::<LoggerConfig>("max_lines = 0").is_err());
    }
}
