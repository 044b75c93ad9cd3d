use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, de};

use crate::{Error, Result};

/// Parse a line count with an optional unit (k/m, case-insensitive).
///
/// Plain numbers are taken as is; `k` multiplies by one thousand and `m`
/// by one million. Zero is rejected since a file could never fill up.
pub(crate) fn parse_line_count(s: &str) -> std::result::Result<u64, String> {
    let s = s.trim();
    let Some(last) = s.chars().last() else {
        return Err("empty line count".to_string());
    };

    let (num_str, multiplier) = if last.is_alphabetic() {
        let multiplier = match last.to_ascii_uppercase() {
            'K' => 1_000,
            'M' => 1_000_000,
            other => return Err(format!("invalid unit: {}, supported: K/M", other)),
        };
        (&s[..s.len() - last.len_utf8()], multiplier)
    } else {
        (s, 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| format!("invalid number: {}", num_str))?;

    let lines = num
        .checked_mul(multiplier)
        .ok_or_else(|| "line count too large".to_string())?;
    if lines == 0 {
        return Err("max_lines must be a positive integer".to_string());
    }
    Ok(lines)
}

/// Line count value that can be a number or a string with units.
#[derive(Deserialize)]
#[serde(untagged)]
enum LineCountValue {
    Number(u64),
    String(String),
}

/// Deserialize `max_lines` from `10000`, `"10k"` or `"1M"`.
pub(crate) fn deserialize_max_lines<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match LineCountValue::deserialize(deserializer)? {
        LineCountValue::Number(0) => Err(de::Error::custom(
            "max_lines must be a positive integer",
        )),
        LineCountValue::Number(n) => Ok(n),
        LineCountValue::String(s) => parse_line_count(&s).map_err(de::Error::custom),
    }
}

/// Naming scheme for sequence-numbered log files.
///
/// A base path `logs/app.log` yields `logs/app-1.log`, `logs/app-2.log`, ...
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNaming {
    dir: PathBuf,
    stem: String,
    ext: String,
}

impl FileNaming {
    /// Split a resolved base path into directory, stem and extension.
    pub fn from_base_path(base_path: &Path) -> Result<Self> {
        let stem = base_path
            .file_stem()
            .ok_or_else(|| {
                Error::Config(format!(
                    "log file path has no file name: {}",
                    base_path.display()
                ))
            })?
            .to_string_lossy()
            .into_owned();
        let ext = base_path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let dir = base_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Ok(Self { dir, stem, ext })
    }

    /// File name for the given sequence number, without the directory.
    pub fn file_name(&self, sequence: u64) -> String {
        format!("{}-{}{}", self.stem, sequence, self.ext)
    }

    /// Full path for the given sequence number.
    pub fn path(&self, sequence: u64) -> PathBuf {
        self.dir.join(self.file_name(sequence))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn stem(&self) -> &str {
        &self.stem
    }

    pub fn ext(&self) -> &str {
        &self.ext
    }
}

/// Line-count rotation state of one logger.
///
/// Starts in sequence 1 and advances by exactly one each time `max_lines`
/// lines have been recorded against the current file.
#[derive(Debug, Clone)]
pub struct LineRotation {
    naming: FileNaming,
    max_lines: u64,
    sequence: u64,
    line_count: u64,
    current_file: PathBuf,
}

impl LineRotation {
    /// Create the rotation state. `max_lines` must be positive.
    pub fn new(naming: FileNaming, max_lines: u64) -> Result<Self> {
        if max_lines == 0 {
            return Err(Error::Config(
                "max_lines must be a positive integer".to_string(),
            ));
        }
        let current_file = naming.path(1);
        Ok(Self {
            naming,
            max_lines,
            sequence: 1,
            line_count: 0,
            current_file,
        })
    }

    /// Record one successfully appended line.
    ///
    /// Returns `true` when the line filled the current file and the state
    /// moved on to the next sequence.
    pub fn record_line(&mut self) -> bool {
        self.line_count += 1;
        if self.line_count >= self.max_lines {
            self.rotate();
            true
        } else {
            false
        }
    }

    fn rotate(&mut self) {
        self.line_count = 0;
        self.sequence += 1;
        self.current_file = self.naming.path(self.sequence);
    }

    pub fn naming(&self) -> &FileNaming {
        &self.naming
    }

    pub fn max_lines(&self) -> u64 {
        self.max_lines
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn line_count(&self) -> u64 {
        self.line_count
    }

    /// Path of the only file currently written to.
    pub fn current_file(&self) -> &Path {
        &self.current_file
    }

    /// File name of the current file, without the directory.
    pub fn current_file_name(&self) -> String {
        self.naming.file_name(self.sequence)
    }
}
