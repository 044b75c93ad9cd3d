use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::Console;
use crate::rotation::LineRotation;

/// A log file that moves on to the next sequence file every `max_lines` lines.
///
/// Each append opens the current file in append mode, writes one line and
/// closes it again, so rotation never has to close anything. The rotation
/// state is locked for the whole open-write-count step, which keeps the
/// line counter exact when one instance is shared between threads.
#[derive(Debug)]
pub struct RotatingFile {
    rotation: Mutex<LineRotation>,
    console: Console,
}

impl RotatingFile {
    /// Create a rotating file. Nothing is opened until the first append.
    pub fn new(rotation: LineRotation, console: Console) -> Self {
        Self {
            rotation: Mutex::new(rotation),
            console,
        }
    }

    fn state(&self) -> MutexGuard<'_, LineRotation> {
        self.rotation.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Append `line` plus a newline to the current file.
    ///
    /// On success returns the name of the new current file if this line
    /// triggered a rotation. On failure the counters are left untouched.
    pub fn try_append(&self, line: &str) -> io::Result<Option<String>> {
        self.append_line(line).map_err(|(_, e)| e)
    }

    /// Append `line`, reporting a failure on the console instead of returning it.
    ///
    /// Nothing is retried; the next call tries the same file again.
    pub fn append(&self, line: &str) {
        if let Err((path, e)) = self.append_line(line) {
            self.console.print_error(&format!(
                "failed to append to log file {}: {}",
                path.display(),
                e
            ));
            tracing::warn!(file = %path.display(), error = %e, "failed to append log line");
        }
    }

    /// The error side carries the path that was attempted, read under the lock.
    fn append_line(&self, line: &str) -> Result<Option<String>, (PathBuf, io::Error)> {
        let mut state = self.state();

        let written = OpenOptions::new()
            .create(true)
            .append(true)
            .open(state.current_file())
            .and_then(|mut file| file.write_all(format!("{}\n", line).as_bytes()));
        if let Err(e) = written {
            return Err((state.current_file().to_path_buf(), e));
        }

        if !state.record_line() {
            return Ok(None);
        }

        let next = state.current_file_name();
        let sequence = state.sequence();
        drop(state);

        self.console
            .print_line(&format!("rotating log file to: {}", next));
        tracing::debug!(file = %next, sequence, "rotated log file");
        Ok(Some(next))
    }

    pub fn sequence(&self) -> u64 {
        self.state().sequence()
    }

    pub fn line_count(&self) -> u64 {
        self.state().line_count()
    }

    pub fn max_lines(&self) -> u64 {
        self.state().max_lines()
    }

    /// Path of the file the next line will be appended to.
    pub fn current_file(&self) -> PathBuf {
        self.state().current_file().to_path_buf()
    }
}

/// `Write` adapter handing each buffer to [`RotatingFile::append`] as one line.
///
/// Used as the worker-side writer of the non-blocking logger: the worker
/// writes one buffer per submitted line, without the trailing newline.
/// Failures are reported by `append`, so writes always succeed.
#[derive(Debug, Clone)]
pub struct LineSink {
    file: Arc<RotatingFile>,
}

impl LineSink {
    pub fn new(file: Arc<RotatingFile>) -> Self {
        Self { file }
    }
}

impl Write for LineSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let line = String::from_utf8_lossy(buf);
        self.file.append(&line);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CaptureBuffer;
    use crate::rotation::FileNaming;
    use std::path::Path;

    fn rotating_file(base: &Path, max_lines: u64) -> (RotatingFile, CaptureBuffer, CaptureBuffer) {
        let out = CaptureBuffer::new();
        let err = CaptureBuffer::new();
        let naming = FileNaming::from_base_path(base).expect("naming");
        let rotation = LineRotation::new(naming, max_lines).expect("rotation");
        let file = RotatingFile::new(
            rotation,
            Console::from_writers(out.clone(), err.clone()),
        );
        (file, out, err)
    }

    #[test]
    fn test_rotating_file_creates_nothing_before_first_append() {
        let dir = tempfile::tempdir().unwrap();
        let (file, _, _) = rotating_file(&dir.path().join("test.log"), 10);

        assert_eq!(file.current_file(), dir.path().join("test-1.log"));
        assert!(!file.current_file().exists());
    }

    #[test]
    fn test_rotating_file_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let (file, _, _) = rotating_file(&dir.path().join("test.log"), 10);

        assert_eq!(file.try_append("first").unwrap(), None);
        assert_eq!(file.try_append("second").unwrap(), None);

        let content = std::fs::read_to_string(dir.path().join("test-1.log")).unwrap();
        assert_eq!(content, "first\nsecond\n");
        assert_eq!(file.line_count(), 2);
        assert_eq!(file.sequence(), 1);
    }

    #[test]
    fn test_rotating_file_rotates_after_threshold_write() {
        let dir = tempfile::tempdir().unwrap();
        let (file, out, _) = rotating_file(&dir.path().join("test.log"), 2);

        assert_eq!(file.try_append("a").unwrap(), None);
        assert_eq!(file.try_append("b").unwrap(), Some("test-2.log".to_string()));

        // Rotation does not pre-create the next file.
        assert!(!dir.path().join("test-2.log").exists());
        assert_eq!(out.lines(), vec!["rotating log file to: test-2.log"]);

        file.append("c");
        let first = std::fs::read_to_string(dir.path().join("test-1.log")).unwrap();
        let second = std::fs::read_to_string(dir.path().join("test-2.log")).unwrap();
        assert_eq!(first, "a\nb\n");
        assert_eq!(second, "c\n");
    }

    #[test]
    fn test_rotating_file_failure_leaves_counters() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let (file, out, err) = rotating_file(&missing.join("test.log"), 1);

        assert!(file.try_append("lost").is_err());
        file.append("lost again");

        assert_eq!(file.sequence(), 1);
        assert_eq!(file.line_count(), 0);
        assert!(out.contents().is_empty());
        assert!(err.contents().contains("failed to append to log file"));
        assert!(!missing.exists(), "directories must not be created");

        std::fs::create_dir(&missing).unwrap();
        file.append("recovered");
        assert_eq!(file.sequence(), 2);
        let content = std::fs::read_to_string(missing.join("test-1.log")).unwrap();
        assert_eq!(content, "recovered\n");
    }

    #[test]
    fn test_append_failure_names_attempted_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        let (file, _, err) = rotating_file(&missing.join("test.log"), 1);

        let (path, e) = file.append_line("lost").unwrap_err();
        assert_eq!(path, missing.join("test-1.log"));
        assert_eq!(e.kind(), io::ErrorKind::NotFound);

        file.append("lost again");
        let expected = format!("failed to append to log file {}:", path.display());
        assert!(err.contents().starts_with(&expected));
    }

    #[test]
    fn test_line_sink_writes_one_line_per_buffer() {
        let dir = tempfile::tempdir().unwrap();
        let (file, _, _) = rotating_file(&dir.path().join("sink.log"), 100);
        let mut sink = LineSink::new(Arc::new(file));

        sink.write_all(b"one").unwrap();
        sink.write_all(b"two").unwrap();
        sink.flush().unwrap();

        let content = std::fs::read_to_string(dir.path().join("sink-1.log")).unwrap();
        assert_eq!(content, "one\ntwo\n");
    }

    #[test]
    fn test_line_sink_reports_success_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let (file, _, err) = rotating_file(&dir.path().join("nope/sink.log"), 100);
        let mut sink = LineSink::new(Arc::new(file));

        assert_eq!(sink.write(b"dropped").unwrap(), 7);
        assert!(!err.contents().is_empty());
    }
}
