//! Rotating file writer with size-based rotation and backup retention.
//!
//! This module provides a thread-safe log file writer that rotates the file
//! once it exceeds a size threshold, keeping a fixed number of backups. The
//! UI owns the terminal, so log output must never reach stdout or stderr.

use chrono::Utc;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// `&FileWriter` implements [`io::Write`], so an `Arc<FileWriter>` can be
/// handed to `tracing_subscriber::fmt` as its writer.
///
/// # Rotation Strategy
///
/// 1. Check file size before a write that starts a new line
/// 2. If size > limit, rotate:
///    - Rename current file to `<file name>.<timestamp>`
///    - Open a new empty file
///    - Remove oldest backups beyond the retention count
///
/// A line written in several pieces, as `writeln!` does, is never split
/// across two files.
///
/// # Example
///
/// ```rust
/// use pass_tui::observability::FileWriter;
/// use std::io::Write;
///
/// let dir = tempfile::tempdir()?;
/// let writer = FileWriter::new(dir.path().join("pass-tui.log"));
/// (&writer).write_all(b"started\n")?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_bytes: u64,
    max_backups: usize,
    state: Mutex<WriterState>,
}

#[derive(Debug)]
struct WriterState {
    /// Opened on first write.
    file: Option<File>,
    /// Whether the last write ended a line.
    at_line_start: bool,
}

impl FileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write, so construction
    /// succeeds even if the directory does not exist yet.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_bytes: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_bytes,
            max_backups,
            state: Mutex::new(WriterState {
                file: None,
                at_line_start: true,
            }),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn write_locked(&self, buf: &[u8]) -> io::Result<usize> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if state.at_line_start {
            self.check_and_rotate(&mut state.file)?;
        }

        let file = &mut state.file;
        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.file_path)?,
            );
        }

        let handle = file
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No file available"))?;

        handle.write_all(buf)?;
        if let Some(&last) = buf.last() {
            state.at_line_start = last == b'\n';
        }
        Ok(buf.len())
    }

    fn check_and_rotate(&self, file: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_bytes {
                *file = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    /// Renames the current file to a timestamped backup and prunes old ones.
    fn rotate_files(&self) -> io::Result<()> {
        let stamp = Utc::now().format("%Y%m%d%H%M%S%6f");
        let mut backup = self.file_path.clone().into_os_string();
        backup.push(format!(".{stamp}"));

        if self.file_path.exists() {
            fs::rename(&self.file_path, PathBuf::from(backup))?;
        }

        self.cleanup_old_backups()
    }

    /// Keeps the newest `max_backups` files named `<file name>.*`.
    ///
    /// Individual deletion errors are ignored.
    fn cleanup_old_backups(&self) -> io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No parent directory"))?;

        let prefix = self
            .file_path
            .file_name()
            .and_then(|s| s.to_str())
            .map(|name| format!("{name}."))
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(&prefix))
            })
            .collect();

        // Timestamps sort lexically, newest first.
        backups.sort_by(|a, b| b.cmp(a));

        for old_backup in backups.iter().skip(self.max_backups) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_locked(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.file.as_mut().map_or(Ok(()), Write::flush)
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_bytes", &self.max_bytes)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backups(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().starts_with("app.log."))
            .count()
    }

    #[test]
    fn appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path().join("app.log"));
        writeln!(&writer, "one").unwrap();
        writeln!(&writer, "two").unwrap();
        (&writer).flush().unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn rotates_and_prunes_backups() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::with_limits(dir.path().join("app.log"), 8, 2);

        for i in 0..6 {
            writeln!(&writer, "line number {i}").unwrap();
            std::thread::sleep(std::time::Duration::from_millis(2));
        }

        assert!(backups(dir.path()) <= 2);
        assert!(backups(dir.path()) >= 1);
        let current = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(current, "line number 5\n");
    }

    #[test]
    fn line_written_in_pieces_stays_in_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::with_limits(dir.path().join("app.log"), 4, 3);

        (&writer).write_all(b"first\n").unwrap();
        (&writer).write_all(b"sec").unwrap();
        (&writer).write_all(b"ond").unwrap();
        (&writer).write_all(b"\n").unwrap();

        assert_eq!(backups(dir.path()), 1);
        let current = fs::read_to_string(writer.path()).unwrap();
        assert_eq!(current, "second\n");
    }
}
