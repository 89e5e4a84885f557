//! Append-only line sink with size-based rotation.
//!
//! Before each write the sink checks the size of the live file; once it has
//! grown past the limit the file is renamed to `<name>.1`, replacing any older
//! backup, and a fresh file is started. At most two files ever exist.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Size above which the live file is rotated (5 MiB).
pub const MAX_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Thread-safe rotating line writer.
///
/// The file is opened lazily on the first write, so construction never fails.
pub struct RotatingSink {
    path: PathBuf,
    max_bytes: u64,
    file: Mutex<Option<File>>,
}

impl RotatingSink {
    /// Creates a sink writing to `path` with the default 5 MiB limit.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self::with_limit(path, MAX_FILE_SIZE_BYTES)
    }

    /// Creates a sink that rotates once the live file exceeds `max_bytes`.
    #[must_use]
    pub const fn with_limit(path: PathBuf, max_bytes: u64) -> Self {
        Self {
            path,
            max_bytes,
            file: Mutex::new(None),
        }
    }

    /// Path of the live file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the single backup, `<name>.1` next to the live file.
    #[must_use]
    pub fn backup_path(&self) -> PathBuf {
        let mut name: OsString = self.path.as_os_str().to_owned();
        name.push(".1");
        PathBuf::from(name)
    }

    /// Appends `line` plus a newline, rotating first if the file is too large.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if rotating, opening or writing fails,
    /// or an `Other` error if a previous writer panicked while holding the lock.
    pub fn write_line(&self, line: &str) -> io::Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("sink lock poisoned: {e}")))?;

        if fs::metadata(&self.path).is_ok_and(|m| m.len() > self.max_bytes) {
            *file = None;
            fs::rename(&self.path, self.backup_path())?;
        }

        if file.is_none() {
            *file = Some(
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?,
            );
        }
        let Some(handle) = file.as_mut() else {
            return Err(io::Error::new(io::ErrorKind::Other, "sink file unavailable"));
        };

        writeln!(handle, "{line}")?;
        handle.flush()
    }
}

impl std::fmt::Debug for RotatingSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingSink")
            .field("path", &self.path)
            .field("max_bytes", &self.max_bytes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotates_to_a_single_backup() {
        let dir = tempfile::tempdir().unwrap();
        let sink = RotatingSink::with_limit(dir.path().join("spans.jsonl"), 8);

        sink.write_line("first-line").unwrap();
        assert!(!sink.backup_path().exists());

        sink.write_line("second").unwrap();
        assert_eq!(fs::read_to_string(sink.backup_path()).unwrap(), "first-line\n");
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "second\n");

        sink.write_line("third").unwrap();
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "second\nthird\n");

        sink.write_line("fourth").unwrap();
        assert_eq!(
            fs::read_to_string(sink.backup_path()).unwrap(),
            "second\nthird\n"
        );
        assert_eq!(fs::read_to_string(sink.path()).unwrap(), "fourth\n");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn backup_name_appends_suffix() {
        let sink = RotatingSink::new(PathBuf::from("/data/marquee-spans.jsonl"));
        assert_eq!(
            sink.backup_path(),
            PathBuf::from("/data/marquee-spans.jsonl.1")
        );
    }
}
