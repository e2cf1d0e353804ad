//! Append-only line file with size-based rotation.
//!
//! When the next line would push the file past `max_bytes`, the file is
//! shifted into numbered backups (`zinema-otlp.json.1`, `.2`, ...) and a fresh
//! file is started. At most `backups` old files are kept.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default size threshold for trace files (10 MiB).
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

/// Default number of rotated files kept next to the live one.
pub const DEFAULT_BACKUPS: usize = 3;

#[derive(Debug)]
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    backups: usize,
    file: Option<File>,
    written: u64,
}

impl RotatingFile {
    /// The file is opened lazily on the first append.
    #[must_use]
    pub const fn new(path: PathBuf, max_bytes: u64, backups: usize) -> Self {
        Self {
            path,
            max_bytes,
            backups,
            file: None,
            written: 0,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the `n`th backup, `1` being the most recent.
    #[must_use]
    pub fn backup_path(&self, n: usize) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(format!(".{n}"));
        PathBuf::from(name)
    }

    /// Appends `line` and a newline, rotating first if needed.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from opening, renaming or writing.
    pub fn append_line(&mut self, line: &str) -> io::Result<()> {
        let incoming = line.len() as u64 + 1;

        if self.file.is_none() {
            self.file = Some(self.open()?);
        }
        if self.written > 0 && self.written + incoming > self.max_bytes {
            self.rotate()?;
            self.file = Some(self.open()?);
        }

        let Some(file) = self.file.as_mut() else {
            return Err(io::Error::other("trace file is not open"));
        };
        writeln!(file, "{line}")?;
        file.flush()?;
        self.written += incoming;
        Ok(())
    }

    fn open(&mut self) -> io::Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = file.metadata()?.len();
        Ok(file)
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file = None;
        self.written = 0;

        if self.backups == 0 {
            return match fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        for n in (1..self.backups).rev() {
            let from = self.backup_path(n);
            if from.exists() {
                fs::rename(from, self.backup_path(n + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(path: &Path) -> Vec<String> {
        fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect()
    }

    #[test]
    fn rotates_into_numbered_backups() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::new(dir.path().join("trace.json"), 100, 2);

        for i in 1..=7 {
            file.append_line(&format!("{i:0>40}")).unwrap();
        }

        let tail = |i: u32| format!("{i:0>40}");
        assert_eq!(lines(file.path()), vec![tail(7)]);
        assert_eq!(lines(&file.backup_path(1)), vec![tail(5), tail(6)]);
        assert_eq!(lines(&file.backup_path(2)), vec![tail(3), tail(4)]);
        assert!(!file.backup_path(3).exists());
    }

    #[test]
    fn resumes_size_accounting_for_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trace.json");
        fs::write(&path, "x".repeat(90) + "\n").unwrap();

        let mut file = RotatingFile::new(path, 100, 1);
        file.append_line("0123456789").unwrap();

        assert_eq!(lines(file.path()), vec!["0123456789"]);
        assert_eq!(lines(&file.backup_path(1)), vec!["x".repeat(90)]);
    }

    #[test]
    fn zero_backups_truncates_instead() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = RotatingFile::new(dir.path().join("trace.json"), 10, 0);
        file.append_line("first line").unwrap();
        file.append_line("second").unwrap();

        assert_eq!(lines(file.path()), vec!["second"]);
        assert!(!file.backup_path(1).exists());
    }
}
