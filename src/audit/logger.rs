//! Append-only audit log
//!
//! One JSON object per line. Blank lines are ignored on read so a log that
//! was hand-edited or truncated mid-line still loads up to the damage.

use std::collections::VecDeque;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use crate::error::{SwapperError, SwapperResult};

use super::entry::AuditEntry;

/// Writes and reads `audit.log`
#[derive(Debug, Clone)]
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    /// Append one entry; each call opens, writes, and flushes the file
    pub fn log(&self, entry: &AuditEntry) -> SwapperResult<()> {
        let line = serde_json::to_string(entry)?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| self.io_error("open", e))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| self.io_error("append to", e))
    }

    /// Every entry, oldest first
    pub fn read_all(&self) -> SwapperResult<Vec<AuditEntry>> {
        let mut entries = Vec::new();
        self.for_each_line(|entry| entries.push(entry))?;
        Ok(entries)
    }

    /// The last `count` entries, oldest first
    pub fn read_recent(&self, count: usize) -> SwapperResult<Vec<AuditEntry>> {
        let mut window = VecDeque::with_capacity(count);
        self.for_each_line(|entry| {
            if window.len() == count {
                window.pop_front();
            }
            if count > 0 {
                window.push_back(entry);
            }
        })?;
        Ok(window.into())
    }

    /// Number of non-blank lines, without parsing them
    pub fn entry_count(&self) -> SwapperResult<usize> {
        let Some(reader) = self.reader()? else {
            return Ok(0);
        };
        let mut count = 0;
        for line in reader.lines() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if !line.trim().is_empty() {
                count += 1;
            }
        }
        Ok(count)
    }

    fn reader(&self) -> SwapperResult<Option<BufReader<File>>> {
        match File::open(&self.log_path) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error("open", e)),
        }
    }

    fn for_each_line(&self, mut visit: impl FnMut(AuditEntry)) -> SwapperResult<()> {
        let Some(reader) = self.reader()? else {
            return Ok(());
        };

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| self.io_error("read", e))?;
            if line.trim().is_empty() {
                continue;
            }
            let entry = serde_json::from_str(&line).map_err(|e| {
                SwapperError::Json(format!(
                    "{} line {}: {}",
                    self.log_path.display(),
                    index + 1,
                    e
                ))
            })?;
            visit(entry);
        }
        Ok(())
    }

    fn io_error(&self, action: &str, err: io::Error) -> SwapperError {
        SwapperError::Io(format!(
            "Failed to {} audit log {}: {}",
            action,
            self.log_path.display(),
            err
        ))
    }
}
