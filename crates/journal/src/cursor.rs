//! Read cursor into the tracked journal file.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::JournalError;

/// Position of the tailer in one journal file.
///
/// Replaced wholesale when the tracked file changes; `epoch` counts
/// those replacements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPosition {
    pub path: PathBuf,
    /// Bytes consumed so far. Always sits just past a newline (or at the
    /// start-of-tracking offset).
    pub offset: u64,
    pub epoch: u64,
}

impl LogPosition {
    /// Starts tracking `path` at its current end of file.
    pub fn at_end(path: &Path, epoch: u64) -> Result<Self, JournalError> {
        let offset = std::fs::metadata(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            offset,
            epoch,
        })
    }

    /// Reads every complete line appended since the last call.
    ///
    /// A trailing unterminated line is left on disk and the offset stops
    /// before it. The offset only moves after a successful read, and the
    /// file is closed before returning.
    pub fn read_appended(&mut self) -> Result<Vec<String>, JournalError> {
        let mut file = File::open(&self.path)?;
        let len = file.metadata()?.len();

        if len < self.offset {
            tracing::info!(
                file = %self.path.display(),
                offset = self.offset,
                len,
                "journal truncated, rereading from start"
            );
            self.offset = 0;
        }
        if len == self.offset {
            return Ok(Vec::new());
        }

        file.seek(SeekFrom::Start(self.offset))?;
        let mut buf = Vec::with_capacity(usize::try_from(len - self.offset).unwrap_or(0));
        file.read_to_end(&mut buf)?;

        let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
            return Ok(Vec::new());
        };
        let complete = &buf[..=last_newline];
        self.offset += complete.len() as u64;

        Ok(split_lines(complete))
    }
}

/// Splits newline-terminated bytes into lines, dropping blank ones.
fn split_lines(bytes: &[u8]) -> Vec<String> {
    bytes
        .split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(|line| String::from_utf8_lossy(line).into_owned())
        .collect()
}
