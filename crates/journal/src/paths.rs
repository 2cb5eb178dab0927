//! Journal directory discovery.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::{JOURNAL_DIR_NAME, JOURNAL_PREFIX, JOURNAL_SUFFIX, JournalError};

/// Returns the platform-conventional journal directory.
pub fn journal_dir() -> Result<PathBuf, JournalError> {
    let home = home_dir().ok_or(JournalError::NoHomeDir)?;
    Ok(home.join(JOURNAL_DIR_NAME))
}

/// Returns true if `name` looks like a journal file name.
pub fn is_journal_file(name: &str) -> bool {
    name.starts_with(JOURNAL_PREFIX) && name.ends_with(JOURNAL_SUFFIX)
}

/// Finds the most recently modified journal file in `dir`.
///
/// Files with equal modification times are ordered by name, newest
/// name first. Returns `None` if the directory is missing or holds no
/// journal.
pub fn find_latest_journal(dir: &Path) -> Option<PathBuf> {
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(is_journal_file)
        })
        .filter_map(|entry| {
            let meta = entry.metadata().ok()?;
            if !meta.is_file() {
                return None;
            }
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, entry.path()))
        })
        .max_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
        .map(|(_, path)| path)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }

    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
