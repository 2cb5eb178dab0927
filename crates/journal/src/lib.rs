//! Journal tailer: follow the game's event log and extract system events.
//!
//! The game writes one JSON object per line to `Journal.<timestamp>.log`
//! files and starts a new file every session. The tailer polls the
//! journal directory, follows the newest file from its end, and turns
//! appended `FSDTarget` and `Music` records into [`SystemEvent`]s.

mod cursor;
mod error;
mod paths;
mod record;
mod tailer;

pub use ceti_model::SystemEvent;
pub use cursor::LogPosition;
pub use error::JournalError;
pub use paths::{find_latest_journal, is_journal_file, journal_dir};
pub use record::{MapViewTracker, parse_line};
pub use tailer::{DEFAULT_POLL_INTERVAL, JournalTailer};

/// Journal directory relative to the user's home directory.
pub const JOURNAL_DIR_NAME: &str = "Saved Games/Frontier Developments/Elite Dangerous";

/// Journal file name prefix.
pub const JOURNAL_PREFIX: &str = "Journal.";

/// Journal file name suffix.
pub const JOURNAL_SUFFIX: &str = ".log";
