//! Clipboard tailer: an alternate input when no game journal is available.
//!
//! Polls the system clipboard and emits its text as a target candidate
//! whenever it changes to something that looks like a star system name.

mod provider;
mod tailer;

pub use provider::{ClipboardError, ClipboardProvider, CommandClipboard};
pub use tailer::{ClipboardTailer, MAX_NAME_LEN, SYSTEM_NAME_PATTERN};
