//! System clipboard access.
//!
//! Reads go through the platform's command-line clipboard tool, so no
//! windowing system bindings are linked in.

use std::process::{Command, Stdio};

/// Errors from clipboard reads.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("failed to spawn {tool}: {source}")]
    Spawn {
        tool: &'static str,
        source: std::io::Error,
    },

    #[error("{tool} exited with status {status}")]
    Exit {
        tool: &'static str,
        status: std::process::ExitStatus,
    },

    #[error("invalid name pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Reads the system clipboard as text.
pub trait ClipboardProvider: Send {
    fn read(&mut self) -> Result<String, ClipboardError>;
}

/// Clipboard provider backed by the platform clipboard command.
///
/// - Linux: `xclip -selection clipboard -o`
/// - macOS: `pbpaste`
/// - Windows: `powershell -NoProfile -Command Get-Clipboard`
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandClipboard;

impl CommandClipboard {
    fn command() -> (&'static str, &'static [&'static str]) {
        #[cfg(target_os = "windows")]
        {
            ("powershell", &["-NoProfile", "-Command", "Get-Clipboard"])
        }

        #[cfg(target_os = "macos")]
        {
            ("pbpaste", &[])
        }

        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            ("xclip", &["-selection", "clipboard", "-o"])
        }
    }
}

impl ClipboardProvider for CommandClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        let (tool, args) = Self::command();
        let output = Command::new(tool)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|source| ClipboardError::Spawn { tool, source })?;

        if !output.status.success() {
            return Err(ClipboardError::Exit {
                tool,
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
