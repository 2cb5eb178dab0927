//! Polling clipboard tailer.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use ceti_model::SystemEvent;
use regex::Regex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::provider::{ClipboardError, ClipboardProvider};

/// Longest clipboard text accepted as a system name, in characters.
pub const MAX_NAME_LEN: usize = 64;

/// Characters allowed in a system name candidate.
pub const SYSTEM_NAME_PATTERN: &str = r"^[\w \-'*.:()]{1,64}$";

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Emits clipboard text that changed and looks like a system name.
///
/// Reads run on the blocking pool, so a hung clipboard tool never holds
/// back cancellation.
pub struct ClipboardTailer<P> {
    provider: Arc<Mutex<P>>,
    pattern: Regex,
    poll_interval: Duration,
    last_seen: Option<String>,
}

impl<P: ClipboardProvider + 'static> ClipboardTailer<P> {
    pub fn new(provider: P) -> Result<Self, ClipboardError> {
        Ok(Self {
            provider: Arc::new(Mutex::new(provider)),
            pattern: Regex::new(SYSTEM_NAME_PATTERN)?,
            poll_interval: DEFAULT_POLL_INTERVAL,
            last_seen: None,
        })
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Returns true if `text` is a plausible system name.
    pub fn is_valid_system_name(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// Reads the clipboard once; returns a new valid candidate, if any.
    ///
    /// Only a change from the last observed text counts. Surrounding
    /// whitespace is trimmed before validation.
    pub fn poll_once(&mut self) -> Option<String> {
        let read = read_provider(&self.provider);
        self.observe(read)
    }

    /// Applies one clipboard read to the change and validity checks.
    fn observe(&mut self, read: Result<String, ClipboardError>) -> Option<String> {
        let text = match read {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(error = %e, "clipboard read failed");
                return None;
            }
        };

        if self.last_seen.as_deref() == Some(text.as_str()) {
            return None;
        }

        let candidate = text.trim().to_string();
        self.last_seen = Some(text);

        if self.is_valid_system_name(&candidate) {
            tracing::debug!(candidate = %candidate, "clipboard candidate");
            Some(candidate)
        } else {
            tracing::trace!("clipboard text is not a system name");
            None
        }
    }

    /// Polls until `cancel` fires or the receiver goes away.
    pub async fn run(mut self, tx: mpsc::Sender<SystemEvent>, cancel: CancellationToken) {
        let mut poll_interval = tokio::time::interval(self.poll_interval);
        poll_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!("clipboard tailer started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = poll_interval.tick() => {
                    let read = tokio::task::spawn_blocking({
                        let provider = Arc::clone(&self.provider);
                        move || read_provider(&provider)
                    });
                    let read = tokio::select! {
                        _ = cancel.cancelled() => break,
                        joined = read => match joined {
                            Ok(read) => read,
                            Err(e) => {
                                tracing::warn!(error = %e, "clipboard read task failed");
                                continue;
                            }
                        },
                    };
                    let Some(name) = self.observe(read) else {
                        continue;
                    };
                    tokio::select! {
                        _ = cancel.cancelled() => break,
                        sent = tx.send(SystemEvent::targeted(name, None)) => {
                            if sent.is_err() {
                                tracing::debug!("event receiver closed");
                                break;
                            }
                        }
                    }
                }
            }
        }

        tracing::info!("clipboard tailer stopped");
    }
}

fn read_provider<P: ClipboardProvider>(provider: &Mutex<P>) -> Result<String, ClipboardError> {
    provider
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .read()
}
