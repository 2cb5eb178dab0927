//! Polling journal tailer.
//!
//! Each cycle re-scans the journal directory, switches to a newer
//! journal when one appears (starting at its end, never replaying), reads
//! appended complete lines and maps them to events. I/O errors end the
//! cycle quietly; the next tick tries again.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ceti_model::SystemEvent;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::cursor::LogPosition;
use crate::paths::find_latest_journal;
use crate::record::{MapViewTracker, parse_line};

/// Default interval between journal polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);

/// Follows the newest journal in a directory.
pub struct JournalTailer {
    dir: PathBuf,
    poll_interval: Duration,
    position: Option<LogPosition>,
    rotations: u64,
    map_view: MapViewTracker,
}

impl JournalTailer {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            poll_interval: DEFAULT_POLL_INTERVAL,
            position: None,
            rotations: 0,
            map_view: MapViewTracker::default(),
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Current read cursor, if a journal is tracked.
    pub fn position(&self) -> Option<&LogPosition> {
        self.position.as_ref()
    }

    /// Whether the last `Music` record put the player in the galaxy map.
    pub fn in_map_view(&self) -> bool {
        self.map_view.is_open()
    }

    /// Runs one poll cycle and returns the events it produced, in file order.
    pub fn poll_once(&mut self) -> Vec<SystemEvent> {
        let latest = find_latest_journal(&self.dir);
        let tracked = self.position.as_ref().map(|p| p.path.as_path());
        if latest.as_deref() != tracked {
            self.rotate(latest.as_deref());
        }

        let Some(position) = self.position.as_mut() else {
            return Vec::new();
        };

        let lines = match position.read_appended() {
            Ok(lines) => lines,
            Err(e) => {
                tracing::warn!(
                    file = %position.path.display(),
                    error = %e,
                    "error reading journal"
                );
                return Vec::new();
            }
        };

        let mut events = Vec::new();
        for line in &lines {
            match parse_line(line) {
                Ok(record) => events.extend(self.map_view.event_for(&record)),
                Err(e) => {
                    tracing::warn!(error = %e, "skipping malformed journal line");
                }
            }
        }
        events
    }

    /// Replaces the cursor for a newly selected journal (or none).
    fn rotate(&mut self, latest: Option<&Path>) {
        self.position = None;

        let Some(path) = latest else {
            tracing::info!(dir = %self.dir.display(), "no journal file found");
            return;
        };

        let epoch = self.rotations + 1;
        match LogPosition::at_end(path, epoch) {
            Ok(position) => {
                tracing::info!(
                    file = %path.display(),
                    offset = position.offset,
                    epoch,
                    "switched to journal"
                );
                self.rotations = epoch;
                self.position = Some(position);
            }
            Err(e) => {
                tracing::warn!(file = %path.display(), error = %e, "cannot open journal");
            }
        }
    }

    /// Polls until `cancel` fires or the receiver goes away.
    ///
    /// Events are sent in order; a full channel holds the tailer back
    /// rather than dropping events.
    pub async fn run(mut self, tx: mpsc::Sender<SystemEvent>, cancel: CancellationToken) {
        let mut poll_interval = tokio::time::interval(self.poll_interval);
        poll_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        tracing::info!(dir = %self.dir.display(), "journal tailer started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = poll_interval.tick() => {
                    let events = self.poll_once();
                    if !forward(events, &tx, &cancel).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("journal tailer stopped");
    }
}

/// Sends events in order. Returns false once the tailer should stop.
async fn forward(
    events: Vec<SystemEvent>,
    tx: &mpsc::Sender<SystemEvent>,
    cancel: &CancellationToken,
) -> bool {
    for event in events {
        tokio::select! {
            _ = cancel.cancelled() => return false,
            sent = tx.send(event) => {
                if sent.is_err() {
                    tracing::debug!("event receiver closed");
                    return false;
                }
            }
        }
    }
    true
}
