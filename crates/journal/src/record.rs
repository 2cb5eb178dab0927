//! Journal record parsing and map-view tracking.

use ceti_model::SystemEvent;
use serde::Deserialize;

const TARGET_EVENT: &str = "FSDTarget";
const MUSIC_EVENT: &str = "Music";
const GALAXY_MAP_TRACK: &str = "GalaxyMap";

/// The fields of a journal record the tailer cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct JournalRecord {
    #[serde(default)]
    pub event: String,
    #[serde(rename = "Name", default)]
    pub name: Option<String>,
    #[serde(rename = "SystemAddress", default)]
    pub system_address: Option<u64>,
    #[serde(rename = "MusicTrack", default)]
    pub music_track: Option<String>,
}

/// Parses one journal line.
pub fn parse_line(line: &str) -> Result<JournalRecord, serde_json::Error> {
    serde_json::from_str(line)
}

/// Tracks whether the galaxy map is open, from `Music` records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MapViewTracker {
    in_map: bool,
}

impl MapViewTracker {
    pub fn is_open(&self) -> bool {
        self.in_map
    }

    /// Feeds the current music track; returns an event on a transition.
    pub fn observe_track(&mut self, track: &str) -> Option<SystemEvent> {
        let in_map = track == GALAXY_MAP_TRACK;
        if in_map == self.in_map {
            return None;
        }
        self.in_map = in_map;
        Some(if in_map {
            SystemEvent::MapOpened
        } else {
            SystemEvent::MapClosed
        })
    }

    /// Maps a record to an event, updating the map-view flag.
    pub fn event_for(&mut self, record: &JournalRecord) -> Option<SystemEvent> {
        match record.event.as_str() {
            TARGET_EVENT => {
                let name = record.name.as_deref()?.trim();
                if name.is_empty() {
                    return None;
                }
                Some(SystemEvent::targeted(name, record.system_address))
            }
            MUSIC_EVENT => self.observe_track(record.music_track.as_deref().unwrap_or_default()),
            _ => None,
        }
    }
}
