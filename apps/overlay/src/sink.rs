//! Console display sink.
//!
//! Renders resolution results as log lines and tracks the overlay state
//! a windowed front end would draw: loading flag, current result and
//! visibility.

use std::sync::Mutex;

use ceti_model::CombinedResolution;
use ceti_resolver::DisplaySink;

/// What the overlay currently shows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverlayState {
    pub loading: bool,
    pub visible: bool,
    pub current: Option<CombinedResolution>,
}

pub struct ConsoleSink {
    visibility_tied_to_map: bool,
    state: Mutex<OverlayState>,
}

impl ConsoleSink {
    pub fn new(visibility_tied_to_map: bool) -> Self {
        Self {
            visibility_tied_to_map,
            state: Mutex::new(OverlayState {
                visible: !visibility_tied_to_map,
                ..OverlayState::default()
            }),
        }
    }

    pub fn snapshot(&self) -> OverlayState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, OverlayState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplaySink for ConsoleSink {
    fn set_loading(&self, loading: bool) {
        self.lock().loading = loading;
        if loading {
            tracing::info!("looking up system...");
        }
    }

    fn deliver(&self, resolution: CombinedResolution) {
        let timing = resolution
            .timing
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        tracing::info!(
            system = %resolution.system_name,
            status = resolution.status_label(),
            timing = %timing,
            "system status"
        );
        for (source, url) in resolution.links() {
            tracing::info!(source, url, "link");
        }

        self.lock().current = Some(resolution);
    }

    fn map_view_changed(&self, open: bool) {
        if !self.visibility_tied_to_map {
            return;
        }
        self.lock().visible = open;
        tracing::debug!(visible = open, "overlay visibility follows galaxy map");
    }
}
