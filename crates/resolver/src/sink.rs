//! Display sink interface consumed by the orchestrator.

use ceti_model::CombinedResolution;

/// Receives resolution progress and results.
///
/// The sink owns everything about rendering. Calls arrive from the task
/// that drives the orchestrator, one at a time.
pub trait DisplaySink: Send + Sync {
    /// Shows or clears the pending state.
    fn set_loading(&self, loading: bool);

    /// Replaces the displayed result.
    fn deliver(&self, resolution: CombinedResolution);

    /// Galaxy map opened (`true`) or closed (`false`).
    fn map_view_changed(&self, _open: bool) {}
}
