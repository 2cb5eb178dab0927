//! Resolution orchestrator: dedup gate, fan-out, merge, delivery.

use std::sync::Arc;
use std::time::Instant;

use ceti_lookup::LookupClient;
use ceti_model::{CombinedResolution, LookupResult};
use futures_util::future::join_all;
use tracing::{debug, info};

use crate::merge::combine;
use crate::sink::DisplaySink;

/// Resolves candidate systems against a fixed set of lookup clients.
///
/// Owns the dedup state: the last resolved system name. Only the task
/// driving `resolve` mutates it.
pub struct Orchestrator {
    clients: Vec<Box<dyn LookupClient>>,
    sink: Arc<dyn DisplaySink>,
    last_resolved: Option<String>,
}

impl Orchestrator {
    /// Creates an orchestrator. The first client is the primary source.
    pub fn new(clients: Vec<Box<dyn LookupClient>>, sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            clients,
            sink,
            last_resolved: None,
        }
    }

    /// Returns the last system that went through a full resolution.
    pub fn last_resolved(&self) -> Option<&str> {
        self.last_resolved.as_deref()
    }

    /// Resolves a candidate system.
    ///
    /// Returns `None` without touching the network or the sink when the
    /// trimmed name is empty or equals the previous one. Otherwise every
    /// client is queried once, the sink gets the result exactly once, and
    /// the same result is returned.
    pub async fn resolve(&mut self, name: &str, address: Option<u64>) -> Option<CombinedResolution> {
        let name = name.trim();
        if name.is_empty() {
            debug!("ignoring empty system name");
            return None;
        }
        if self.last_resolved.as_deref() == Some(name) {
            debug!(system = name, "system unchanged, skipping lookups");
            return None;
        }
        self.last_resolved = Some(name.to_string());

        info!(system = name, address, "new system");
        self.sink.set_loading(true);

        let results = join_all(
            self.clients
                .iter()
                .map(|client| timed_query(client.as_ref(), name, address)),
        )
        .await;

        for result in &results {
            debug!(
                source = %result.source,
                status = result.status,
                elapsed_ms = result.elapsed_ms,
                verdict = ?result.verdict,
                "lookup finished"
            );
        }

        let resolution = combine(name, address, results);
        info!(
            system = name,
            visited = resolution.overall_visited,
            timing = %resolution.timing.as_ref().map(ToString::to_string).unwrap_or_default(),
            "system resolved"
        );

        self.sink.set_loading(false);
        self.sink.deliver(resolution.clone());
        Some(resolution)
    }
}

/// Runs one query and stamps its wall-clock duration.
async fn timed_query(client: &dyn LookupClient, name: &str, address: Option<u64>) -> LookupResult {
    let started = Instant::now();
    let result = client.query(name, address).await;
    result.with_elapsed(started.elapsed())
}
