use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status recorded when no HTTP response was received at all.
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// One source's visited determination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Verdict {
    Visited,
    NotVisited,
    Unknown,
}

impl Verdict {
    /// Returns the definite answer, or `None` for [`Verdict::Unknown`].
    pub fn as_bool(self) -> Option<bool> {
        match self {
            Verdict::Visited => Some(true),
            Verdict::NotVisited => Some(false),
            Verdict::Unknown => None,
        }
    }

    /// Collapses `Unknown` into `false`.
    pub fn is_visited(self) -> bool {
        self == Verdict::Visited
    }
}

impl From<bool> for Verdict {
    fn from(visited: bool) -> Self {
        if visited {
            Verdict::Visited
        } else {
            Verdict::NotVisited
        }
    }
}

/// Result of querying one lookup source for one system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    /// Short source name, e.g. `"edsm"`.
    pub source: String,
    pub verdict: Verdict,
    /// Numeric record id reported by the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<u64>,
    /// Browsable link for this system on the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// HTTP status, [`TRANSPORT_FAILURE_STATUS`] on transport failure,
    /// `None` when no request applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Wall-clock time spent on the query.
    #[serde(default)]
    pub elapsed_ms: u64,
}

impl LookupResult {
    /// Creates a result with no reference, link, status or timing.
    pub fn new(source: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            source: source.into(),
            verdict,
            reference_id: None,
            url: None,
            status: None,
            elapsed_ms: 0,
        }
    }

    pub fn with_reference_id(mut self, id: u64) -> Self {
        self.reference_id = Some(id);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Stamps the measured elapsed time onto the result.
    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Returns true if the source never produced an HTTP response.
    pub fn is_transport_failure(&self) -> bool {
        self.status == Some(TRANSPORT_FAILURE_STATUS)
    }
}
