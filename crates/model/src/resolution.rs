use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lookup::LookupResult;

/// Headline timing shown by the overlay, taken from the primary source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingSummary {
    pub primary_source: String,
    pub primary_visited: bool,
    pub primary_elapsed_ms: u64,
}

impl TimingSummary {
    /// Builds the headline from the primary source's result.
    pub fn from_primary(result: &LookupResult) -> Self {
        Self {
            primary_source: result.source.clone(),
            primary_visited: result.verdict.is_visited(),
            primary_elapsed_ms: result.elapsed_ms,
        }
    }
}

impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let answer = if self.primary_visited { "Yes" } else { "No" };
        write!(f, "Response: {answer} | {} ms", self.primary_elapsed_ms)
    }
}

/// Merged outcome of one resolution cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedResolution {
    pub system_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<u64>,
    /// True if any source with a definite verdict reported a visit.
    pub overall_visited: bool,
    /// Per-source results in query order; the first is the primary.
    pub results: Vec<LookupResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timing: Option<TimingSummary>,
}

impl CombinedResolution {
    /// Returns the result reported by the named source.
    pub fn result(&self, source: &str) -> Option<&LookupResult> {
        self.results.iter().find(|r| r.source == source)
    }

    /// Returns the primary source's result.
    pub fn primary(&self) -> Option<&LookupResult> {
        self.results.first()
    }

    /// Human-readable status line.
    pub fn status_label(&self) -> &'static str {
        if self.overall_visited {
            "Visited"
        } else {
            "Not visited"
        }
    }

    /// Iterates `(source, url)` pairs for sources that produced a link.
    pub fn links(&self) -> impl Iterator<Item = (&str, &str)> {
        self.results
            .iter()
            .filter_map(|r| r.url.as_deref().map(|url| (r.source.as_str(), url)))
    }
}
