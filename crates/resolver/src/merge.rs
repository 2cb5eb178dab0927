//! Verdict merging.

use ceti_model::{CombinedResolution, LookupResult, TimingSummary};

/// Logical OR over every definite verdict.
///
/// `Unknown` verdicts contribute nothing; they are neither a visit nor
/// a negative.
pub fn merge_verdicts(results: &[LookupResult]) -> bool {
    results
        .iter()
        .filter_map(|r| r.verdict.as_bool())
        .any(|visited| visited)
}

/// Builds the combined result. The first result is the primary source.
pub fn combine(
    system_name: &str,
    address: Option<u64>,
    results: Vec<LookupResult>,
) -> CombinedResolution {
    CombinedResolution {
        system_name: system_name.to_string(),
        address,
        overall_visited: merge_verdicts(&results),
        timing: results.first().map(TimingSummary::from_primary),
        results,
    }
}
