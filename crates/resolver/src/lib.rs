//! Resolution orchestrator.
//!
//! Turns a candidate system name into one [`CombinedResolution`]:
//! suppresses consecutive repeats, fans out to every configured
//! [`LookupClient`](ceti_lookup::LookupClient) concurrently, measures each
//! call, merges the verdicts and hands the result to a [`DisplaySink`].

pub mod merge;
pub mod orchestrator;
pub mod sink;

pub use ceti_model::CombinedResolution;
pub use merge::{combine, merge_verdicts};
pub use orchestrator::Orchestrator;
pub use sink::DisplaySink;
