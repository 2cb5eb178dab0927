//! Shared value types for the CETI resolution pipeline.
//!
//! Everything here is plain data passed by value between the tailers,
//! the resolver and the display sink. No component shares these across
//! threads by reference.

pub mod event;
pub mod lookup;
pub mod resolution;

pub use event::SystemEvent;
pub use lookup::{LookupResult, TRANSPORT_FAILURE_STATUS, Verdict};
pub use resolution::{CombinedResolution, TimingSummary};
