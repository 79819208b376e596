//! Serializable run reports.
//!
//! [`StitchReport`] is returned by the stitcher alongside the page image and
//! records the chosen overlap, the search bookkeeping, merge and fit geometry
//! and per-stage timings.

pub mod report;
pub mod timing;

pub use report::{InputDescriptor, StitchReport};
pub use timing::{StageTiming, TimingBreakdown};
