//! Run reporting: per-worker chunk attribution and stage timings.

pub mod report;
pub mod timing;

pub use report::RunReport;
pub use timing::{StageTiming, TimingBreakdown};
