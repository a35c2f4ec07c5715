//! Data models shared across the pipelines.

mod chain;
mod report;

pub use chain::{FilterChain, FilterSpec};
pub use report::{PipelineOutcome, PipelineReport, SkippedFilter};
