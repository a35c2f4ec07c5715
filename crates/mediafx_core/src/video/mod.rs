//! Video filter set and pipeline.
//!
//! Unlike the audio filters, video transforms never touch pixel data in this
//! process: each one is a transcoder invocation with a filter-graph
//! expression, chained stage by stage through the invocation's working
//! directory.

pub mod filters;
pub mod pipeline;

pub use filters::VideoFilter;
pub use pipeline::VideoPipeline;
