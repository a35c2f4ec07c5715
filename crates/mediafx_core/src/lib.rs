//! MediaFX Core - filter pipelines for uploaded media
//!
//! This crate contains the audio and video filter pipelines with zero HTTP
//! dependencies. The web layer hands it a source path, an output path, and a
//! filter chain; it hands back a processed artifact plus a report describing
//! how much of the requested filtering actually happened.

pub mod audio;
pub mod config;
pub mod errors;
pub mod logging;
pub mod mediatool;
pub mod models;
pub mod video;

pub use audio::pipeline::AudioPipeline;
pub use errors::{PipelineError, PipelineResult};
pub use mediatool::{ToolError, ToolRunner};
pub use models::{FilterChain, FilterSpec, PipelineOutcome, PipelineReport, SkippedFilter};
pub use video::pipeline::VideoPipeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
