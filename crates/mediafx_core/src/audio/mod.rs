//! Audio filter set and pipeline.
//!
//! The DSP filters are pure functions over a complete in-memory
//! [`buffer::SampleBuffer`]; there is no streaming processing. The pipeline
//! extracts PCM from the source through the media tool adapter, runs the
//! configured chain, and remuxes or re-encodes the result.

pub mod buffer;
pub mod extract;
pub mod filtering;
pub mod filters;
pub mod pipeline;
pub mod wav;
pub mod wiener;

pub use buffer::SampleBuffer;
pub use filters::{AudioFilter, FilterError};
