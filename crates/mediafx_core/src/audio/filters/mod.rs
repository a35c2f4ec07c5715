//! The audio filter set.
//!
//! Five independent, stateless transforms over a sample buffer. Each is a
//! pure function of its explicit inputs; the closed [`AudioFilter`] enum maps
//! requested filter names onto them, so an unknown name is an explicit `None`
//! at the dispatch level rather than a registry miss.
//!
//! Parameters outside their documented ranges are clamped and the adjustment
//! logged; the clamp happens here at spec-parsing time, the filter functions
//! themselves take whatever they are given.

pub mod car;
pub mod denoise_delay;
pub mod gain_compression;
pub mod phone;
pub mod voice_enhancement;

use thiserror::Error;

use crate::models::FilterSpec;

use super::buffer::SampleBuffer;

/// Error raised by a filter during application.
///
/// These never abort the pipeline; the orchestrator skips the stage and
/// carries the buffer forward unchanged.
#[derive(Error, Debug, Clone)]
pub enum FilterError {
    /// The filter could not be designed for this buffer (e.g. a cutoff at or
    /// above Nyquist for the buffer's sample rate).
    #[error("filter design failed: {0}")]
    Design(String),
}

/// A recognized audio filter with resolved parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioFilter {
    GainCompression { threshold: f32, ratio: f32 },
    VoiceEnhancement { alpha: f32 },
    DenoiseDelay { delay_ms: f32, decay: f32, wiener_size: usize },
    Phone,
    Car,
}

impl AudioFilter {
    /// Resolve a requested filter spec. Returns `None` for an unknown name
    /// (reportable, non-fatal). Out-of-range parameters are clamped to their
    /// documented ranges.
    pub fn from_spec(spec: &FilterSpec) -> Option<Self> {
        match spec.name.as_str() {
            "gain_compression" => Some(Self::GainCompression {
                threshold: spec.param_clamped("threshold", 0.5, 0.1, 1.0) as f32,
                ratio: spec.param_clamped("ratio", 4.0, 1.0, 20.0) as f32,
            }),
            "voice_enhancement" => Some(Self::VoiceEnhancement {
                alpha: spec.param_clamped("alpha", 0.95, 0.1, 0.99) as f32,
            }),
            "denoise_delay" => Some(Self::DenoiseDelay {
                delay_ms: spec.param_clamped("delay_ms", 500.0, 100.0, 2000.0) as f32,
                decay: spec.param_clamped("decay", 0.5, 0.1, 0.9) as f32,
                wiener_size: spec.param_clamped("wiener_size", 1001.0, 501.0, 2001.0) as usize,
            }),
            "phone" => Some(Self::Phone),
            "car" => Some(Self::Car),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::GainCompression { .. } => "gain_compression",
            Self::VoiceEnhancement { .. } => "voice_enhancement",
            Self::DenoiseDelay { .. } => "denoise_delay",
            Self::Phone => "phone",
            Self::Car => "car",
        }
    }

    /// Apply the filter. Output has the same channel count and length as the
    /// input.
    pub fn apply(&self, buffer: &SampleBuffer) -> Result<SampleBuffer, FilterError> {
        match *self {
            Self::GainCompression { threshold, ratio } => {
                Ok(gain_compression::apply(buffer, threshold, ratio))
            }
            Self::VoiceEnhancement { alpha } => voice_enhancement::apply(buffer, alpha),
            Self::DenoiseDelay {
                delay_ms,
                decay,
                wiener_size,
            } => Ok(denoise_delay::apply(buffer, delay_ms, decay, wiener_size)),
            Self::Phone => phone::apply(buffer),
            Self::Car => car::apply(buffer),
        }
    }
}
