//! The video filter set.
//!
//! Each filter maps to one transcoder invocation with a filter-graph
//! expression; the audio stream is always copied without re-encoding. Two of
//! the filters have a cheaper fallback variant for when the preferred mode is
//! unavailable on the installed transcoder build.

use std::path::Path;

use crate::mediatool::FfmpegCommand;
use crate::models::FilterSpec;

/// A recognized video filter with resolved parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoFilter {
    /// Convert color to luma only.
    Grayscale,
    /// Negate pixel values.
    ColorInvert,
    /// Motion-compensated frame-rate conversion.
    FrameInterpolation { target_fps: u32 },
    /// High-quality spatial resampling.
    Upscaling { width: u32, height: u32 },
}

impl VideoFilter {
    /// Resolve a requested filter spec. Returns `None` for an unknown name;
    /// out-of-range parameters are clamped to their documented ranges.
    pub fn from_spec(spec: &FilterSpec) -> Option<Self> {
        match spec.name.as_str() {
            "grayscale" => Some(Self::Grayscale),
            "color_invert" => Some(Self::ColorInvert),
            "frame_interpolation" => Some(Self::FrameInterpolation {
                target_fps: spec.param_clamped("target_fps", 60.0, 30.0, 120.0) as u32,
            }),
            "upscaling" => Some(Self::Upscaling {
                width: spec.param_clamped("width", 1920.0, 640.0, 3840.0) as u32,
                height: spec.param_clamped("height", 1080.0, 480.0, 2160.0) as u32,
            }),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Grayscale => "grayscale",
            Self::ColorInvert => "color_invert",
            Self::FrameInterpolation { .. } => "frame_interpolation",
            Self::Upscaling { .. } => "upscaling",
        }
    }

    /// Build the preferred transcode invocation for this stage.
    pub fn command(&self, input: &Path, output: &Path) -> Vec<String> {
        let base = FfmpegCommand::new().input(input);
        let cmd = match *self {
            Self::Grayscale => base.video_filter("format=gray"),
            Self::ColorInvert => base.video_filter("negate"),
            Self::FrameInterpolation { target_fps } => base.filter_complex(&format!(
                "minterpolate=fps={}:mi_mode=mci:mc_mode=aobmc:me_mode=bidir",
                target_fps
            )),
            Self::Upscaling { width, height } => {
                base.video_filter(&format!("scale={}:{}:flags=lanczos", width, height))
            }
        };
        cmd.copy_audio().output(output).build()
    }

    /// Build the simpler fallback invocation, for the filters that have one.
    ///
    /// Frame interpolation degrades to plain frame duplication/drop;
    /// upscaling degrades to a bicubic kernel.
    pub fn fallback_command(&self, input: &Path, output: &Path) -> Option<Vec<String>> {
        let base = FfmpegCommand::new().input(input);
        let cmd = match *self {
            Self::FrameInterpolation { target_fps } => {
                base.video_filter(&format!("fps={}", target_fps))
            }
            Self::Upscaling { width, height } => {
                base.video_filter(&format!("scale={}:{}:flags=bicubic", width, height))
            }
            Self::Grayscale | Self::ColorInvert => return None,
        };
        Some(cmd.copy_audio().output(output).build())
    }
}
