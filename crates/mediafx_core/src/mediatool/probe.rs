//! File probing using ffprobe.
//!
//! Returns structured metadata (duration, container format, per-stream
//! codec/type/dimensions/rate). The pipelines only ever ask two questions of
//! it: "does this file have a video stream?" and "how long is it?".

use std::path::Path;

use serde_json::Value;

use super::runner::ToolRunner;
use super::ToolError;

/// Stream type as reported by the prober.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    Other,
}

impl StreamKind {
    fn from_codec_type(s: &str) -> Self {
        match s {
            "video" => StreamKind::Video,
            "audio" => StreamKind::Audio,
            _ => StreamKind::Other,
        }
    }
}

/// One stream inside a container.
#[derive(Debug, Clone)]
pub struct StreamInfo {
    pub index: usize,
    pub kind: StreamKind,
    pub codec_name: String,
    /// Present for video streams.
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Present for audio streams.
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

/// Probe result for one media file.
#[derive(Debug, Clone, Default)]
pub struct MediaInfo {
    pub format_name: String,
    pub duration_secs: Option<f64>,
    pub streams: Vec<StreamInfo>,
}

impl MediaInfo {
    /// Whether the file carries a video stream (container-with-video vs
    /// audio-only classification).
    pub fn has_video_stream(&self) -> bool {
        self.streams.iter().any(|s| s.kind == StreamKind::Video)
    }

    pub fn has_audio_stream(&self) -> bool {
        self.streams.iter().any(|s| s.kind == StreamKind::Audio)
    }
}

/// Probe a media file.
pub fn probe_file(runner: &ToolRunner, path: &Path) -> Result<MediaInfo, ToolError> {
    tracing::debug!(path = %path.display(), "probing file");

    let args = vec![
        "-v".to_string(),
        "error".to_string(),
        "-print_format".to_string(),
        "json".to_string(),
        "-show_format".to_string(),
        "-show_streams".to_string(),
        path.to_string_lossy().to_string(),
    ];

    let output = runner.ffprobe(&args)?;

    let json: Value = serde_json::from_slice(&output.stdout).map_err(|e| ToolError::Parse {
        tool: "ffprobe".to_string(),
        message: e.to_string(),
    })?;

    Ok(parse_probe_json(&json))
}

/// Parse the JSON output of `ffprobe -show_format -show_streams`.
///
/// Fields ffprobe reports as strings (duration, sample_rate) are parsed
/// leniently; anything malformed is simply absent from the result.
pub fn parse_probe_json(json: &Value) -> MediaInfo {
    let mut info = MediaInfo::default();

    if let Some(format) = json.get("format") {
        info.format_name = format
            .get("format_name")
            .and_then(|f| f.as_str())
            .unwrap_or("unknown")
            .to_string();

        info.duration_secs = format
            .get("duration")
            .and_then(|d| d.as_str())
            .and_then(|d| d.parse::<f64>().ok());
    }

    if let Some(streams) = json.get("streams").and_then(|s| s.as_array()) {
        for stream in streams {
            if let Some(parsed) = parse_stream(stream) {
                info.streams.push(parsed);
            }
        }
    }

    info
}

fn parse_stream(stream: &Value) -> Option<StreamInfo> {
    let kind = stream
        .get("codec_type")
        .and_then(|t| t.as_str())
        .map(StreamKind::from_codec_type)?;

    let index = stream.get("index").and_then(|i| i.as_u64()).unwrap_or(0) as usize;

    let codec_name = stream
        .get("codec_name")
        .and_then(|c| c.as_str())
        .unwrap_or("unknown")
        .to_string();

    Some(StreamInfo {
        index,
        kind,
        codec_name,
        width: stream.get("width").and_then(|w| w.as_u64()).map(|w| w as u32),
        height: stream
            .get("height")
            .and_then(|h| h.as_u64())
            .map(|h| h as u32),
        sample_rate: stream
            .get("sample_rate")
            .and_then(|r| r.as_str())
            .and_then(|r| r.parse::<u32>().ok()),
        channels: stream
            .get("channels")
            .and_then(|c| c.as_u64())
            .map(|c| c as u16),
    })
}
