//! ffmpeg command builder.
//!
//! Builds the argument token vector for one transcode invocation. Numeric
//! parameters are formatted in one place instead of ad hoc string pasting at
//! every call site, and the output target is always appended last, after the
//! options that apply to it.

use std::path::Path;

/// Builder for an ffmpeg argument list.
///
/// Tokens are emitted in the order the methods are called, except inputs
/// (always first, after `-y`) and the output target (always last).
#[derive(Debug, Clone, Default)]
pub struct FfmpegCommand {
    inputs: Vec<String>,
    options: Vec<String>,
    output: Option<String>,
}

impl FfmpegCommand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an input file. May be called more than once (remux uses two).
    pub fn input(mut self, path: &Path) -> Self {
        self.inputs.push(path.to_string_lossy().to_string());
        self
    }

    /// Drop the video stream (`-vn`).
    pub fn no_video(mut self) -> Self {
        self.options.push("-vn".to_string());
        self
    }

    /// Set the audio codec (`-acodec`).
    pub fn audio_codec(mut self, codec: &str) -> Self {
        self.options.push("-acodec".to_string());
        self.options.push(codec.to_string());
        self
    }

    /// Set the video codec (`-c:v`), e.g. `"copy"` for remux.
    pub fn video_codec(mut self, codec: &str) -> Self {
        self.options.push("-c:v".to_string());
        self.options.push(codec.to_string());
        self
    }

    /// Copy the audio stream without re-encoding (`-c:a copy`).
    pub fn copy_audio(mut self) -> Self {
        self.options.push("-c:a".to_string());
        self.options.push("copy".to_string());
        self
    }

    /// Set the audio sample rate (`-ar`).
    pub fn sample_rate(mut self, hz: u32) -> Self {
        self.options.push("-ar".to_string());
        self.options.push(hz.to_string());
        self
    }

    /// Set the audio channel count (`-ac`).
    pub fn channels(mut self, count: u16) -> Self {
        self.options.push("-ac".to_string());
        self.options.push(count.to_string());
        self
    }

    /// Set a simple video filter graph (`-vf`).
    pub fn video_filter(mut self, graph: &str) -> Self {
        self.options.push("-vf".to_string());
        self.options.push(graph.to_string());
        self
    }

    /// Set a complex filter graph (`-filter_complex`).
    pub fn filter_complex(mut self, graph: &str) -> Self {
        self.options.push("-filter_complex".to_string());
        self.options.push(graph.to_string());
        self
    }

    /// Add a stream mapping (`-map`), e.g. `"0:v:0"`.
    pub fn map(mut self, spec: &str) -> Self {
        self.options.push("-map".to_string());
        self.options.push(spec.to_string());
        self
    }

    /// Truncate to the shortest input stream (`-shortest`).
    pub fn shortest(mut self) -> Self {
        self.options.push("-shortest".to_string());
        self
    }

    /// Force a container/stream format (`-f`), e.g. `"s16le"` for raw PCM.
    pub fn format(mut self, fmt: &str) -> Self {
        self.options.push("-f".to_string());
        self.options.push(fmt.to_string());
        self
    }

    /// Write the result to a file.
    pub fn output(mut self, path: &Path) -> Self {
        self.output = Some(path.to_string_lossy().to_string());
        self
    }

    /// Write the result to stdout.
    pub fn output_pipe(mut self) -> Self {
        self.output = Some("pipe:1".to_string());
        self
    }

    /// Build the complete argument token vector.
    pub fn build(self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.inputs.len() * 2 + self.options.len() + 4);

        // Overwrite existing outputs; the pipelines own their output paths.
        tokens.push("-y".to_string());
        tokens.push("-hide_banner".to_string());

        for input in self.inputs {
            tokens.push("-i".to_string());
            tokens.push(input);
        }

        tokens.extend(self.options);

        if let Some(output) = self.output {
            tokens.push(output);
        }

        tokens
    }
}
