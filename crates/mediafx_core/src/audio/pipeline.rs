//! Audio pipeline orchestrator.
//!
//! Extract -> filter chain -> serialize -> remux/re-encode. Failures are
//! contained at the smallest possible scope: a bad filter skips one stage, an
//! extraction or remux failure degrades the whole run to an unmodified copy
//! of the source. The output path always ends up holding a usable artifact;
//! the report says how it was produced.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Settings;
use crate::errors::{PipelineError, PipelineResult};
use crate::mediatool::{probe_file, FfmpegCommand, ToolError, ToolRunner};
use crate::models::{FilterChain, PipelineReport, SkippedFilter};

use super::buffer::SampleBuffer;
use super::extract::extract_audio;
use super::filters::AudioFilter;
use super::wav::write_wav;

const PROCESSED_WAV_NAME: &str = "processed_audio.wav";

/// Runs one audio filter chain against one source artifact.
pub struct AudioPipeline {
    runner: ToolRunner,
    temp_root: Option<PathBuf>,
}

impl AudioPipeline {
    pub fn new(runner: ToolRunner) -> Self {
        Self {
            runner,
            temp_root: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut pipeline = Self::new(ToolRunner::from_settings(settings));
        if !settings.paths.temp_root.is_empty() {
            pipeline.temp_root = Some(PathBuf::from(&settings.paths.temp_root));
        }
        pipeline
    }

    /// Run the chain. On return the output path holds a playable artifact.
    ///
    /// Returns `Err` only when the external tool is missing or unlaunchable;
    /// every other failure degrades to a copy of the source, reported through
    /// the returned [`PipelineReport`].
    pub fn run(
        &self,
        source: &Path,
        output: &Path,
        chain: &FilterChain,
    ) -> PipelineResult<PipelineReport> {
        if chain.is_empty() {
            tracing::debug!(source = %source.display(), "empty chain, copying source");
            copy_artifact(source, output)?;
            return Ok(PipelineReport::full());
        }

        // Working area scoped to this invocation; removed on every exit path
        // when the guard drops.
        let workdir = self.make_workdir()?;

        let buffer = match extract_audio(&self.runner, source) {
            Ok(buffer) => buffer,
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                let error = PipelineError::extraction(e.to_string());
                tracing::warn!(%error, "falling back to unmodified copy");
                copy_artifact(source, output)?;
                return Ok(PipelineReport::fallback(error.to_string(), Vec::new()));
            }
        };

        let (buffer, skipped) = apply_chain(buffer, chain);

        match self.finish(source, output, &buffer, workdir.path()) {
            Ok(()) => Ok(PipelineReport::from_skips(skipped)),
            Err(PipelineError::Tool(e)) if e.is_fatal() => Err(e.into()),
            Err(e) => {
                tracing::warn!(error = %e, "falling back to unmodified copy");
                copy_artifact(source, output)?;
                Ok(PipelineReport::fallback(e.to_string(), skipped))
            }
        }
    }

    /// Serialize the processed buffer and reassemble the output artifact.
    fn finish(
        &self,
        source: &Path,
        output: &Path,
        buffer: &SampleBuffer,
        workdir: &Path,
    ) -> PipelineResult<()> {
        let processed_wav = workdir.join(PROCESSED_WAV_NAME);
        write_wav(buffer, &processed_wav).map_err(|e| {
            PipelineError::io(
                "write processed wav",
                io::Error::new(io::ErrorKind::Other, e),
            )
        })?;

        let info = probe_file(&self.runner, source).map_err(remux_or_fatal)?;

        let args = if info.has_video_stream() {
            // Copy the original video stream untouched, replace the audio
            // track, truncate to the shorter of the two.
            FfmpegCommand::new()
                .input(source)
                .input(&processed_wav)
                .map("0:v:0")
                .map("1:a:0")
                .video_codec("copy")
                .audio_codec("aac")
                .shortest()
                .output(output)
                .build()
        } else {
            FfmpegCommand::new()
                .input(&processed_wav)
                .audio_codec(audio_codec_for(output))
                .output(output)
                .build()
        };

        self.runner.ffmpeg(&args).map_err(remux_or_fatal)?;
        Ok(())
    }

    fn make_workdir(&self) -> PipelineResult<TempDir> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("mediafx-audio-");
            b
        };
        let result = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        result.map_err(|e| PipelineError::io("create working directory", e))
    }
}

/// Apply each recognized filter in chain order. Unknown names and failing
/// filters are skipped and recorded; the buffer is carried forward unchanged
/// by a skipped stage.
fn apply_chain(
    mut buffer: SampleBuffer,
    chain: &FilterChain,
) -> (SampleBuffer, Vec<SkippedFilter>) {
    let mut skipped = Vec::new();

    for spec in chain {
        match AudioFilter::from_spec(spec) {
            None => {
                tracing::warn!(filter = %spec.name, "unknown audio filter, skipping");
                skipped.push(SkippedFilter::new(&spec.name, "unknown filter name"));
            }
            Some(filter) => match filter.apply(&buffer) {
                Ok(next) => {
                    tracing::debug!(filter = filter.name(), "applied audio filter");
                    buffer = next;
                }
                Err(e) => {
                    let error = PipelineError::processing(filter.name(), e.to_string());
                    tracing::warn!(%error, "filter failed, carrying buffer forward");
                    skipped.push(SkippedFilter::new(filter.name(), error.to_string()));
                }
            },
        }
    }

    (buffer, skipped)
}

/// Pick the audio codec for an audio-only output by its extension.
fn audio_codec_for(output: &Path) -> &'static str {
    let extension = output
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "wav" => "pcm_s16le",
        "mp3" => "libmp3lame",
        "m4a" | "aac" => "aac",
        "flac" => "flac",
        // Unrecognized extensions fall back to a default lossy format.
        _ => "libmp3lame",
    }
}

/// Map a tool failure during reassembly: fatal configuration errors keep
/// their identity, everything else becomes a remux-stage error.
fn remux_or_fatal(e: ToolError) -> PipelineError {
    if e.is_fatal() {
        PipelineError::Tool(e)
    } else {
        PipelineError::remux(e.to_string())
    }
}

fn copy_artifact(source: &Path, output: &Path) -> PipelineResult<()> {
    std::fs::copy(source, output)
        .map(|_| ())
        .map_err(|e| PipelineError::io("copy source to output", e))
}
