//! Video pipeline orchestrator.
//!
//! Stages run sequentially, each consuming the previous stage's output file
//! from the working directory. A stage that fails retries once with its
//! fallback invocation when it has one; a stage that still fails degrades the
//! whole run to an unmodified copy of the source. As with audio, the output
//! path always holds a usable artifact on `Ok`.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Settings;
use crate::errors::{PipelineError, PipelineResult};
use crate::mediatool::ToolRunner;
use crate::models::{FilterChain, PipelineReport, SkippedFilter};

use super::filters::VideoFilter;

/// Runs one video filter chain against one source artifact.
pub struct VideoPipeline {
    runner: ToolRunner,
    temp_root: Option<PathBuf>,
}

impl VideoPipeline {
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
        // Resolve the whole chain up front so unknown names are reported even
        // when a later stage fails.
        let mut stages = Vec::new();
        let mut skipped = Vec::new();
        for spec in chain {
            match VideoFilter::from_spec(spec) {
                Some(filter) => stages.push(filter),
                None => {
                    tracing::warn!(filter = %spec.name, "unknown video filter, skipping");
                    skipped.push(SkippedFilter::new(&spec.name, "unknown filter name"));
                }
            }
        }

        if stages.is_empty() {
            tracing::debug!(source = %source.display(), "no runnable stages, copying source");
            copy_artifact(source, output)?;
            return Ok(PipelineReport::from_skips(skipped));
        }

        let workdir = self.make_workdir()?;

        let mut current = source.to_path_buf();
        for (index, filter) in stages.iter().enumerate() {
            let is_last = index == stages.len() - 1;
            let stage_output = if is_last {
                output.to_path_buf()
            } else {
                workdir
                    .path()
                    .join(format!("stage_{}.{}", index, stage_extension(output)))
            };

            if let Err(e) = self.run_stage(filter, &current, &stage_output) {
                if let PipelineError::Tool(tool_err) = &e {
                    if tool_err.is_fatal() {
                        return Err(e);
                    }
                }
                tracing::warn!(
                    filter = filter.name(),
                    error = %e,
                    "video stage failed, falling back to unmodified copy"
                );
                copy_artifact(source, output)?;
                return Ok(PipelineReport::fallback(e.to_string(), skipped));
            }

            tracing::debug!(filter = filter.name(), "applied video filter");
            current = stage_output;
        }

        Ok(PipelineReport::from_skips(skipped))
    }

    /// Run one stage, retrying once with the filter's fallback invocation if
    /// the preferred one fails recoverably.
    fn run_stage(
        &self,
        filter: &VideoFilter,
        input: &Path,
        output: &Path,
    ) -> PipelineResult<()> {
        let primary = filter.command(input, output);
        match self.runner.ffmpeg(&primary) {
            Ok(_) => return Ok(()),
            Err(e) if e.is_fatal() => return Err(e.into()),
            Err(e) => {
                let Some(fallback) = filter.fallback_command(input, output) else {
                    return Err(PipelineError::processing(filter.name(), e.to_string()));
                };
                tracing::warn!(
                    filter = filter.name(),
                    error = %e,
                    "preferred invocation failed, retrying with fallback"
                );
                match self.runner.ffmpeg(&fallback) {
                    Ok(_) => Ok(()),
                    Err(e) if e.is_fatal() => Err(e.into()),
                    Err(e) => Err(PipelineError::processing(filter.name(), e.to_string())),
                }
            }
        }
    }

    fn make_workdir(&self) -> PipelineResult<TempDir> {
        let builder = {
            let mut b = tempfile::Builder::new();
            b.prefix("mediafx-video-");
            b
        };
        let result = match &self.temp_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        };
        result.map_err(|e| PipelineError::io("create working directory", e))
    }
}

/// Intermediate stage files keep the output's container so the transcoder
/// infers the right muxer at every hop.
fn stage_extension(output: &Path) -> String {
    output
        .extension()
        .map(|e| e.to_string_lossy().to_string())
        .unwrap_or_else(|| "mp4".to_string())
}

fn copy_artifact(source: &Path, output: &Path) -> PipelineResult<()> {
    std::fs::copy(source, output)
        .map(|_| ())
        .map_err(|e| PipelineError::io("copy source to output", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediatool::ToolError;
    use crate::models::{FilterSpec, PipelineOutcome};

    #[test]
    fn intermediate_stages_keep_the_output_container() {
        assert_eq!(stage_extension(Path::new("out.mkv")), "mkv");
        assert_eq!(stage_extension(Path::new("out.mp4")), "mp4");
        assert_eq!(stage_extension(Path::new("out")), "mp4");
    }

    #[test]
    fn empty_chain_copies_source_without_invoking_the_tool() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&source, b"container bytes").unwrap();

        let pipeline = VideoPipeline::new(ToolRunner::new(
            "mediafx-no-such-tool",
            "mediafx-no-such-tool",
        ));
        let report = pipeline.run(&source, &output, &FilterChain::default()).unwrap();

        assert_eq!(report.outcome, PipelineOutcome::Full);
        assert_eq!(std::fs::read(&output).unwrap(), b"container bytes");
    }

    #[test]
    fn chain_of_only_unknown_names_copies_source_and_reports_partial() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&source, b"container bytes").unwrap();

        let pipeline = VideoPipeline::new(ToolRunner::new(
            "mediafx-no-such-tool",
            "mediafx-no-such-tool",
        ));
        let chain = FilterChain::new(vec![FilterSpec::new("sepia"), FilterSpec::new("bloom")]);
        let report = pipeline.run(&source, &output, &chain).unwrap();

        assert_eq!(report.outcome, PipelineOutcome::Partial);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(std::fs::read(&output).unwrap(), b"container bytes");
    }

    #[cfg(unix)]
    #[test]
    fn recoverable_stage_failure_falls_back_to_copy() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&source, b"source bytes").unwrap();

        // `false` exits non-zero for both the preferred and fallback
        // invocations, so the run degrades to a copy.
        let pipeline = VideoPipeline::new(ToolRunner::new("false", "false"));
        let chain = FilterChain::new(vec![FilterSpec::new("upscaling")]);
        let report = pipeline.run(&source, &output, &chain).unwrap();

        assert!(report.is_fallback());
        assert!(report.fallback_error.is_some());
        assert_eq!(std::fs::read(&output).unwrap(), b"source bytes");
    }

    #[cfg(unix)]
    #[test]
    fn missing_tool_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&source, b"source bytes").unwrap();

        let pipeline = VideoPipeline::new(ToolRunner::new(
            "mediafx-no-such-tool",
            "mediafx-no-such-tool",
        ));
        let chain = FilterChain::new(vec![FilterSpec::new("grayscale")]);

        match pipeline.run(&source, &output, &chain) {
            Err(PipelineError::Tool(ToolError::NotFound { .. })) => {}
            other => panic!("expected fatal NotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn multi_stage_chain_writes_final_output() {
        // `true` exits zero without writing files; the pipeline only demands
        // an exit status from each stage, so this exercises the staging loop
        // end to end.
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("in.mp4");
        let output = dir.path().join("out.mp4");
        std::fs::write(&source, b"source bytes").unwrap();

        let pipeline = VideoPipeline::new(ToolRunner::new("true", "true"));
        let chain = FilterChain::new(vec![
            FilterSpec::new("grayscale"),
            FilterSpec::new("color_invert"),
        ]);
        let report = pipeline.run(&source, &output, &chain).unwrap();

        assert_eq!(report.outcome, PipelineOutcome::Full);
        assert!(report.skipped.is_empty());
    }
}
