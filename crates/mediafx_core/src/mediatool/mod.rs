//! Media process adapter: the sole boundary to the external transcoder.
//!
//! Two subprocess-style calls exist — "transcode" (ffmpeg) and "probe"
//! (ffprobe). Everything higher up goes through [`ToolRunner`] and treats a
//! non-zero exit or a timeout as [`ToolError`]. No component parses tool
//! output beyond the documented probe fields.

mod command;
mod probe;
mod runner;

pub use command::FfmpegCommand;
pub use probe::{parse_probe_json, probe_file, MediaInfo, StreamInfo, StreamKind};
pub use runner::{ToolOutput, ToolRunner};

use std::io;

use thiserror::Error;

/// Error from invoking the external transcoder/prober.
#[derive(Error, Debug)]
pub enum ToolError {
    /// The tool binary does not exist. No fallback media processing is
    /// possible, so this propagates to the caller as fatal.
    #[error("{tool} not found (is it installed and on PATH?)")]
    NotFound { tool: String },

    /// The tool exists but could not be launched.
    #[error("failed to launch {tool}: {source}")]
    Launch {
        tool: String,
        #[source]
        source: io::Error,
    },

    /// The tool ran and exited non-zero.
    #[error("{tool} failed with exit code {exit_code}: {stderr}")]
    Failed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    /// The configured invocation timeout expired.
    #[error("{tool} timed out after {seconds}s")]
    TimedOut { tool: String, seconds: u64 },

    /// The tool succeeded but its output could not be parsed.
    #[error("failed to parse {tool} output: {message}")]
    Parse { tool: String, message: String },
}

impl ToolError {
    /// Whether this error rules out any further media processing.
    ///
    /// Run failures and timeouts are recoverable (the pipelines fall back to
    /// copying the source); a missing or unlaunchable tool is not.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ToolError::NotFound { .. } | ToolError::Launch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configuration_errors_are_fatal() {
        assert!(ToolError::NotFound {
            tool: "ffmpeg".into()
        }
        .is_fatal());

        assert!(!ToolError::Failed {
            tool: "ffmpeg".into(),
            exit_code: 1,
            stderr: String::new()
        }
        .is_fatal());

        assert!(!ToolError::TimedOut {
            tool: "ffmpeg".into(),
            seconds: 60
        }
        .is_fatal());
    }
}
