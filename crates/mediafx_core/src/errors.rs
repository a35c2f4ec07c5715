//! Error types for the filter pipelines.
//!
//! Errors are tagged with the pipeline stage that failed so the web layer can
//! log where processing broke down. Most of these never reach the caller as
//! `Err`: the orchestrators degrade to copying the source file and report the
//! original error through [`crate::models::PipelineReport`] instead. Only
//! adapter configuration problems (tool missing or unlaunchable) are fatal.

use std::io;

use thiserror::Error;

use crate::mediatool::ToolError;

pub type PipelineResult<T> = Result<T, PipelineError>;

/// Error from a pipeline invocation, tagged to the stage that failed.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Could not read or convert the source audio track.
    #[error("audio extraction failed: {message}")]
    Extraction { message: String },

    /// A filter stage failed during application.
    ///
    /// Localized to one filter; the orchestrator records it in the report and
    /// carries the buffer forward unchanged.
    #[error("filter '{filter}' failed: {message}")]
    Processing { filter: String, message: String },

    /// Could not reassemble the output container.
    #[error("remux failed: {message}")]
    Remux { message: String },

    /// The external tool could not be invoked at all.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// File I/O error outside of tool invocation.
    #[error("I/O error in {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction {
            message: message.into(),
        }
    }

    pub fn processing(filter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Processing {
            filter: filter.into(),
            message: message.into(),
        }
    }

    pub fn remux(message: impl Into<String>) -> Self {
        Self::Remux {
            message: message.into(),
        }
    }

    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_carry_stage_context() {
        let err = PipelineError::extraction("no audio track");
        assert_eq!(err.to_string(), "audio extraction failed: no audio track");

        let err = PipelineError::processing("phone", "cutoff above Nyquist");
        assert!(err.to_string().contains("phone"));

        let err = PipelineError::remux("container rejected stream");
        assert!(err.to_string().starts_with("remux failed"));
    }
}
