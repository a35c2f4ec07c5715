//! Pipeline invocation reports.
//!
//! A pipeline run that produces an output file is a success from the caller's
//! point of view even when individual filters were skipped or the whole run
//! fell back to an unmodified copy. The report tells the caller which of
//! those happened so the web layer can surface it to the user.

use serde::{Deserialize, Serialize};

/// How much of the requested filtering actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineOutcome {
    /// Every requested filter was applied.
    Full,
    /// The output was produced but one or more filters were skipped.
    Partial,
    /// Processing failed; the output is an unmodified copy of the source.
    Fallback,
}

/// A filter that was requested but not applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFilter {
    /// The requested filter name.
    pub name: String,
    /// Why it was skipped (unknown name, or the error it raised).
    pub reason: String,
}

impl SkippedFilter {
    pub fn new(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result of one pipeline invocation. The output artifact always exists when
/// this is returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    pub outcome: PipelineOutcome,

    /// Filters that were skipped, in chain order.
    #[serde(default)]
    pub skipped: Vec<SkippedFilter>,

    /// The error that forced a full fallback, if any.
    #[serde(default)]
    pub fallback_error: Option<String>,
}

impl PipelineReport {
    /// Report for a run where every filter applied cleanly.
    pub fn full() -> Self {
        Self {
            outcome: PipelineOutcome::Full,
            skipped: Vec::new(),
            fallback_error: None,
        }
    }

    /// Report derived from the skip list: `Full` if nothing was skipped.
    pub fn from_skips(skipped: Vec<SkippedFilter>) -> Self {
        let outcome = if skipped.is_empty() {
            PipelineOutcome::Full
        } else {
            PipelineOutcome::Partial
        };
        Self {
            outcome,
            skipped,
            fallback_error: None,
        }
    }

    /// Report for a run that degraded to copying the source unchanged.
    pub fn fallback(error: impl Into<String>, skipped: Vec<SkippedFilter>) -> Self {
        Self {
            outcome: PipelineOutcome::Fallback,
            skipped,
            fallback_error: Some(error.into()),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.outcome == PipelineOutcome::Fallback
    }
}
