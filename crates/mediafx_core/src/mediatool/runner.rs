//! Synchronous external tool execution.
//!
//! Invocations block the calling thread until the subprocess exits (or the
//! configured timeout expires). Stdout is captured as raw bytes because audio
//! extraction pipes PCM through it; stderr is captured as text for
//! diagnostics.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::config::Settings;

use super::ToolError;

const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured output of a successful tool invocation.
#[derive(Debug)]
pub struct ToolOutput {
    /// Raw stdout bytes (PCM for extraction, JSON for probing).
    pub stdout: Vec<u8>,
    /// Diagnostic output.
    pub stderr: String,
}

impl ToolOutput {
    /// Stdout decoded as UTF-8, lossily.
    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }
}

/// Runner for the external transcoder and prober binaries.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    ffmpeg_path: String,
    ffprobe_path: String,
    timeout: Option<Duration>,
}

impl ToolRunner {
    pub fn new(ffmpeg_path: impl Into<String>, ffprobe_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ffprobe_path: ffprobe_path.into(),
            timeout: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let runner = Self::new(&settings.tools.ffmpeg_path, &settings.tools.ffprobe_path);
        if settings.tools.timeout_secs > 0 {
            runner.with_timeout(Duration::from_secs(settings.tools.timeout_secs))
        } else {
            runner
        }
    }

    /// Set a per-invocation timeout. Expiry kills the subprocess and is
    /// reported as [`ToolError::TimedOut`].
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Run the transcoder with the given arguments.
    pub fn ffmpeg(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        self.run(&self.ffmpeg_path, args)
    }

    /// Run the prober with the given arguments.
    pub fn ffprobe(&self, args: &[String]) -> Result<ToolOutput, ToolError> {
        self.run(&self.ffprobe_path, args)
    }

    fn run(&self, program: &str, args: &[String]) -> Result<ToolOutput, ToolError> {
        let tool = tool_name(program);
        tracing::debug!(%tool, ?args, "invoking external tool");

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ToolError::NotFound { tool: tool.clone() }
                } else {
                    ToolError::Launch {
                        tool: tool.clone(),
                        source: e,
                    }
                }
            })?;

        // Drain both pipes on background threads so neither can fill up and
        // deadlock the child while we wait on it.
        let stdout_handle = child.stdout.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });
        let stderr_handle = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = pipe.read_to_end(&mut buf);
                buf
            })
        });

        let status = match self.timeout {
            None => child.wait().map_err(|e| ToolError::Launch {
                tool: tool.clone(),
                source: e,
            })?,
            Some(limit) => {
                let deadline = Instant::now() + limit;
                loop {
                    match child.try_wait().map_err(|e| ToolError::Launch {
                        tool: tool.clone(),
                        source: e,
                    })? {
                        Some(status) => break status,
                        None if Instant::now() >= deadline => {
                            let _ = child.kill();
                            let _ = child.wait();
                            join_reader(stdout_handle);
                            join_reader(stderr_handle);
                            return Err(ToolError::TimedOut {
                                tool,
                                seconds: limit.as_secs(),
                            });
                        }
                        None => thread::sleep(WAIT_POLL_INTERVAL),
                    }
                }
            }
        };

        let stdout = join_reader(stdout_handle);
        let stderr = String::from_utf8_lossy(&join_reader(stderr_handle)).to_string();

        if !status.success() {
            return Err(ToolError::Failed {
                tool,
                exit_code: status.code().unwrap_or(-1),
                stderr: stderr.trim().to_string(),
            });
        }

        Ok(ToolOutput { stdout, stderr })
    }
}

fn join_reader(handle: Option<thread::JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

/// Basename of the tool for error messages ("/opt/bin/ffmpeg" -> "ffmpeg").
fn tool_name(program: &str) -> String {
    Path::new(program)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| program.to_string())
}
