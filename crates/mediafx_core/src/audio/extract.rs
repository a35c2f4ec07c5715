//! Raw audio extraction through the media tool adapter.
//!
//! The source's audio track is decoded to a fixed target format (16-bit
//! linear PCM, 44100 Hz, stereo) regardless of its codec, so every filter
//! sees a uniform input. PCM is piped over stdout rather than staged through
//! a file.

use std::path::Path;

use crate::mediatool::{FfmpegCommand, ToolError, ToolRunner};

use super::buffer::SampleBuffer;

/// Fixed extraction format: guarantees filter input uniformity.
pub const TARGET_SAMPLE_RATE: u32 = 44100;
pub const TARGET_CHANNELS: u16 = 2;

/// Extract the source's audio as a normalized [`SampleBuffer`].
pub fn extract_audio(runner: &ToolRunner, source: &Path) -> Result<SampleBuffer, ToolError> {
    let args = FfmpegCommand::new()
        .input(source)
        .no_video()
        .audio_codec("pcm_s16le")
        .sample_rate(TARGET_SAMPLE_RATE)
        .channels(TARGET_CHANNELS)
        .format("s16le")
        .output_pipe()
        .build();

    let output = runner.ffmpeg(&args)?;
    let samples = bytes_to_i16_samples(&output.stdout);

    if samples.is_empty() {
        return Err(ToolError::Parse {
            tool: "ffmpeg".to_string(),
            message: "no audio samples extracted".to_string(),
        });
    }

    let buffer = SampleBuffer::from_interleaved_i16(
        &samples,
        TARGET_CHANNELS as usize,
        TARGET_SAMPLE_RATE,
    );

    tracing::debug!(
        samples = buffer.len(),
        seconds = buffer.duration_secs(),
        source = %source.display(),
        "extracted audio"
    );

    Ok(buffer)
}

/// Reinterpret little-endian bytes as i16 samples. A trailing odd byte is
/// dropped.
fn bytes_to_i16_samples(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}
