//! WAV serialization of processed buffers.
//!
//! The processed track is staged as a 16-bit PCM WAV inside the invocation's
//! working directory before the remux/re-encode step picks it up. Clipping
//! and non-finite scrubbing happen in [`SampleBuffer::to_interleaved_i16`].

use std::path::Path;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};

use super::buffer::SampleBuffer;

/// Write the buffer as 16-bit PCM WAV.
pub fn write_wav(buffer: &SampleBuffer, path: &Path) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: buffer.channel_count() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for sample in buffer.to_interleaved_i16() {
        writer.write_sample(sample)?;
    }
    writer.finalize()
}

/// Read a 16-bit PCM WAV back into a buffer.
pub fn read_wav(path: &Path) -> Result<SampleBuffer, hound::Error> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<i16> = reader.samples::<i16>().collect::<Result<_, _>>()?;

    Ok(SampleBuffer::from_interleaved_i16(
        &samples,
        spec.channels as usize,
        spec.sample_rate,
    ))
}
