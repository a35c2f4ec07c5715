//! Voice enhancement.
//!
//! A first-order pre-emphasis difference filter boosts the high-frequency
//! content consonants live in, then a zero-phase 4th-order Butterworth
//! band-pass over 800-6000 Hz isolates the speech band. Both stages run
//! independently per channel.

use crate::audio::buffer::SampleBuffer;
use crate::audio::filtering::bandpass_zero_phase;

use super::FilterError;

const SPEECH_BAND_LOW_HZ: f32 = 800.0;
const SPEECH_BAND_HIGH_HZ: f32 = 6000.0;
const BAND_ORDER: usize = 4;

/// Apply pre-emphasis (`y[n] = x[n] - alpha * x[n-1]`) followed by the speech
/// band-pass.
pub fn apply(buffer: &SampleBuffer, alpha: f32) -> Result<SampleBuffer, FilterError> {
    let mut channels = Vec::with_capacity(buffer.channel_count());

    for channel in buffer.channels() {
        let emphasized = pre_emphasis(channel, alpha);
        channels.push(bandpass_zero_phase(
            &emphasized,
            buffer.sample_rate(),
            SPEECH_BAND_LOW_HZ,
            SPEECH_BAND_HIGH_HZ,
            BAND_ORDER,
        )?);
    }

    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
}

/// First-order difference filter; y[0] = x[0].
fn pre_emphasis(samples: &[f32], alpha: f32) -> Vec<f32> {
    let mut out = Vec::with_capacity(samples.len());
    let mut previous = 0.0f32;
    for (i, &x) in samples.iter().enumerate() {
        if i == 0 {
            out.push(x);
        } else {
            out.push(x - alpha * previous);
        }
        previous = x;
    }
    out
}
