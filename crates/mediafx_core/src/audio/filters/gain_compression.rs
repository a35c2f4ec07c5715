//! Gain compression (soft-knee saturation).
//!
//! Emulates the saturation region of an analog amplifier: samples whose
//! magnitude exceeds the threshold are compressed by the given ratio above
//! it, samples at or below the threshold pass unchanged. No sample-rate
//! dependence.

use crate::audio::buffer::SampleBuffer;

/// Compress every sample above `threshold`:
/// `sign(x) * (threshold + (|x| - threshold) / ratio)`.
pub fn apply(buffer: &SampleBuffer, threshold: f32, ratio: f32) -> SampleBuffer {
    let channels = buffer
        .channels()
        .iter()
        .map(|channel| {
            channel
                .iter()
                .map(|&x| {
                    let magnitude = x.abs();
                    if magnitude > threshold {
                        x.signum() * (threshold + (magnitude - threshold) / ratio)
                    } else {
                        x
                    }
                })
                .collect()
        })
        .collect();

    SampleBuffer::new(channels, buffer.sample_rate())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_below_threshold_are_unchanged() {
        let buffer = SampleBuffer::new(vec![vec![0.1, -0.3, 0.5]], 44100);
        let out = apply(&buffer, 0.5, 4.0);
        assert_eq!(out, buffer);
    }

    #[test]
    fn samples_above_threshold_follow_the_formula() {
        let buffer = SampleBuffer::new(vec![vec![0.9, -0.9, 1.0]], 44100);
        let out = apply(&buffer, 0.5, 4.0);

        let expected = 0.5 + (0.9 - 0.5) / 4.0;
        assert!((out.channel(0)[0] - expected).abs() < 1e-6);
        assert!((out.channel(0)[1] + expected).abs() < 1e-6);
        assert!((out.channel(0)[2] - (0.5 + 0.5 / 4.0)).abs() < 1e-6);
    }

    #[test]
    fn idempotent_once_magnitudes_are_below_threshold() {
        // After one pass every sample is pulled under 1.0 but compressed
        // samples can still exceed the threshold; with a ratio that lands
        // everything at or below the threshold the second pass is a no-op.
        let buffer = SampleBuffer::new(vec![vec![0.2, 0.45, -0.49, 0.5]], 44100);
        let once = apply(&buffer, 0.5, 4.0);
        let twice = apply(&once, 0.5, 4.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn stereo_channels_are_processed_independently() {
        let buffer = SampleBuffer::new(vec![vec![0.9, 0.1], vec![0.1, 0.9]], 44100);
        let out = apply(&buffer, 0.5, 2.0);
        assert!((out.channel(0)[0] - 0.7).abs() < 1e-6);
        assert!((out.channel(1)[1] - 0.7).abs() < 1e-6);
        assert_eq!(out.channel(0)[1], 0.1);
        assert_eq!(out.channel(1)[0], 0.1);
    }
}
