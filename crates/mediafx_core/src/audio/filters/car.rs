//! Car effect.
//!
//! Widens the stereo image by amplifying the side signal of a mid/side
//! decomposition, then rolls off the top end with a zero-phase 4th-order
//! Butterworth low-pass at 10 kHz (cabin acoustics). Mono input is widened
//! against itself, which leaves it unchanged apart from the low-pass.

use crate::audio::buffer::SampleBuffer;
use crate::audio::filtering::lowpass_zero_phase;

use super::FilterError;

const SIDE_AMPLIFICATION: f32 = 1.5;
const CABIN_CUTOFF_HZ: f32 = 10000.0;
const LOWPASS_ORDER: usize = 4;

pub fn apply(buffer: &SampleBuffer) -> Result<SampleBuffer, FilterError> {
    // Mono is duplicated into two identical channels for the mid/side math;
    // its side signal is zero so only the low-pass has any effect.
    let (left, right): (&[f32], &[f32]) = if buffer.channel_count() >= 2 {
        (buffer.channel(0), buffer.channel(1))
    } else {
        (buffer.channel(0), buffer.channel(0))
    };

    let frames = left.len();
    let mut enhanced_left = Vec::with_capacity(frames);
    let mut enhanced_right = Vec::with_capacity(frames);

    for i in 0..frames {
        let mid = (left[i] + right[i]) / 2.0;
        let side = (left[i] - right[i]) / 2.0 * SIDE_AMPLIFICATION;
        enhanced_left.push(mid + side);
        enhanced_right.push(mid - side);
    }

    let filtered_left = lowpass_zero_phase(
        &enhanced_left,
        buffer.sample_rate(),
        CABIN_CUTOFF_HZ,
        LOWPASS_ORDER,
    )?;

    let channels = if buffer.channel_count() >= 2 {
        let filtered_right = lowpass_zero_phase(
            &enhanced_right,
            buffer.sample_rate(),
            CABIN_CUTOFF_HZ,
            LOWPASS_ORDER,
        )?;
        vec![filtered_left, filtered_right]
    } else {
        // Both reconstructed channels are identical; collapse back to mono to
        // preserve the input channel count.
        vec![filtered_left]
    };

    Ok(SampleBuffer::new(channels, buffer.sample_rate()).renormalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq: f32, rate: u32, n: usize, amplitude: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f32 / rate as f32).sin())
            .collect()
    }

    #[test]
    fn identical_channels_stay_identical() {
        // A mono signal duplicated to stereo has zero side signal; widening
        // has nothing to amplify, so L == R on output.
        let rate = 44100;
        let mono = sine(440.0, rate, 8820, 0.5);
        let buffer = SampleBuffer::new(vec![mono.clone(), mono], rate);

        let out = apply(&buffer).unwrap();
        assert_eq!(out.channel(0), out.channel(1));
    }

    #[test]
    fn side_amplification_math_on_a_two_tone_signal() {
        // Distinct tones per channel with known mid/side decomposition. Both
        // tones sit far below the 10 kHz cutoff and the filter is zero-phase,
        // so away from the edges the output should match the widened signal.
        let rate = 44100;
        let n = 17640;
        let left = sine(220.0, rate, n, 0.4);
        let right = sine(330.0, rate, n, 0.3);
        let buffer = SampleBuffer::new(vec![left.clone(), right.clone()], rate);

        let out = apply(&buffer).unwrap();

        for i in (n / 4)..(3 * n / 4) {
            let mid = (left[i] + right[i]) / 2.0;
            let side = (left[i] - right[i]) / 2.0 * 1.5;
            assert!(
                (out.channel(0)[i] - (mid + side)).abs() < 0.05,
                "left mismatch at {}",
                i
            );
            assert!(
                (out.channel(1)[i] - (mid - side)).abs() < 0.05,
                "right mismatch at {}",
                i
            );
        }
    }

    #[test]
    fn mono_input_keeps_one_channel() {
        let buffer = SampleBuffer::new(vec![sine(440.0, 44100, 4410, 0.5)], 44100);
        let out = apply(&buffer).unwrap();
        assert_eq!(out.channel_count(), 1);
        assert_eq!(out.len(), 4410);
    }

    #[test]
    fn widened_output_never_clips() {
        let rate = 44100;
        let n = 8820;
        // Hard-panned loud channels force the widened signal past 1.0.
        let left = sine(220.0, rate, n, 0.95);
        let right: Vec<f32> = sine(220.0, rate, n, 0.95).iter().map(|s| -s).collect();
        let buffer = SampleBuffer::new(vec![left, right], rate);

        let out = apply(&buffer).unwrap();
        assert!(out.peak() <= 1.0 + 1e-6);
    }
}
