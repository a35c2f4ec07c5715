//! Phone effect.
//!
//! Collapses the stereo image to mono (per-sample channel average, written to
//! every output channel) and applies a zero-phase 4th-order Butterworth
//! band-pass over 800-12000 Hz, the bandwidth of a decent handset.

use crate::audio::buffer::SampleBuffer;
use crate::audio::filtering::bandpass_zero_phase;

use super::FilterError;

const PHONE_BAND_LOW_HZ: f32 = 800.0;
const PHONE_BAND_HIGH_HZ: f32 = 12000.0;
const BAND_ORDER: usize = 4;

pub fn apply(buffer: &SampleBuffer) -> Result<SampleBuffer, FilterError> {
    let mono = buffer.downmix_mono();
    let filtered = bandpass_zero_phase(
        &mono,
        buffer.sample_rate(),
        PHONE_BAND_LOW_HZ,
        PHONE_BAND_HIGH_HZ,
        BAND_ORDER,
    )?;

    // Same mono signal on every output channel, preserving channel count.
    let channels = vec![filtered; buffer.channel_count()];
    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
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

    fn energy(samples: &[f32]) -> f64 {
        samples.iter().map(|&x| (x as f64).powi(2)).sum()
    }

    #[test]
    fn stereo_output_channels_are_identical() {
        let rate = 44100;
        let left = sine(2000.0, rate, 8820, 0.5);
        let right = sine(3000.0, rate, 8820, 0.5);
        let buffer = SampleBuffer::new(vec![left, right], rate);

        let out = apply(&buffer).unwrap();
        assert_eq!(out.channel_count(), 2);
        assert_eq!(out.channel(0), out.channel(1));
    }

    #[test]
    fn attenuates_sub_band_rumble() {
        let rate = 44100;
        let rumble = sine(100.0, rate, 8820, 0.8);
        let buffer = SampleBuffer::new(vec![rumble.clone()], rate);

        let out = apply(&buffer).unwrap();
        assert!(energy(out.channel(0)) < energy(&rumble) * 0.1);
    }

    #[test]
    fn passes_in_band_speech_frequencies() {
        let rate = 44100;
        let tone = sine(2000.0, rate, 8820, 0.5);
        let buffer = SampleBuffer::new(vec![tone.clone()], rate);

        let out = apply(&buffer).unwrap();
        assert!(energy(out.channel(0)) > energy(&tone) * 0.3);
    }

    #[test]
    fn mono_stays_mono() {
        let buffer = SampleBuffer::new(vec![sine(2000.0, 44100, 4410, 0.5)], 44100);
        let out = apply(&buffer).unwrap();
        assert_eq!(out.channel_count(), 1);
        assert_eq!(out.len(), 4410);
    }
}
