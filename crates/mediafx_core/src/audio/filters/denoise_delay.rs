//! Denoise & delay.
//!
//! Wiener-denoises each channel, then mixes a decayed echo of the denoised
//! signal back in. Samples before the delay offset receive no echo
//! contribution (no wraparound). If the echo pushes any sample past unit
//! magnitude the whole buffer is rescaled, preserving relative ratios.

use crate::audio::buffer::SampleBuffer;
use crate::audio::wiener::wiener_denoise;

/// `y[n] = d[n] + decay * d[n - delaySamples]` where `d` is the denoised
/// signal and `delaySamples = round(delay_ms * rate / 1000)`.
pub fn apply(buffer: &SampleBuffer, delay_ms: f32, decay: f32, wiener_size: usize) -> SampleBuffer {
    let delay_samples = (delay_ms * buffer.sample_rate() as f32 / 1000.0).round() as usize;

    let channels = buffer
        .channels()
        .iter()
        .map(|channel| {
            let denoised = wiener_denoise(channel, wiener_size);
            add_echo(&denoised, delay_samples, decay)
        })
        .collect();

    SampleBuffer::new(channels, buffer.sample_rate()).renormalized()
}

fn add_echo(samples: &[f32], delay_samples: usize, decay: f32) -> Vec<f32> {
    let mut out = samples.to_vec();
    if delay_samples == 0 || delay_samples >= samples.len() {
        return out;
    }
    for i in delay_samples..samples.len() {
        out[i] += decay * samples[i - delay_samples];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_decay_leaves_the_denoised_signal() {
        let samples: Vec<f32> = (0..4410).map(|i| (i as f32 * 0.02).sin() * 0.5).collect();
        let buffer = SampleBuffer::new(vec![samples.clone()], 44100);

        let out = apply(&buffer, 500.0, 0.0, 501);
        let denoised = wiener_denoise(&samples, 501);

        // The echo term vanishes; no renormalization can trigger either.
        assert_eq!(out.channel(0), &denoised[..]);
    }

    #[test]
    fn echo_lands_at_the_delay_offset() {
        let rate = 1000u32;
        // Impulse at sample 0; window of 1 makes the denoiser an identity.
        let mut samples = vec![0.0f32; 100];
        samples[0] = 0.8;
        let buffer = SampleBuffer::new(vec![samples], rate);

        // 10ms at 1kHz = 10 samples.
        let out = apply(&buffer, 10.0, 0.5, 1);
        assert!((out.channel(0)[0] - 0.8).abs() < 1e-6);
        assert!((out.channel(0)[10] - 0.4).abs() < 1e-6);
        assert_eq!(out.channel(0)[5], 0.0);
    }

    #[test]
    fn delay_beyond_buffer_adds_nothing() {
        let samples = vec![0.5f32; 50];
        let buffer = SampleBuffer::new(vec![samples], 44100);
        let out = apply(&buffer, 2000.0, 0.9, 1);
        // 2s delay on a ~1ms buffer: echo never lands.
        assert_eq!(out.channel(0), buffer.channel(0));
    }

    #[test]
    fn clipping_output_is_renormalized() {
        let rate = 1000u32;
        let samples = vec![0.9f32; 100];
        let buffer = SampleBuffer::new(vec![samples], rate);

        // Echo stacks 0.9 + 0.9*0.9 = 1.71 past the delay point.
        let out = apply(&buffer, 10.0, 0.9, 1);
        assert!(out.peak() <= 1.0 + 1e-6);
        // Ratio between echoed and un-echoed region is preserved.
        let ratio = out.channel(0)[50] / out.channel(0)[0];
        assert!((ratio - 1.71 / 0.9).abs() < 1e-3);
    }
}
