//! In-memory sample buffer.
//!
//! Samples are stored planar (one `Vec<f32>` per channel) and normalized to
//! [-1.0, 1.0] when the buffer is created from extracted PCM. Every filter
//! accepts and returns a buffer of identical channel count and length, so
//! normalization happens exactly once at entry.

/// Scale factor between 16-bit PCM and normalized float samples.
const I16_SCALE: f32 = 32767.0;

/// A fixed-length sequence of float samples per channel, plus the rate they
/// were sampled at. The rate is set at extraction and never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from planar channel data.
    ///
    /// All channels must have equal length; callers construct these from
    /// interleaved PCM via [`SampleBuffer::from_interleaved_i16`] or from
    /// filter output.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        debug_assert!(!channels.is_empty());
        debug_assert!(channels.windows(2).all(|w| w[0].len() == w[1].len()));
        Self {
            channels,
            sample_rate,
        }
    }

    /// Deinterleave 16-bit PCM into normalized planar float channels.
    pub fn from_interleaved_i16(samples: &[i16], channel_count: usize, sample_rate: u32) -> Self {
        let channel_count = channel_count.max(1);
        let frames = samples.len() / channel_count;
        let mut channels = vec![Vec::with_capacity(frames); channel_count];

        for frame in samples.chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample as f32 / I16_SCALE);
            }
        }

        Self {
            channels,
            sample_rate,
        }
    }

    /// Interleave back to 16-bit PCM for serialization.
    ///
    /// Non-finite samples are replaced with silence and everything is clipped
    /// to [-1, 1] before conversion.
    pub fn to_interleaved_i16(&self) -> Vec<i16> {
        let frames = self.len();
        let mut out = Vec::with_capacity(frames * self.channels.len());

        for i in 0..frames {
            for channel in &self.channels {
                let sample = channel[i];
                let sample = if sample.is_finite() { sample } else { 0.0 };
                out.push((sample.clamp(-1.0, 1.0) * I16_SCALE) as i16);
            }
        }

        out
    }

    /// Number of channels (1 = mono, 2 = stereo).
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    pub fn channels(&self) -> &[Vec<f32>] {
        &self.channels
    }

    /// Largest sample magnitude across all channels.
    pub fn peak(&self) -> f32 {
        self.channels
            .iter()
            .flatten()
            .fold(0.0f32, |peak, &s| peak.max(s.abs()))
    }

    /// Scale the whole buffer by `1/peak` if any sample exceeds unit
    /// magnitude, preserving relative sample ratios.
    pub fn renormalized(mut self) -> Self {
        let peak = self.peak();
        if peak > 1.0 {
            let scale = 1.0 / peak;
            for channel in &mut self.channels {
                for sample in channel.iter_mut() {
                    *sample *= scale;
                }
            }
        }
        self
    }

    /// Per-frame average of all channels.
    pub fn downmix_mono(&self) -> Vec<f32> {
        let frames = self.len();
        let channel_count = self.channels.len() as f32;
        let mut mono = Vec::with_capacity(frames);
        for i in 0..frames {
            let sum: f32 = self.channels.iter().map(|c| c[i]).sum();
            mono.push(sum / channel_count);
        }
        mono
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interleaved_round_trip_preserves_layout() {
        // L R L R L R
        let pcm: Vec<i16> = vec![100, -100, 200, -200, 300, -300];
        let buffer = SampleBuffer::from_interleaved_i16(&pcm, 2, 44100);

        assert_eq!(buffer.channel_count(), 2);
        assert_eq!(buffer.len(), 3);
        assert!(buffer.channel(0).iter().all(|&s| s > 0.0));
        assert!(buffer.channel(1).iter().all(|&s| s < 0.0));

        let back = buffer.to_interleaved_i16();
        assert_eq!(back, pcm);
    }

    #[test]
    fn serialization_clips_and_scrubs_non_finite() {
        let buffer = SampleBuffer::new(
            vec![vec![2.0, -3.0, f32::NAN, f32::INFINITY, 0.5]],
            44100,
        );
        let pcm = buffer.to_interleaved_i16();
        assert_eq!(pcm[0], 32767);
        assert_eq!(pcm[1], -32767);
        assert_eq!(pcm[2], 0);
        assert_eq!(pcm[3], 0);
        assert_eq!(pcm[4], (0.5 * 32767.0) as i16);
    }

    #[test]
    fn renormalize_only_acts_on_clipping() {
        let quiet = SampleBuffer::new(vec![vec![0.5, -0.25]], 44100);
        assert_eq!(quiet.clone().renormalized(), quiet);

        let loud = SampleBuffer::new(vec![vec![2.0, -1.0, 0.5]], 44100);
        let normalized = loud.renormalized();
        assert!((normalized.peak() - 1.0).abs() < 1e-6);
        // Relative ratios preserved.
        assert!((normalized.channel(0)[1] / normalized.channel(0)[0] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn downmix_averages_channels() {
        let buffer = SampleBuffer::new(vec![vec![1.0, 0.0], vec![0.0, 1.0]], 44100);
        assert_eq!(buffer.downmix_mono(), vec![0.5, 0.5]);
    }

    #[test]
    fn duration_follows_sample_rate() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 44100]], 44100);
        assert!((buffer.duration_secs() - 1.0).abs() < 1e-9);
    }
}
