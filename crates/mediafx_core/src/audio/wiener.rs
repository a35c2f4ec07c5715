//! Sliding-window Wiener denoising.
//!
//! Local mean and variance are measured over a centered window (zero-padded
//! at the edges); the noise power is estimated as the mean of the local
//! variances. Where the local variance falls below the noise estimate the
//! output collapses to the local mean, elsewhere the sample is shrunk toward
//! it proportionally to the local signal-to-noise ratio.

/// Denoise one channel with a centered window of `window_size` samples.
///
/// `window_size` is expected to be odd; an even size is treated as the next
/// odd size up. Accumulation runs in f64 so long buffers do not lose
/// precision.
pub fn wiener_denoise(samples: &[f32], window_size: usize) -> Vec<f32> {
    let n = samples.len();
    if n == 0 || window_size <= 1 {
        return samples.to_vec();
    }
    let window = if window_size % 2 == 0 {
        window_size + 1
    } else {
        window_size
    };
    let half = window / 2;

    // Prefix sums of x and x^2 for O(1) window statistics.
    let mut sum = vec![0.0f64; n + 1];
    let mut sum_sq = vec![0.0f64; n + 1];
    for (i, &s) in samples.iter().enumerate() {
        let s = s as f64;
        sum[i + 1] = sum[i] + s;
        sum_sq[i + 1] = sum_sq[i] + s * s;
    }

    let window_len = window as f64;
    let mut local_mean = vec![0.0f64; n];
    let mut local_var = vec![0.0f64; n];
    let mut noise = 0.0f64;

    for i in 0..n {
        let lo = i.saturating_sub(half);
        let hi = (i + half + 1).min(n);
        // Samples outside the signal count as zeros: divide by the full
        // window length, not the clipped span.
        let mean = (sum[hi] - sum[lo]) / window_len;
        let mean_sq = (sum_sq[hi] - sum_sq[lo]) / window_len;
        let var = (mean_sq - mean * mean).max(0.0);

        local_mean[i] = mean;
        local_var[i] = var;
        noise += var;
    }
    noise /= n as f64;

    samples
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let mean = local_mean[i];
            let var = local_var[i];
            if var <= noise {
                mean as f32
            } else {
                (mean + (s as f64 - mean) * (1.0 - noise / var)) as f32
            }
        })
        .collect()
}
