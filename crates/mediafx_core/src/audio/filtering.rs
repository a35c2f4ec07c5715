//! Zero-phase Butterworth filtering.
//!
//! All band-shaping in the filter set uses the same family: IIR Butterworth
//! sections from the `biquad` crate, applied forward and then backward over
//! the whole buffer so the output carries no phase lag. Higher orders are
//! cascaded second-order sections; a 4th-order filter is two sections.

use biquad::{Biquad, Coefficients, DirectForm2Transposed, Type, Q_BUTTERWORTH_F32};

use super::filters::FilterError;

/// Apply a zero-phase Butterworth low-pass filter.
pub fn lowpass_zero_phase(
    samples: &[f32],
    sample_rate: u32,
    cutoff_hz: f32,
    order: usize,
) -> Result<Vec<f32>, FilterError> {
    let coeffs = design(Type::LowPass, sample_rate, cutoff_hz)?;
    Ok(filtfilt(samples, &coeffs, sections_for(order)))
}

/// Apply a zero-phase Butterworth high-pass filter.
pub fn highpass_zero_phase(
    samples: &[f32],
    sample_rate: u32,
    cutoff_hz: f32,
    order: usize,
) -> Result<Vec<f32>, FilterError> {
    let coeffs = design(Type::HighPass, sample_rate, cutoff_hz)?;
    Ok(filtfilt(samples, &coeffs, sections_for(order)))
}

/// Apply a zero-phase Butterworth band-pass filter.
///
/// Implemented as a high-pass at `low_hz` followed by a low-pass at
/// `high_hz`, each taking half the order.
pub fn bandpass_zero_phase(
    samples: &[f32],
    sample_rate: u32,
    low_hz: f32,
    high_hz: f32,
    order: usize,
) -> Result<Vec<f32>, FilterError> {
    if low_hz >= high_hz {
        return Err(FilterError::Design(format!(
            "band-pass cutoffs out of order: {} >= {}",
            low_hz, high_hz
        )));
    }
    let half_order = (order + 1) / 2;
    let high_passed = highpass_zero_phase(samples, sample_rate, low_hz, half_order)?;
    lowpass_zero_phase(&high_passed, sample_rate, high_hz, half_order)
}

fn design(
    filter_type: Type<f32>,
    sample_rate: u32,
    cutoff_hz: f32,
) -> Result<Coefficients<f32>, FilterError> {
    let nyquist = sample_rate as f32 / 2.0;
    if cutoff_hz <= 0.0 || cutoff_hz >= nyquist {
        return Err(FilterError::Design(format!(
            "cutoff {} Hz outside (0, {}) for sample rate {}",
            cutoff_hz, nyquist, sample_rate
        )));
    }

    // Normalized corner is cutoff/nyquist, so the -3 dB point lands at the
    // requested frequency.
    Coefficients::<f32>::from_normalized_params(
        filter_type,
        2.0 * cutoff_hz / sample_rate as f32,
        Q_BUTTERWORTH_F32,
    )
    .map_err(|e| FilterError::Design(format!("{:?}", e)))
}

/// A biquad is 2nd order, so order/2 sections (minimum 1).
fn sections_for(order: usize) -> usize {
    ((order + 1) / 2).max(1)
}

/// Forward-backward application of cascaded sections (zero phase-lag).
fn filtfilt(samples: &[f32], coeffs: &Coefficients<f32>, sections: usize) -> Vec<f32> {
    let mut out = samples.to_vec();
    run_cascade(&mut out, coeffs, sections);
    out.reverse();
    run_cascade(&mut out, coeffs, sections);
    out.reverse();
    out
}

fn run_cascade(samples: &mut [f32], coeffs: &Coefficients<f32>, sections: usize) {
    for _ in 0..sections {
        // Fresh state per section.
        let mut filter = DirectForm2Transposed::<f32>::new(*coeffs);
        for sample in samples.iter_mut() {
            *sample = filter.run(*sample);
        }
    }
}
