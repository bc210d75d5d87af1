//! Sample-rate conversion using rubato
//!
//! Converts a mono buffer to an arbitrary target rate through a windowed-sinc
//! polyphase resampler. The conversion is rational: for original rate `o` and
//! target rate `t`, the buffer is effectively upsampled by `t / gcd(o, t)` and
//! decimated by `o / gcd(o, t)` behind a single anti-aliasing filter.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use rubato::{
    Resampler as RubatoResampler, SincFixedIn, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};
use tracing::debug;

/// Resample a buffer to `target_rate`.
///
/// If the buffer is already at `target_rate`, a copy is returned unchanged.
/// An empty buffer resamples to an empty buffer at the target rate.
///
/// Output length is approximately `len * up / down` for the reduced rational
/// ratio; the sinc filter's startup transient can shift it by a few frames.
pub fn resample(buffer: &AudioBuffer, target_rate: u32) -> Result<AudioBuffer> {
    if buffer.sample_rate == target_rate {
        debug!("Sample rate already at {}Hz, skipping resample", target_rate);
        return Ok(buffer.clone());
    }

    if buffer.is_empty() {
        return Ok(AudioBuffer::new(target_rate, Vec::new()));
    }

    let g = gcd(buffer.sample_rate, target_rate);
    debug!(
        "Resampling {} samples from {}Hz to {}Hz (ratio {}/{})",
        buffer.len(),
        buffer.sample_rate,
        target_rate,
        target_rate / g,
        buffer.sample_rate / g,
    );

    let mut resampler = create_resampler(buffer.sample_rate, target_rate, buffer.len())?;

    // Whole-buffer conversion: one planar channel, one process call.
    let mut output = resampler
        .process(std::slice::from_ref(&buffer.samples), None)
        .map_err(|e| Error::Resample(format!("Resampling failed: {}", e)))?;

    let samples = output.pop().unwrap_or_default();

    debug!(
        "Resampled {} input samples to {} output samples",
        buffer.len(),
        samples.len()
    );

    Ok(AudioBuffer::new(target_rate, samples))
}

/// Create a windowed-sinc resampler sized to process the whole buffer in one
/// call.
///
/// The sinc filter suppresses the aliasing that plain decimation would
/// introduce when downsampling.
fn create_resampler(input_rate: u32, output_rate: u32, chunk_size: usize) -> Result<SincFixedIn<f32>> {
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let resampler = SincFixedIn::<f32>::new(
        output_rate as f64 / input_rate as f64,
        1.0, // max_relative_ratio (no runtime changes)
        params,
        chunk_size,
        1, // mono
    )
    .map_err(|e| Error::Resample(format!("Failed to create resampler: {}", e)))?;

    Ok(resampler)
}

/// Greatest common divisor, for reporting the reduced resampling ratio.
fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
