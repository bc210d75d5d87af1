//! 16-bit quantization
//!
//! Converts the pipeline's f32 samples (nominally in [-1.0, 1.0]) to the
//! signed 16-bit output representation. Out-of-range values clip to the
//! integer limits; there is no wrap-around.

use crate::buffer::AudioBuffer;

/// Full-scale factor for 16-bit output.
const I16_FULL_SCALE: f32 = 32767.0;

/// Quantize a buffer to signed 16-bit samples.
///
/// Each sample is scaled by 32767, clipped to `[-32768, 32767]`, and
/// truncated toward zero.
pub fn quantize(buffer: &AudioBuffer) -> Vec<i16> {
    buffer
        .samples
        .iter()
        .map(|&s| (s * I16_FULL_SCALE).clamp(i16::MIN as f32, i16::MAX as f32) as i16)
        .collect()
}
