//! Peak normalization
//!
//! Scales a buffer so its largest magnitude sample sits at 1.0, leaving the
//! result contained in [-1.0, 1.0]. Silence passes through untouched.

use crate::buffer::AudioBuffer;

/// Peak-normalize a buffer.
///
/// If the peak magnitude is zero (silence or an empty buffer), the input is
/// returned unchanged rather than dividing by zero. Pure and deterministic;
/// applying it twice is the same as applying it once.
pub fn normalize(buffer: &AudioBuffer) -> AudioBuffer {
    let peak = buffer
        .samples
        .iter()
        .fold(0.0f32, |max, &s| max.max(s.abs()));

    if peak == 0.0 {
        return buffer.clone();
    }

    let samples = buffer.samples.iter().map(|&s| s / peak).collect();
    AudioBuffer::new(buffer.sample_rate, samples)
}
