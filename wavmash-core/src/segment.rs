//! Random segment selection
//!
//! Extracts a fixed-length contiguous window from a buffer at a uniformly
//! random offset. The random source is injected by the caller so runs can be
//! reproduced from a seed; nothing here touches a process-global generator.

use crate::buffer::AudioBuffer;
use rand::Rng;

/// Select a random contiguous window of `segment_length` samples.
///
/// If the buffer holds `segment_length` samples or fewer, the whole buffer is
/// returned unchanged and no random draw is consumed. Otherwise the start
/// offset is drawn uniformly from `[0, len - segment_length]` inclusive,
/// consuming exactly one draw from `rng`.
pub fn select_segment<R: Rng>(
    buffer: &AudioBuffer,
    segment_length: usize,
    rng: &mut R,
) -> AudioBuffer {
    if buffer.len() <= segment_length {
        return buffer.clone();
    }

    let start = rng.gen_range(0..=buffer.len() - segment_length);
    let samples = buffer.samples[start..start + segment_length].to_vec();
    AudioBuffer::new(buffer.sample_rate, samples)
}
