//! Golden-ratio chunk scrambling
//!
//! Partitions a buffer into fixed-size chunks and reorders them by a
//! deterministic quasi-random key derived from the golden ratio. Because ϕ is
//! irrational, successive values of `i·ϕ mod 1` are maximally equidistributed
//! (three-distance theorem), so the resulting permutation has no short-range
//! periodicity that would be audible as a rhythmic artifact. Unlike segment
//! selection this involves no randomness: the same buffer, chunk size, and
//! ratio always produce byte-identical output.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use std::f64::consts::PI;

/// The golden ratio, (1 + √5) / 2.
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Scramble a buffer's chunks using the golden ratio as ordering constant.
pub fn scramble(buffer: &AudioBuffer, chunk_size: usize) -> Result<AudioBuffer> {
    scramble_with_ratio(buffer, chunk_size, GOLDEN_RATIO)
}

/// Scramble a buffer's chunks with an explicit ordering ratio.
///
/// The first `num_chunks * chunk_size` samples are split into equal chunks
/// and reordered by the stable ascending sort of `key(i) = cos(i·π·ratio)`;
/// keys that compare equal keep their original chunk order. Trailing samples
/// that do not fill a whole chunk are appended unchanged at the end.
///
/// A buffer shorter than one chunk is returned unchanged. A `chunk_size` of
/// zero is a configuration error.
pub fn scramble_with_ratio(
    buffer: &AudioBuffer,
    chunk_size: usize,
    ratio: f64,
) -> Result<AudioBuffer> {
    if chunk_size == 0 {
        return Err(Error::InvalidConfig(
            "chunk size must be greater than zero".to_string(),
        ));
    }

    let num_chunks = buffer.len() / chunk_size;
    if num_chunks == 0 {
        return Ok(buffer.clone());
    }

    let permutation = chunk_permutation(num_chunks, ratio);

    let mut samples = Vec::with_capacity(buffer.len());
    for &chunk in &permutation {
        let start = chunk * chunk_size;
        samples.extend_from_slice(&buffer.samples[start..start + chunk_size]);
    }

    // Unscrambled remainder, if the buffer is not a whole number of chunks.
    samples.extend_from_slice(&buffer.samples[num_chunks * chunk_size..]);

    Ok(AudioBuffer::new(buffer.sample_rate, samples))
}

/// Chunk indices in output order: the stable ascending sort of
/// `cos(i·π·ratio)`, ties broken by original index.
fn chunk_permutation(num_chunks: usize, ratio: f64) -> Vec<usize> {
    let keys: Vec<f64> = (0..num_chunks)
        .map(|i| (i as f64 * PI * ratio).cos())
        .collect();

    let mut order: Vec<usize> = (0..num_chunks).collect();
    // Vec::sort_by is stable and total_cmp is a total order, so equal keys
    // keep ascending index order.
    order.sort_by(|&a, &b| keys[a].total_cmp(&keys[b]));
    order
}
