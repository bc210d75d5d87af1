//! In-memory audio representation
//!
//! Everything downstream of the codec operates on [`AudioBuffer`]: a mono
//! f32 sample sequence with an associated sample rate. Channel shape is
//! resolved exactly once, at the codec boundary, through [`RawSamples`].

/// Mono audio buffer with an associated sample rate.
///
/// Samples are stored in temporal order. Transforms take a reference and
/// return a new owned buffer; the input is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Samples per second
    pub sample_rate: u32,

    /// Mono f32 samples in temporal order
    pub samples: Vec<f32>,
}

impl AudioBuffer {
    /// Create a buffer from mono samples.
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Create a buffer from decoded raw samples, folding to mono.
    pub fn from_raw(sample_rate: u32, raw: RawSamples) -> Self {
        Self {
            sample_rate,
            samples: raw.into_mono(),
        }
    }

    /// Number of samples in the buffer.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Buffer duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Channel shape of decoded audio, before the pipeline sees it.
///
/// The codec produces one of these variants; [`RawSamples::into_mono`] is
/// the single fold-to-mono point in the system. Sources with more than two
/// channels are averaged down by the codec before construction.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSamples {
    /// Single channel, used as-is
    Mono(Vec<f32>),

    /// Stereo frames as (left, right) pairs, averaged to mono
    Stereo(Vec<(f32, f32)>),
}

impl RawSamples {
    /// Fold to a mono sample sequence. Stereo frames are averaged.
    pub fn into_mono(self) -> Vec<f32> {
        match self {
            RawSamples::Mono(samples) => samples,
            RawSamples::Stereo(frames) => frames
                .into_iter()
                .map(|(left, right)| (left + right) * 0.5)
                .collect(),
        }
    }

    /// Number of frames regardless of channel shape.
    pub fn frames(&self) -> usize {
        match self {
            RawSamples::Mono(samples) => samples.len(),
            RawSamples::Stereo(frames) => frames.len(),
        }
    }
}
