//! Multi-source assembly pipeline
//!
//! Runs each source through resample, optional normalize, and random segment
//! selection, then concatenates the segments in source order into one output
//! buffer at the target rate. Per-source failures are skipped and reported;
//! only an empty result is fatal.

use crate::buffer::AudioBuffer;
use crate::error::{Error, Result};
use crate::normalize::normalize;
use crate::resample::resample;
use crate::segment::select_segment;
use rand::Rng;
use tracing::{debug, info, warn};

/// A raw-buffer provider: one source recording the assembler can pull from.
///
/// The binary implements this for scanned files (decode on demand); tests
/// implement it in memory. `load` failures are recoverable: the assembler
/// skips the source and keeps going.
pub trait Source {
    /// Human-readable identifier used in logs and skip diagnostics.
    fn label(&self) -> &str;

    /// Size of the underlying source in bytes, when known.
    fn size_bytes(&self) -> Option<u64>;

    /// Decode the source into a mono buffer at its native rate.
    fn load(&self) -> Result<AudioBuffer>;
}

/// Assembly parameters.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Samples to extract from each source
    pub segment_length: usize,

    /// Output sample rate; sources at other rates are resampled
    pub target_rate: u32,

    /// Peak-normalize each source before segment selection
    pub normalize: bool,

    /// Skip sources larger than this many bytes
    pub max_source_bytes: Option<u64>,
}

impl AssembleOptions {
    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.segment_length == 0 {
            return Err(Error::InvalidConfig(
                "segment length must be greater than zero".to_string(),
            ));
        }
        if self.target_rate == 0 {
            return Err(Error::InvalidConfig(
                "target rate must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// A source that did not contribute to the output, and why.
#[derive(Debug, Clone)]
pub struct SkippedSource {
    pub source: String,
    pub reason: String,
}

/// Result of an assembly run: the output buffer plus skip diagnostics.
#[derive(Debug)]
pub struct Assembly {
    pub buffer: AudioBuffer,
    pub skipped: Vec<SkippedSource>,
}

/// Assemble one output buffer from segments of many sources.
///
/// Sources are processed strictly in input order; that order determines the
/// concatenation order of the extracted segments. For each source: apply the
/// size filter, decode, resample to `target_rate` if needed, optionally
/// normalize, then select one random segment. Sources that fail the filter
/// or the decode are skipped with a warning and reported in the result.
///
/// Fails with [`Error::NoValidInput`] when no source survives, and with
/// [`Error::InvalidConfig`] before any work when the options are invalid.
pub fn assemble<S: Source, R: Rng>(
    sources: &[S],
    options: &AssembleOptions,
    rng: &mut R,
) -> Result<Assembly> {
    options.validate()?;

    let mut segments: Vec<AudioBuffer> = Vec::new();
    let mut skipped: Vec<SkippedSource> = Vec::new();

    for source in sources {
        if let Some(limit) = options.max_source_bytes {
            if let Some(size) = source.size_bytes() {
                if size > limit {
                    warn!(
                        "Skipping {}: {} bytes exceeds limit of {}",
                        source.label(),
                        size,
                        limit
                    );
                    skipped.push(SkippedSource {
                        source: source.label().to_string(),
                        reason: format!("size {} bytes exceeds limit of {}", size, limit),
                    });
                    continue;
                }
            }
        }

        let decoded = match source.load() {
            Ok(buffer) => buffer,
            Err(e) => {
                warn!("Skipping {}: {}", source.label(), e);
                skipped.push(SkippedSource {
                    source: source.label().to_string(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        let resampled = if decoded.sample_rate != options.target_rate {
            resample(&decoded, options.target_rate)?
        } else {
            decoded
        };

        let leveled = if options.normalize {
            normalize(&resampled)
        } else {
            resampled
        };

        let segment = select_segment(&leveled, options.segment_length, rng);
        debug!(
            "Extracted {} samples from {}",
            segment.len(),
            source.label()
        );
        segments.push(segment);
    }

    if segments.is_empty() {
        return Err(Error::NoValidInput);
    }

    let buffer = concat(&segments, options.target_rate)?;
    info!(
        "Assembled {} samples at {}Hz from {} sources ({} skipped)",
        buffer.len(),
        buffer.sample_rate,
        segments.len(),
        skipped.len()
    );

    Ok(Assembly { buffer, skipped })
}

/// Concatenate segments in order, enforcing the shared-rate invariant.
///
/// Every segment must already be at `target_rate`; a mismatch here means a
/// stage upstream failed to resample.
fn concat(segments: &[AudioBuffer], target_rate: u32) -> Result<AudioBuffer> {
    let total: usize = segments.iter().map(|s| s.len()).sum();
    let mut samples = Vec::with_capacity(total);

    for segment in segments {
        if segment.sample_rate != target_rate {
            return Err(Error::SampleRateMismatch {
                expected: target_rate,
                found: segment.sample_rate,
            });
        }
        samples.extend_from_slice(&segment.samples);
    }

    Ok(AudioBuffer::new(target_rate, samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::PI;

    /// In-memory source for exercising the assembler without files.
    struct MemorySource {
        label: String,
        size: Option<u64>,
        result: Result<AudioBuffer>,
    }

    impl MemorySource {
        fn ok(label: &str, buffer: AudioBuffer) -> Self {
            Self {
                label: label.to_string(),
                size: Some(buffer.len() as u64 * 4),
                result: Ok(buffer),
            }
        }

        fn failing(label: &str) -> Self {
            Self {
                label: label.to_string(),
                size: Some(64),
                result: Err(Error::Decode("synthetic decode failure".to_string())),
            }
        }
    }

    impl Source for MemorySource {
        fn label(&self) -> &str {
            &self.label
        }

        fn size_bytes(&self) -> Option<u64> {
            self.size
        }

        fn load(&self) -> Result<AudioBuffer> {
            match &self.result {
                Ok(buffer) => Ok(buffer.clone()),
                Err(_) => Err(Error::Decode("synthetic decode failure".to_string())),
            }
        }
    }

    fn sine_buffer(rate: u32, frequency_hz: f32, duration_secs: f32) -> AudioBuffer {
        let total = (rate as f32 * duration_secs) as usize;
        let samples = (0..total)
            .map(|i| {
                let t = i as f32 / rate as f32;
                (2.0 * PI * frequency_hz * t).sin() * 0.5
            })
            .collect();
        AudioBuffer::new(rate, samples)
    }

    fn options(segment_length: usize, target_rate: u32) -> AssembleOptions {
        AssembleOptions {
            segment_length,
            target_rate,
            normalize: false,
            max_source_bytes: None,
        }
    }

    #[test]
    fn test_mixed_rates_produce_uniform_output() {
        let sources = vec![
            MemorySource::ok("a.wav", sine_buffer(22050, 220.0, 0.4)),
            MemorySource::ok("b.wav", sine_buffer(44100, 440.0, 0.4)),
        ];
        let mut rng = StdRng::seed_from_u64(9);

        let assembly = assemble(&sources, &options(2000, 44100), &mut rng).unwrap();

        assert_eq!(assembly.buffer.sample_rate, 44100);
        assert_eq!(assembly.buffer.len(), 4000);
        assert!(assembly.skipped.is_empty());
    }

    #[test]
    fn test_segments_concatenate_in_source_order() {
        let first = AudioBuffer::new(44100, vec![1.0; 8]);
        let second = AudioBuffer::new(44100, vec![-1.0; 8]);
        let sources = vec![
            MemorySource::ok("first.wav", first),
            MemorySource::ok("second.wav", second),
        ];
        let mut rng = StdRng::seed_from_u64(0);

        let assembly = assemble(&sources, &options(8, 44100), &mut rng).unwrap();

        assert_eq!(assembly.buffer.samples[..8], [1.0; 8]);
        assert_eq!(assembly.buffer.samples[8..], [-1.0; 8]);
    }

    #[test]
    fn test_short_source_contributes_whole_buffer() {
        let sources = vec![MemorySource::ok(
            "short.wav",
            AudioBuffer::new(44100, vec![0.5; 100]),
        )];
        let mut rng = StdRng::seed_from_u64(1);

        let assembly = assemble(&sources, &options(48000, 44100), &mut rng).unwrap();
        assert_eq!(assembly.buffer.len(), 100);
    }

    #[test]
    fn test_decode_failure_skipped_not_fatal() {
        let sources = vec![
            MemorySource::failing("broken.wav"),
            MemorySource::ok("good.wav", sine_buffer(44100, 440.0, 0.2)),
        ];
        let mut rng = StdRng::seed_from_u64(2);

        let assembly = assemble(&sources, &options(1000, 44100), &mut rng).unwrap();

        assert_eq!(assembly.buffer.len(), 1000);
        assert_eq!(assembly.skipped.len(), 1);
        assert_eq!(assembly.skipped[0].source, "broken.wav");
    }

    #[test]
    fn test_all_sources_failing_is_no_valid_input() {
        let sources = vec![
            MemorySource::failing("a.wav"),
            MemorySource::failing("b.wav"),
        ];
        let mut rng = StdRng::seed_from_u64(3);

        let result = assemble(&sources, &options(1000, 44100), &mut rng);
        assert!(matches!(result, Err(Error::NoValidInput)));
    }

    #[test]
    fn test_empty_source_list_is_no_valid_input() {
        let sources: Vec<MemorySource> = Vec::new();
        let mut rng = StdRng::seed_from_u64(4);

        let result = assemble(&sources, &options(1000, 44100), &mut rng);
        assert!(matches!(result, Err(Error::NoValidInput)));
    }

    #[test]
    fn test_size_filter_skips_large_sources() {
        let mut large = MemorySource::ok("large.wav", sine_buffer(44100, 440.0, 0.2));
        large.size = Some(10_000_000);
        let sources = vec![
            large,
            MemorySource::ok("small.wav", sine_buffer(44100, 330.0, 0.2)),
        ];
        let mut rng = StdRng::seed_from_u64(5);

        let mut opts = options(1000, 44100);
        opts.max_source_bytes = Some(1_000_000);

        let assembly = assemble(&sources, &opts, &mut rng).unwrap();
        assert_eq!(assembly.buffer.len(), 1000);
        assert_eq!(assembly.skipped.len(), 1);
        assert_eq!(assembly.skipped[0].source, "large.wav");
    }

    #[test]
    fn test_normalize_flag_applies_before_selection() {
        let quiet = AudioBuffer::new(44100, vec![0.25; 64]);
        let sources = vec![MemorySource::ok("quiet.wav", quiet)];
        let mut rng = StdRng::seed_from_u64(6);

        let mut opts = options(64, 44100);
        opts.normalize = true;

        let assembly = assemble(&sources, &opts, &mut rng).unwrap();
        assert!(assembly.buffer.samples.iter().all(|&s| s == 1.0));
    }

    #[test]
    fn test_zero_segment_length_rejected() {
        let sources = vec![MemorySource::ok(
            "a.wav",
            AudioBuffer::new(44100, vec![0.1; 16]),
        )];
        let mut rng = StdRng::seed_from_u64(7);

        let result = assemble(&sources, &options(0, 44100), &mut rng);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_zero_target_rate_rejected() {
        let sources = vec![MemorySource::ok(
            "a.wav",
            AudioBuffer::new(44100, vec![0.1; 16]),
        )];
        let mut rng = StdRng::seed_from_u64(8);

        let result = assemble(&sources, &options(100, 0), &mut rng);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_reproduces_assembly() {
        let make_sources = || {
            vec![
                MemorySource::ok("a.wav", sine_buffer(44100, 220.0, 0.5)),
                MemorySource::ok("b.wav", sine_buffer(44100, 440.0, 0.5)),
            ]
        };

        let mut rng_a = StdRng::seed_from_u64(1234);
        let mut rng_b = StdRng::seed_from_u64(1234);

        let a = assemble(&make_sources(), &options(4000, 44100), &mut rng_a).unwrap();
        let b = assemble(&make_sources(), &options(4000, 44100), &mut rng_b).unwrap();
        assert_eq!(a.buffer, b.buffer);
    }
}
