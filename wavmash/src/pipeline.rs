//! Pipeline orchestration
//!
//! Ties the collaborators together: scan a folder, wrap each hit as a
//! [`Source`] that decodes on demand, run the core assembler, quantize, and
//! write the result. Output is written only after the pipeline has fully
//! succeeded, so a fatal failure never leaves a partial file behind.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use wavmash_core::{assemble, quantize, scramble, AssembleOptions, AudioBuffer, Source};

use crate::codec;
use crate::scanner::WavScanner;

/// A scanned WAV file, decoded lazily when the assembler asks for it.
pub struct FileSource {
    path: PathBuf,
    label: String,
    size: Option<u64>,
}

impl FileSource {
    fn new(scanner: &WavScanner, path: PathBuf) -> Self {
        let size = match scanner.file_size(&path) {
            Ok(size) => Some(size),
            Err(e) => {
                warn!("Could not stat {}: {}", path.display(), e);
                None
            }
        };
        let label = path.display().to_string();
        Self { path, label, size }
    }
}

impl Source for FileSource {
    fn label(&self) -> &str {
        &self.label
    }

    fn size_bytes(&self) -> Option<u64> {
        self.size
    }

    fn load(&self) -> wavmash_core::Result<AudioBuffer> {
        codec::decode_file(&self.path)
    }
}

/// Outcome of a folder assembly, for the CLI summary line.
#[derive(Debug)]
pub struct AssembleSummary {
    pub output_samples: usize,
    pub sample_rate: u32,
    pub sources_used: usize,
    pub sources_skipped: usize,
}

/// Assemble random segments from every WAV under `input_dir` into `output`.
///
/// `seed` makes the segment offsets reproducible; without it the generator
/// is seeded from OS entropy.
pub fn assemble_folder(
    input_dir: &Path,
    output: &Path,
    options: &AssembleOptions,
    seed: Option<u64>,
) -> Result<AssembleSummary> {
    // Configuration errors surface before any file-system work.
    options.validate()?;

    let scanner = WavScanner::new();
    let files = scanner
        .scan(input_dir)
        .with_context(|| format!("failed to scan {}", input_dir.display()))?;
    info!("Found {} WAV files in {}", files.len(), input_dir.display());

    let sources: Vec<FileSource> = files
        .into_iter()
        .map(|path| FileSource::new(&scanner, path))
        .collect();

    let mut rng = make_rng(seed);
    let assembly = assemble(&sources, options, &mut rng)?;

    let quantized = quantize::quantize(&assembly.buffer);
    codec::write_wav(output, assembly.buffer.sample_rate, &quantized)?;

    Ok(AssembleSummary {
        output_samples: quantized.len(),
        sample_rate: assembly.buffer.sample_rate,
        sources_used: sources.len() - assembly.skipped.len(),
        sources_skipped: assembly.skipped.len(),
    })
}

/// Outcome of a single-file scramble, for the CLI summary line.
#[derive(Debug)]
pub struct ScrambleSummary {
    pub output_samples: usize,
    pub sample_rate: u32,
    pub num_chunks: usize,
}

/// Scramble one file's chunks by the golden-ratio permutation.
///
/// The file keeps its native sample rate; no normalization is applied.
pub fn scramble_file(input: &Path, output: &Path, chunk_size: usize) -> Result<ScrambleSummary> {
    let decoded = codec::decode_file(input)?;
    let scrambled = scramble::scramble(&decoded, chunk_size)?;

    let quantized = quantize::quantize(&scrambled);
    codec::write_wav(output, scrambled.sample_rate, &quantized)?;

    Ok(ScrambleSummary {
        output_samples: quantized.len(),
        sample_rate: scrambled.sample_rate,
        num_chunks: decoded.len() / chunk_size,
    })
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => {
            info!("Seeding segment selection with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
