//! wavmash - main entry point
//!
//! Assembles a collage WAV from random segments of a source folder, or
//! scrambles a single file's chunks by the golden-ratio permutation.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wavmash::pipeline;
use wavmash_core::AssembleOptions;

/// Command-line arguments for wavmash
#[derive(Parser, Debug)]
#[command(name = "wavmash")]
#[command(about = "Collage assembler for WAV sample folders")]
#[command(version)]
struct Args {
    /// Log level when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "WAVMASH_LOG")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract a random segment from every WAV in a folder and concatenate
    /// them into one output file
    Assemble {
        /// Folder containing source WAV files
        input_dir: PathBuf,

        /// Output WAV path
        output: PathBuf,

        /// Segment length in samples
        #[arg(long, default_value_t = 48_000, env = "WAVMASH_SEGMENT_LENGTH")]
        segment_length: usize,

        /// Output sample rate; sources at other rates are resampled
        #[arg(long, default_value_t = 48_000, env = "WAVMASH_TARGET_RATE")]
        target_rate: u32,

        /// Peak-normalize each source before segment selection
        #[arg(long)]
        normalize: bool,

        /// Skip source files larger than this many megabytes
        #[arg(long)]
        max_filesize_mb: Option<f64>,

        /// Seed for reproducible segment offsets
        #[arg(long, env = "WAVMASH_SEED")]
        seed: Option<u64>,
    },

    /// Reorder one file's fixed-size chunks by the deterministic
    /// golden-ratio permutation
    Scramble {
        /// Input WAV path
        input: PathBuf,

        /// Output WAV path
        output: PathBuf,

        /// Chunk size in samples
        #[arg(long, default_value_t = 4096)]
        chunk_size: usize,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("wavmash={0},wavmash_core={0}", args.log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Command::Assemble {
            input_dir,
            output,
            segment_length,
            target_rate,
            normalize,
            max_filesize_mb,
            seed,
        } => {
            let max_source_bytes = match max_filesize_mb {
                Some(mb) if mb <= 0.0 => bail!("--max-filesize-mb must be positive"),
                Some(mb) => Some((mb * 1024.0 * 1024.0) as u64),
                None => None,
            };

            let options = AssembleOptions {
                segment_length,
                target_rate,
                normalize,
                max_source_bytes,
            };

            let summary = pipeline::assemble_folder(&input_dir, &output, &options, seed)?;
            println!(
                "Wrote {} samples at {} Hz to {} ({} sources used, {} skipped)",
                summary.output_samples,
                summary.sample_rate,
                output.display(),
                summary.sources_used,
                summary.sources_skipped
            );
        }

        Command::Scramble {
            input,
            output,
            chunk_size,
        } => {
            let summary = pipeline::scramble_file(&input, &output, chunk_size)?;
            println!(
                "Wrote {} samples at {} Hz to {} ({} chunks scrambled)",
                summary.output_samples,
                summary.sample_rate,
                output.display(),
                summary.num_chunks
            );
        }
    }

    Ok(())
}
