//! Test fixture generation
//!
//! Generates small deterministic WAV files with known characteristics so the
//! pipeline tests can assert on sample counts, rates, and content.

use hound::{WavSpec, WavWriter};
use std::f32::consts::PI;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generate a mono sine wave WAV file.
pub fn generate_sine_wav(
    path: &Path,
    sample_rate: u32,
    duration_ms: u64,
    frequency_hz: f32,
    amplitude: f32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let total_frames = (sample_rate as u64 * duration_ms) / 1000;
    let amplitude_i16 = (amplitude * i16::MAX as f32) as i16;

    for frame_idx in 0..total_frames {
        let t = frame_idx as f32 / sample_rate as f32;
        let sample_value = (2.0 * PI * frequency_hz * t).sin();
        writer.write_sample((sample_value * amplitude_i16 as f32) as i16)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Generate a stereo WAV file with constant left/right values.
pub fn generate_constant_stereo_wav(
    path: &Path,
    sample_rate: u32,
    frames: u64,
    left: f32,
    right: f32,
) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    let left_i16 = (left * i16::MAX as f32) as i16;
    let right_i16 = (right * i16::MAX as f32) as i16;

    for _ in 0..frames {
        writer.write_sample(left_i16)?;
        writer.write_sample(right_i16)?;
    }

    writer.finalize()?;
    Ok(())
}

/// Write a file that passes the scanner's RIFF/WAVE magic check but cannot
/// be decoded.
pub fn generate_corrupt_wav(path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(b"RIFF\xff\xff\xff\xffWAVE")?;
    file.write_all(&[0xde, 0xad, 0xbe, 0xef].repeat(64))?;
    Ok(())
}

/// Read back a mono 16-bit WAV as (sample_rate, samples).
pub fn read_wav(path: &Path) -> (u32, Vec<i16>) {
    let mut reader = hound::WavReader::open(path).expect("open output wav");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1, "pipeline output must be mono");
    assert_eq!(spec.bits_per_sample, 16);
    let samples = reader
        .samples::<i16>()
        .map(|s| s.expect("read sample"))
        .collect();
    (spec.sample_rate, samples)
}
