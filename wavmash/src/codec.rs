//! WAV decode and encode
//!
//! Decoding goes through symphonia: probe with an extension hint, pick the
//! default track, then pull packets and convert each decoded buffer to
//! interleaved f32 through a [`SampleBuffer`]. Channel shape is folded to
//! mono exactly once, at the end, through [`RawSamples`]. Encoding is 16-bit
//! mono PCM via hound.

use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::{debug, warn};

use wavmash_core::{AudioBuffer, Error, RawSamples, Result};

/// Decode an audio file into a mono buffer at its native rate.
///
/// Any failure here is recoverable at the assembler boundary: the source is
/// skipped, not the run.
pub fn decode_file(path: &Path) -> Result<AudioBuffer> {
    let file = File::open(path)
        .map_err(|e| Error::Decode(format!("failed to open {}: {}", path.display(), e)))?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|ext| ext.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| Error::Decode(format!("unrecognized format {}: {}", path.display(), e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| Error::Decode(format!("no audio track in {}", path.display())))?;

    let track_id = track.id;
    let codec_params = track.codec_params.clone();
    let sample_rate = codec_params
        .sample_rate
        .ok_or_else(|| Error::Decode(format!("no sample rate in {}", path.display())))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| Error::Decode(format!("unsupported codec {}: {}", path.display(), e)))?;

    let mut interleaved: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    let mut channels = 0usize;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break; // EOF
            }
            Err(e) => {
                return Err(Error::Decode(format!(
                    "packet read failed in {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(e)) => {
                // Corrupt packet; skip it and keep decoding.
                warn!("Skipping corrupt packet in {}: {}", path.display(), e);
                continue;
            }
            Err(e) => {
                return Err(Error::Decode(format!(
                    "decode failed in {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count();
            sample_buf = Some(SampleBuffer::<f32>::new(decoded.capacity() as u64, spec));
        }

        if let Some(buf) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            interleaved.extend_from_slice(buf.samples());
        }
    }

    let raw = fold_channels(interleaved, channels);
    debug!(
        "Decoded {}: {} frames at {}Hz, {} channels",
        path.display(),
        raw.frames(),
        sample_rate,
        channels.max(1)
    );

    Ok(AudioBuffer::from_raw(sample_rate, raw))
}

/// Group interleaved samples by channel count for the mono fold.
///
/// Mono and stereo map onto [`RawSamples`] directly; anything wider is
/// averaged down here, frame by frame.
fn fold_channels(interleaved: Vec<f32>, channels: usize) -> RawSamples {
    match channels {
        0 | 1 => RawSamples::Mono(interleaved),
        2 => RawSamples::Stereo(
            interleaved
                .chunks_exact(2)
                .map(|frame| (frame[0], frame[1]))
                .collect(),
        ),
        n => RawSamples::Mono(
            interleaved
                .chunks_exact(n)
                .map(|frame| frame.iter().sum::<f32>() / n as f32)
                .collect(),
        ),
    }
}

/// Write quantized samples as a 16-bit mono PCM WAV file.
pub fn write_wav(path: &Path, sample_rate: u32, samples: &[i16]) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| Error::Encode(format!("failed to create {}: {}", path.display(), e)))?;

    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| Error::Encode(format!("failed to write {}: {}", path.display(), e)))?;
    }

    writer
        .finalize()
        .map_err(|e| Error::Encode(format!("failed to finalize {}: {}", path.display(), e)))?;

    Ok(())
}
