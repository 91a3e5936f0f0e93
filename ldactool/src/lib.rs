//! ldactool - encode audio to LDAC-style frame streams and inspect them
//!
//! Audio is decoded with symphonia, converted to 16-bit PCM and fed through a
//! [`StreamEncoder`]. The output is the raw concatenation of frames.

pub mod audio;
pub mod config;

use anyhow::{bail, Context, Result};
use libldac_bt::{
    ChannelMode, EncoderConfig, FrameHeader, FrameReader, QualityMode, SampleFormat,
    SamplingFrequency, StreamEncoder, StreamStats,
};
use serde::Serialize;

pub use audio::DecodedAudio;
pub use config::ToolConfig;

/// Result of encoding one input
#[derive(Debug, Clone)]
pub struct EncodeReport {
    /// concatenated frames
    pub stream: Vec<u8>,
    /// MTU-sized packets the frames were grouped into
    pub packets: usize,
    pub config: EncoderConfig,
    pub stats: StreamStats,
}

/// Encode decoded audio bytes (any format symphonia understands)
pub fn encode_from_audio(
    audio_bytes: &[u8],
    config: EncoderConfig,
    chunk_frames: usize,
) -> Result<EncodeReport> {
    let audio = audio::read_audio_from_bytes(audio_bytes).context("Failed to read audio")?;
    encode_audio(&audio, config, chunk_frames)
}

pub fn encode_audio(
    audio: &DecodedAudio,
    config: EncoderConfig,
    chunk_frames: usize,
) -> Result<EncodeReport> {
    encode_from_samples(
        &audio.samples,
        audio.sample_rate,
        audio.channels,
        config,
        chunk_frames,
    )
}

/// Encode interleaved f32 samples
///
/// The sampling frequency comes from the source; there is no resampling, so
/// only the four supported rates are accepted. Channels are mixed to fit the
/// configured channel mode.
pub fn encode_from_samples(
    samples: &[f32],
    sample_rate: u32,
    channels: usize,
    config: EncoderConfig,
    chunk_frames: usize,
) -> Result<EncodeReport> {
    if channels == 0 {
        bail!("Input has no channels");
    }

    let config = config
        .with_sampling_frequency(sample_rate)
        .with_sample_format(SampleFormat::S16);
    let mut encoder = StreamEncoder::new(config)
        .with_context(|| format!("Cannot encode {} Hz audio", sample_rate))?;

    let fitted = fit_channels(samples, channels, config.channels());
    let chunk = chunk_frames.max(1) * config.channels();

    let mut stream = Vec::new();
    let mut packets = 0;
    for block in fitted.chunks(chunk) {
        encoder.push_pcm(&libldac_bt::core::samples_to_s16le(block))?;
        for packet in encoder.drain_packets() {
            stream.extend_from_slice(&packet);
            packets += 1;
        }
    }

    if let Some(last) = encoder.flush()? {
        stream.extend_from_slice(last.frame.as_bytes());
        packets += 1;
    }

    let stats = encoder.stats();
    tracing::info!(
        frames = stats.frames,
        packets,
        bytes = stream.len(),
        "encoded {:.2}s at {} bps",
        stats.duration_secs(),
        stats.bitrate
    );

    Ok(EncodeReport {
        stream,
        packets,
        config,
        stats,
    })
}

/// Mix interleaved audio from `from` channels to `to` (1 or 2) channels
///
/// Mono is duplicated into a pair; a pair or more is averaged down to mono;
/// beyond two channels only the front pair is kept.
pub fn fit_channels(samples: &[f32], from: usize, to: usize) -> Vec<f32> {
    if from == to {
        return samples.to_vec();
    }

    let frames = samples.chunks_exact(from);
    match (from, to) {
        (1, 2) => frames.flat_map(|f| [f[0], f[0]]).collect(),
        (_, 1) => frames
            .map(|f| f.iter().take(2).sum::<f32>() / from.min(2) as f32)
            .collect(),
        _ => frames.flat_map(|f| [f[0], f[1]]).collect(),
    }
}

/// Summary of a frame stream
#[derive(Debug, Clone, Serialize)]
pub struct StreamInfo {
    pub file_size: usize,
    pub frames: usize,
    /// bytes outside any frame
    pub skipped_bytes: usize,
    pub sampling_frequency: u32,
    pub channel_mode: &'static str,
    pub quality: &'static str,
    pub frame_bytes: usize,
    pub bitrate: u32,
    pub duration_secs: f64,
    /// every frame carries the first frame's header
    pub consistent: bool,
    /// set when the stream ends mid-frame
    pub truncated: Option<String>,
    /// blake3 of the whole file
    pub blake3: String,
}

/// Walk a frame stream and summarize it
pub fn inspect_stream(data: &[u8]) -> Result<StreamInfo> {
    let mut reader = FrameReader::new(data);
    let mut first: Option<FrameHeader> = None;
    let mut frames = 0;
    let mut consistent = true;
    let mut truncated = None;

    for item in reader.by_ref() {
        match item {
            Ok(frame) => {
                match first {
                    None => first = Some(frame.header),
                    Some(h) if h != frame.header => consistent = false,
                    Some(_) => {}
                }
                frames += 1;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                truncated = Some(e.to_string());
            }
        }
    }

    let header = match first {
        Some(header) => header,
        None => bail!("No frames found in {} bytes", data.len()),
    };

    let fs = header.sampling_frequency;
    Ok(StreamInfo {
        file_size: data.len(),
        frames,
        skipped_bytes: reader.skipped_bytes(),
        sampling_frequency: fs.hz(),
        channel_mode: header.channel_mode.name(),
        quality: header.quality.name(),
        frame_bytes: header.frame_len(),
        bitrate: header.quality.bitrate(fs),
        duration_secs: (frames * libldac_bt::BLOCK_SAMPLES) as f64 / fs.hz() as f64,
        consistent,
        truncated,
        blake3: blake3::hash(data).to_hex().to_string(),
    })
}

/// One row of the bitrate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitrateRow {
    pub quality: &'static str,
    pub sampling_frequency: u32,
    pub payload_bytes: usize,
    pub frame_bytes: usize,
    pub bitrate: u32,
}

/// Bitrate of every quality mode at every supported rate
pub fn bitrate_table() -> Vec<BitrateRow> {
    QualityMode::ALL
        .into_iter()
        .flat_map(|quality| {
            SamplingFrequency::ALL.into_iter().map(move |fs| BitrateRow {
                quality: quality.name(),
                sampling_frequency: fs.hz(),
                payload_bytes: quality.payload_bytes(),
                frame_bytes: quality.frame_bytes(),
                bitrate: quality.bitrate(fs),
            })
        })
        .collect()
}

/// Parse a channel mode name
pub fn parse_channel_mode(name: &str) -> Result<ChannelMode> {
    name.parse()
        .map_err(|_| anyhow::anyhow!("Invalid channel mode: {}. Use: stereo, dual, mono", name))
}

/// Parse a quality mode name
pub fn parse_quality(name: &str) -> Result<QualityMode> {
    name.parse().map_err(|_| {
        anyhow::anyhow!(
            "Invalid quality: {}. Use: high (hq), standard (sq), mobile (mq)",
            name
        )
    })
}
