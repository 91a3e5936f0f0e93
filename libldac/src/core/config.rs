//! Encoder configuration
//!
//! [`EncoderConfig`] is a plain value: build it with the `with_*` methods,
//! deserialize it from a config file, or lift it from the raw integers of the
//! embedding API with [`EncoderConfig::from_raw`]. Validation happens when a
//! session is configured.

use serde::{Deserialize, Serialize};

use super::error::{LdacError, LdacResult};
use super::quality::QualityMode;
use super::types::{ChannelMode, SampleFormat, SamplingFrequency, BLOCK_SAMPLES, DEFAULT_MTU};

/// Session configuration, fixed once a session is configured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Transport MTU in bytes. Informational only, the packer never enforces it.
    #[serde(default = "default_mtu")]
    pub mtu: u32,
    #[serde(default = "default_quality")]
    pub quality: QualityMode,
    #[serde(default = "default_channel_mode")]
    pub channel_mode: ChannelMode,
    #[serde(default = "default_sample_format")]
    pub sample_format: SampleFormat,
    /// Hz, must be one of 44100 / 48000 / 88200 / 96000
    #[serde(default = "default_sampling_frequency")]
    pub sampling_frequency: u32,
}

fn default_mtu() -> u32 {
    DEFAULT_MTU
}

fn default_quality() -> QualityMode {
    QualityMode::Standard
}

fn default_channel_mode() -> ChannelMode {
    ChannelMode::Stereo
}

fn default_sample_format() -> SampleFormat {
    SampleFormat::S16
}

fn default_sampling_frequency() -> u32 {
    48000
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            mtu: default_mtu(),
            quality: default_quality(),
            channel_mode: default_channel_mode(),
            sample_format: default_sample_format(),
            sampling_frequency: default_sampling_frequency(),
        }
    }
}

impl EncoderConfig {
    pub fn new(quality: QualityMode, channel_mode: ChannelMode, sampling_frequency: u32) -> Self {
        Self {
            quality,
            channel_mode,
            sampling_frequency,
            ..Self::default()
        }
    }

    /// Build from the integer arguments used across the embedding boundary
    /// `(mtu, eqmid, channel_mode, fmt, sampling_freq)`.
    pub fn from_raw(
        mtu: i32,
        eqmid: i32,
        channel_mode: i32,
        fmt: i32,
        sampling_freq: i32,
    ) -> LdacResult<Self> {
        let mtu = u32::try_from(mtu).map_err(|_| LdacError::InvalidMtu(mtu as i64))?;
        let sampling_frequency = u32::try_from(sampling_freq)
            .map_err(|_| LdacError::UnsupportedSamplingFrequency(sampling_freq as i64))?;

        let config = Self {
            mtu,
            quality: QualityMode::try_from(eqmid)?,
            channel_mode: ChannelMode::try_from(channel_mode)?,
            sample_format: SampleFormat::try_from(fmt)?,
            sampling_frequency,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }

    pub fn with_quality(mut self, quality: QualityMode) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_channel_mode(mut self, channel_mode: ChannelMode) -> Self {
        self.channel_mode = channel_mode;
        self
    }

    pub fn with_sample_format(mut self, sample_format: SampleFormat) -> Self {
        self.sample_format = sample_format;
        self
    }

    pub fn with_sampling_frequency(mut self, hz: u32) -> Self {
        self.sampling_frequency = hz;
        self
    }

    /// Check every field against its supported set
    pub fn validate(&self) -> LdacResult<SamplingFrequency> {
        SamplingFrequency::from_hz(self.sampling_frequency)
    }

    pub fn channels(&self) -> usize {
        self.channel_mode.channels()
    }

    /// PCM bytes consumed by one encode call
    pub fn block_bytes(&self) -> usize {
        BLOCK_SAMPLES * self.channels() * self.sample_format.bytes_per_sample()
    }

    /// Bytes of one complete frame
    pub fn frame_bytes(&self) -> usize {
        self.quality.frame_bytes()
    }

    /// Whole frames that fit into one MTU-sized packet (at least one)
    pub fn frames_per_packet(&self) -> usize {
        (self.mtu as usize / self.frame_bytes()).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.mtu, 679);
        assert_eq!(config.quality, QualityMode::Standard);
        assert_eq!(config.channel_mode, ChannelMode::Stereo);
        assert_eq!(config.sample_format, SampleFormat::S16);
        assert_eq!(config.validate(), Ok(SamplingFrequency::Hz48000));
    }

    #[test]
    fn test_block_bytes() {
        let stereo = EncoderConfig::default();
        assert_eq!(stereo.block_bytes(), 512);

        let mono24 = stereo
            .with_channel_mode(ChannelMode::Mono)
            .with_sample_format(SampleFormat::S24);
        assert_eq!(mono24.block_bytes(), 384);
    }

    #[test]
    fn test_from_raw() {
        let config = EncoderConfig::from_raw(679, 0, 2, 1, 44100).unwrap();
        assert_eq!(config.quality, QualityMode::High);
        assert_eq!(config.channel_mode, ChannelMode::Mono);
        assert_eq!(config.sampling_frequency, 44100);

        assert_eq!(
            EncoderConfig::from_raw(679, 0, 0, 1, 22050),
            Err(LdacError::UnsupportedSamplingFrequency(22050))
        );
        assert_eq!(
            EncoderConfig::from_raw(679, 7, 0, 1, 48000),
            Err(LdacError::InvalidQualityMode(7))
        );
        assert_eq!(
            EncoderConfig::from_raw(679, 0, 5, 1, 48000),
            Err(LdacError::InvalidChannelMode(5))
        );
        assert_eq!(
            EncoderConfig::from_raw(-1, 0, 0, 1, 48000),
            Err(LdacError::InvalidMtu(-1))
        );
        assert!(EncoderConfig::from_raw(679, 0, 0, 1, -48000).is_err());
    }

    #[test]
    fn test_frames_per_packet() {
        // 679 / 223 = 3 standard frames per packet
        assert_eq!(EncoderConfig::default().frames_per_packet(), 3);
        // an MTU smaller than a frame still carries one frame
        let tiny = EncoderConfig::default().with_mtu(100);
        assert_eq!(tiny.frames_per_packet(), 1);
    }

    #[test]
    fn test_json_shape() {
        let config = EncoderConfig::new(QualityMode::High, ChannelMode::DualChannel, 96000);
        let json = serde_json::to_value(config).unwrap();
        assert_eq!(json["quality"], "high");
        assert_eq!(json["channel_mode"], "dual_channel");
        assert_eq!(json["sample_format"], "s16");
        assert_eq!(json["sampling_frequency"], 96000);

        let partial: EncoderConfig = serde_json::from_str(r#"{"quality":"mobile"}"#).unwrap();
        assert_eq!(partial, EncoderConfig::default().with_quality(QualityMode::Mobile));
    }
}
