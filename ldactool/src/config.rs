//! Tool configuration
//!
//! Read from a TOML file passed with `--config`. Every key is optional;
//! command-line flags override whatever the file sets.
//!
//! ```toml
//! [encoder]
//! quality = "high"
//! channel_mode = "stereo"
//! mtu = 679
//!
//! [output]
//! chunk_frames = 4096
//! ```

use anyhow::{Context, Result};
use libldac_bt::EncoderConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Encoder settings. The sampling frequency always comes from the input file.
    #[serde(default)]
    pub encoder: EncoderConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// PCM frames handed to the encoder per push
    #[serde(default = "default_chunk_frames")]
    pub chunk_frames: usize,
}

fn default_chunk_frames() -> usize {
    4096
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            chunk_frames: default_chunk_frames(),
        }
    }
}

impl ToolConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libldac_bt::{ChannelMode, QualityMode};

    #[test]
    fn test_empty_config_is_default() {
        let config = ToolConfig::from_toml_str("").unwrap();
        assert_eq!(config.encoder, EncoderConfig::default());
        assert_eq!(config.output.chunk_frames, 4096);
    }

    #[test]
    fn test_partial_encoder_section() {
        let config = ToolConfig::from_toml_str(
            r#"
            [encoder]
            quality = "mobile"
            channel_mode = "dual_channel"
            "#,
        )
        .unwrap();
        assert_eq!(config.encoder.quality, QualityMode::Mobile);
        assert_eq!(config.encoder.channel_mode, ChannelMode::DualChannel);
        assert_eq!(config.encoder.mtu, 679);
    }

    #[test]
    fn test_unknown_quality_is_an_error() {
        assert!(ToolConfig::from_toml_str("[encoder]\nquality = \"ultra\"\n").is_err());
    }
}
