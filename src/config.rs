//! Stream configuration.
//!
//! A [`StreamConfig`] is fixed when a stream is constructed; invalid values
//! are rejected before any audio is processed.

use crate::defaults;
use crate::error::{Result, VadStreamError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Classifier aggressiveness mode.
///
/// Higher modes are stricter about what counts as voice, which reduces
/// false positives but may increase missed detections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VadMode {
    /// Least aggressive; best for clean audio environments.
    #[default]
    Normal,
    /// Optimised for low-bitrate sources.
    LowBitrate,
    /// More aggressive; good for moderate background noise.
    Aggressive,
    /// Most aggressive; best for noisy environments.
    VeryAggressive,
}

/// Sample width of the raw PCM input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BitDepth {
    /// Little-endian signed 16-bit integer samples (the default).
    #[default]
    Int16,
    /// Little-endian IEEE-754 32-bit float samples.
    Float32,
}

impl BitDepth {
    /// Width of one sample in bytes.
    pub const fn sample_width(&self) -> usize {
        match self {
            BitDepth::Int16 => 2,
            BitDepth::Float32 => 4,
        }
    }
}

/// Configuration for one audio stream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Classifier aggressiveness.
    pub mode: VadMode,
    /// Input PCM sample rate in Hz. Must be 8000, 16000, 32000 or 48000.
    pub sample_rate: u32,
    /// Milliseconds of non-voice tolerated inside a segment before ending it.
    pub debounce_ms: u64,
    /// Sample width of the raw input bytes.
    pub bit_depth: BitDepth,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            mode: VadMode::default(),
            sample_rate: defaults::SAMPLE_RATE,
            debounce_ms: defaults::DEBOUNCE_MS,
            bit_depth: BitDepth::default(),
        }
    }
}

impl StreamConfig {
    /// Checks that every field holds an allowed value.
    pub fn validate(&self) -> Result<()> {
        if !defaults::SUPPORTED_SAMPLE_RATES.contains(&self.sample_rate) {
            return Err(VadStreamError::ConfigInvalidValue {
                key: "sample_rate".to_string(),
                message: format!(
                    "{} Hz is not supported, expected one of {:?}",
                    self.sample_rate,
                    defaults::SUPPORTED_SAMPLE_RATES
                ),
            });
        }
        Ok(())
    }

    /// Frame length in bytes for this stream's sample rate.
    pub fn frame_length_bytes(&self) -> usize {
        defaults::frame_length_bytes(self.sample_rate)
    }

    /// Sets the classifier mode.
    pub fn with_mode(mut self, mode: VadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the debounce window.
    pub fn with_debounce_ms(mut self, debounce_ms: u64) -> Self {
        self.debounce_ms = debounce_ms;
        self
    }

    /// Sets the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Load configuration from a TOML file.
    ///
    /// Missing fields use default values; the result is validated before
    /// it is returned.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VadStreamError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                VadStreamError::Io(e)
            }
        })?;
        let config: StreamConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist.
    ///
    /// Only a missing file falls back to defaults; invalid TOML or invalid
    /// values are still errors.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(VadStreamError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported environment variables:
    /// - VADSTREAM_MODE → mode (normal, low_bitrate, aggressive, very_aggressive)
    /// - VADSTREAM_SAMPLE_RATE → sample_rate
    /// - VADSTREAM_DEBOUNCE_MS → debounce_ms
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(mode) = std::env::var("VADSTREAM_MODE")
            && let Some(mode) = parse_mode(&mode)
        {
            self.mode = mode;
        }
        if let Ok(rate) = std::env::var("VADSTREAM_SAMPLE_RATE")
            && let Ok(rate) = rate.parse::<u32>()
        {
            self.sample_rate = rate;
        }
        if let Ok(debounce) = std::env::var("VADSTREAM_DEBOUNCE_MS")
            && let Ok(debounce) = debounce.parse::<u64>()
        {
            self.debounce_ms = debounce;
        }
        self
    }
}

fn parse_mode(value: &str) -> Option<VadMode> {
    match value {
        "normal" => Some(VadMode::Normal),
        "low_bitrate" => Some(VadMode::LowBitrate),
        "aggressive" => Some(VadMode::Aggressive),
        "very_aggressive" => Some(VadMode::VeryAggressive),
        _ => None,
    }
}
