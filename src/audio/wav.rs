//! WAV file input for file-based streams.
//!
//! Reads a WAV file into the raw little-endian PCM bytes a
//! [`StreamProcessor`](crate::streaming::StreamProcessor) ingests.
//! Stereo input is downmixed to mono; the sample rate must be one the
//! classifier supports (no resampling).

use crate::defaults::SUPPORTED_SAMPLE_RATES;
use crate::error::{Result, VadStreamError};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Raw PCM bytes read from a WAV file, ready to feed into a stream.
#[derive(Debug)]
pub struct WavPcmSource {
    sample_rate: u32,
    bytes: Vec<u8>,
}

impl WavPcmSource {
    /// Create from any reader (for testing/flexibility).
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let mut wav_reader =
            hound::WavReader::new(reader).map_err(|e| VadStreamError::UnsupportedAudio {
                message: format!("Failed to parse WAV file: {}", e),
            })?;

        let spec = wav_reader.spec();
        if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(VadStreamError::UnsupportedAudio {
                message: format!(
                    "expected 16-bit integer WAV, got {}-bit {:?}",
                    spec.bits_per_sample, spec.sample_format
                ),
            });
        }
        if !SUPPORTED_SAMPLE_RATES.contains(&spec.sample_rate) {
            return Err(VadStreamError::UnsupportedAudio {
                message: format!(
                    "{} Hz WAV is not supported, expected one of {:?}",
                    spec.sample_rate, SUPPORTED_SAMPLE_RATES
                ),
            });
        }
        if spec.channels == 0 || spec.channels > 2 {
            return Err(VadStreamError::UnsupportedAudio {
                message: format!("{} channels, expected mono or stereo", spec.channels),
            });
        }

        let raw_samples: Vec<i16> = wav_reader
            .samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| VadStreamError::UnsupportedAudio {
                message: format!("Failed to read WAV samples: {}", e),
            })?;

        // Downmix stereo to mono
        let mono_samples: Vec<i16> = if spec.channels == 2 {
            raw_samples
                .chunks_exact(2)
                .map(|chunk| {
                    let left = chunk[0] as i32;
                    let right = chunk[1] as i32;
                    ((left + right) / 2) as i16
                })
                .collect()
        } else {
            raw_samples
        };

        let bytes = mono_samples.iter().flat_map(|s| s.to_le_bytes()).collect();

        Ok(Self {
            sample_rate: spec.sample_rate,
            bytes,
        })
    }

    /// Create from a WAV file on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Sample rate of the decoded audio in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Decoded audio as little-endian i16 PCM bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Duration of the decoded audio in milliseconds.
    pub fn duration_ms(&self) -> u64 {
        self.bytes.len() as u64 * 1000 / (self.sample_rate as u64 * 2)
    }

    /// Consume the source and return the raw PCM bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
