//! Raw PCM sample conversion.
//!
//! Normalizes raw little-endian PCM bytes into the `f32` frames the
//! classifier consumes. Pure functions, no state.

use crate::config::BitDepth;
use crate::error::{Result, VadStreamError};

/// Converts raw PCM bytes into normalized `f32` samples.
///
/// - [`BitDepth::Int16`]: each little-endian signed 16-bit sample `s` maps
///   to `s / 32768.0`.
/// - [`BitDepth::Float32`]: the bytes already contain little-endian IEEE-754
///   floats and are passed through unchanged.
///
/// Returns [`VadStreamError::SampleAlignment`] if the byte length is not a
/// multiple of the sample width.
pub fn to_float(bytes: &[u8], bit_depth: BitDepth) -> Result<Vec<f32>> {
    match bit_depth {
        BitDepth::Int16 => i16_to_float(bytes),
        BitDepth::Float32 => f32_passthrough(bytes),
    }
}

/// Decodes little-endian i16 samples to normalized floats.
pub fn i16_to_float(bytes: &[u8]) -> Result<Vec<f32>> {
    check_alignment(bytes, 2)?;
    Ok(bytes
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]) as f32 / 32768.0)
        .collect())
}

/// Reinterprets little-endian f32 sample bytes as a float buffer.
pub fn f32_passthrough(bytes: &[u8]) -> Result<Vec<f32>> {
    check_alignment(bytes, 4)?;
    Ok(bytes
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect())
}

fn check_alignment(bytes: &[u8], width: usize) -> Result<()> {
    if bytes.len() % width != 0 {
        return Err(VadStreamError::SampleAlignment {
            len: bytes.len(),
            width,
        });
    }
    Ok(())
}
