//! Audio input utilities: PCM sample conversion and WAV file ingestion.

pub mod convert;
pub mod wav;

pub use convert::to_float;
pub use wav::WavPcmSource;
