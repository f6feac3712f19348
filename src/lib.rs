//! vadstream - Streaming speech segmentation for raw PCM audio
//!
//! Turns a continuous PCM byte stream into discrete speech segments: every
//! 60ms frame is classified (silence/voice/noise) and annotated with
//! debounced segment state (start/end/running duration), ready for
//! downstream recording, transcription or silence trimming.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod classify;
pub mod config;
pub mod defaults;
pub mod error;
pub mod streaming;

// Core types
pub use config::{BitDepth, StreamConfig, VadMode};
pub use streaming::{FrameEvent, SpeechInfo, StreamProcessor, StreamSummary};

// Classifier seam (swap the production engine for a mock in tests)
pub use classify::{Classification, FrameClassifier, MockClassifier, WebRtcClassifier};

// Audio input
pub use audio::wav::WavPcmSource;

// Error handling
pub use error::{Result, VadStreamError};
