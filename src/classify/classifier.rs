//! Frame classifier seam.
//!
//! The classification algorithm itself is an external capability; this
//! trait allows swapping implementations (real WebRTC VAD vs mock).

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Per-frame classification produced by the external classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// The classifier could not process the frame. Fatal for the stream.
    Error,
    /// No speech in the frame.
    Silence,
    /// Speech detected.
    Voice,
    /// Non-speech sound. Treated like silence by the segmenter.
    Noise,
}

impl Classification {
    /// Returns true for the classifications that count as speech.
    pub fn is_voice(&self) -> bool {
        matches!(self, Classification::Voice)
    }
}

/// Trait for per-frame voice classification.
///
/// Implementations carry internal per-instance state that is undefined under
/// concurrent use; `&mut self` keeps calls for one stream strictly
/// sequential, and an instance is never shared across streams.
#[async_trait]
pub trait FrameClassifier: Send {
    /// Classifies one fixed-duration frame of normalized samples.
    ///
    /// # Arguments
    /// * `frame` - Normalized f32 samples for exactly one frame
    /// * `sample_rate` - Sample rate in Hz
    async fn classify(&mut self, frame: &[f32], sample_rate: u32) -> Result<Classification>;
}

/// Mock classifier for testing.
///
/// Replays a scripted sequence of classifications, then a fallback.
#[derive(Debug, Clone)]
pub struct MockClassifier {
    script: VecDeque<Classification>,
    fallback: Classification,
    frames_seen: usize,
}

impl MockClassifier {
    /// Create a mock that always returns the fallback (silence by default).
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            fallback: Classification::Silence,
            frames_seen: 0,
        }
    }

    /// Create a mock that replays the given classifications in order.
    pub fn with_script(script: impl IntoIterator<Item = Classification>) -> Self {
        Self {
            script: script.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Configure the classification returned once the script is exhausted.
    pub fn with_fallback(mut self, fallback: Classification) -> Self {
        self.fallback = fallback;
        self
    }

    /// Number of frames classified so far.
    pub fn frames_seen(&self) -> usize {
        self.frames_seen
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FrameClassifier for MockClassifier {
    async fn classify(&mut self, _frame: &[f32], _sample_rate: u32) -> Result<Classification> {
        self.frames_seen += 1;
        Ok(self.script.pop_front().unwrap_or(self.fallback))
    }
}
