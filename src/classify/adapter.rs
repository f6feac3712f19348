//! Classifier adapter.
//!
//! Converts each frame's raw bytes to normalized samples and drives the
//! configured [`FrameClassifier`]. Calls are strictly sequential per stream;
//! the classifier carries per-instance state that is undefined under
//! concurrent use.

use crate::audio::convert;
use crate::classify::classifier::{Classification, FrameClassifier};
use crate::config::BitDepth;
use crate::error::Result;

/// Owns a stream's classifier and adapts raw frame bytes to it.
pub struct ClassifierAdapter {
    classifier: Box<dyn FrameClassifier>,
    sample_rate: u32,
    bit_depth: BitDepth,
}

impl ClassifierAdapter {
    /// Creates an adapter around a classifier instance.
    pub fn new(classifier: Box<dyn FrameClassifier>, sample_rate: u32, bit_depth: BitDepth) -> Self {
        Self {
            classifier,
            sample_rate,
            bit_depth,
        }
    }

    /// Converts one frame's bytes and awaits its classification.
    pub async fn classify(&mut self, frame_bytes: &[u8]) -> Result<Classification> {
        let samples = convert::to_float(frame_bytes, self.bit_depth)?;
        self.classifier.classify(&samples, self.sample_rate).await
    }
}
