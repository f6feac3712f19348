//! Speech state machine.
//!
//! Consumes ordered (frame time, classification) pairs and derives debounced
//! segment boundaries. Brief silence or noise inside an utterance is absorbed
//! by the debounce window; each logical segment is bounded by exactly one
//! `start` and one matching `end`.

use crate::classify::Classification;
use crate::error::{Result, VadStreamError};
use crate::streaming::frame::SpeechInfo;

/// Per-stream speech segmentation state machine.
#[derive(Debug)]
pub struct SpeechSegmenter {
    debounce_ms: u64,
    speaking: bool,
    segment_start_ms: u64,
    last_speech_ms: u64,
    failed: bool,
}

impl SpeechSegmenter {
    /// Creates a segmenter with the given debounce window.
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            debounce_ms,
            speaking: false,
            segment_start_ms: 0,
            last_speech_ms: 0,
            failed: false,
        }
    }

    /// Advances the machine by one frame.
    ///
    /// `time_ms` is the frame's start offset; frames must arrive in order.
    /// A [`Classification::Error`] moves the machine into a terminal failed
    /// state: no state is produced for that frame and every later call is
    /// rejected.
    pub fn advance(&mut self, time_ms: u64, classification: Classification) -> Result<SpeechInfo> {
        if self.failed {
            return Err(VadStreamError::StreamClosed);
        }

        match classification {
            Classification::Error => {
                self.failed = true;
                Err(VadStreamError::ClassificationFailed { time_ms })
            }
            Classification::Voice => {
                let start = !self.speaking;
                if start {
                    self.speaking = true;
                    self.segment_start_ms = time_ms;
                }
                self.last_speech_ms = time_ms;
                Ok(SpeechInfo {
                    state: true,
                    start,
                    end: false,
                    start_time_ms: self.segment_start_ms,
                    duration_ms: time_ms - self.segment_start_ms,
                })
            }
            Classification::Silence | Classification::Noise => {
                // start_time_ms keeps the pre-reset value on the end frame
                let start_time_ms = self.segment_start_ms;
                let mut end = false;
                if self.speaking && time_ms.saturating_sub(self.last_speech_ms) > self.debounce_ms {
                    end = true;
                    self.speaking = false;
                    self.segment_start_ms = 0;
                }
                let duration_ms = if self.speaking {
                    time_ms - self.segment_start_ms
                } else {
                    0
                };
                Ok(SpeechInfo {
                    state: self.speaking,
                    start: false,
                    end,
                    start_time_ms,
                    duration_ms,
                })
            }
        }
    }

    /// Whether a segment is currently open.
    pub fn is_speaking(&self) -> bool {
        self.speaking
    }

    /// Whether the machine reached its terminal failed state.
    pub fn has_failed(&self) -> bool {
        self.failed
    }

    /// Start time of the currently open segment, if any.
    pub fn open_segment_start(&self) -> Option<u64> {
        self.speaking.then_some(self.segment_start_ms)
    }
}
