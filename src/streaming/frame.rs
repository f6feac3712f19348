//! Frame event types emitted by the stream processor.

use serde::{Deserialize, Serialize};

/// Speech-segmentation state attached to one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechInfo {
    /// Whether a speech segment is open after this frame.
    pub state: bool,
    /// True exactly on the frame that opens a segment.
    pub start: bool,
    /// True exactly on the frame that closes a segment.
    pub end: bool,
    /// Start time of the segment valid during this frame, in ms.
    /// The fresh value on a `start` frame, the pre-reset value on an `end`
    /// frame, 0 while no segment is open.
    pub start_time_ms: u64,
    /// Elapsed time of the open segment, in ms; 0 while no segment is open.
    pub duration_ms: u64,
}

/// One processed frame: its time offset, raw audio and speech state.
///
/// Produced exactly once per 60ms frame, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameEvent {
    /// Offset of the frame start from the beginning of the stream, in ms.
    pub time_ms: u64,
    /// The frame's raw PCM bytes, exactly as ingested.
    pub audio: Vec<u8>,
    /// Segmentation state for this frame.
    pub speech: SpeechInfo,
}

impl FrameEvent {
    /// Returns true if this frame opens or closes a segment.
    pub fn is_segment_boundary(&self) -> bool {
        self.speech.start || self.speech.end
    }
}
