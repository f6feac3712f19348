//! Streaming speech segmentation engine.
//!
//! ```text
//! raw byte chunks
//!       │
//!       ▼
//! ┌───────────┐ 60ms frames ┌────────────┐ classification ┌───────────┐
//! │  Frame    │────────────▶│ Classifier │───────────────▶│  Speech   │
//! │  Chunker  │  (ordered)  │  Adapter   │  (one at a     │ Segmenter │
//! └───────────┘             └────────────┘   time)        └───────────┘
//!       │                                                       │
//!   remainder                                                   ▼
//!   (< 1 frame, carried)                              ordered FrameEvents
//! ```
//!
//! The [`StreamProcessor`] owns all three stages for one stream and awaits
//! each frame's classification before touching the next, so events come out
//! in strict frame order whatever the write sizes coming in.

pub mod chunker;
pub mod frame;
pub mod processor;
pub mod segmenter;

pub use chunker::FrameChunker;
pub use frame::{FrameEvent, SpeechInfo};
pub use processor::{StreamProcessor, StreamSummary};
pub use segmenter::SpeechSegmenter;
