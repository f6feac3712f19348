//! Stream processor.
//!
//! Owns a stream's chunker, classifier adapter and speech segmenter, and
//! drives them in strict frame order: each frame's classification completes
//! before the next frame is touched, so at most one frame is in flight per
//! stream and the segmenter sees a gap-free, monotonic frame sequence.

use crate::classify::{ClassifierAdapter, FrameClassifier, WebRtcClassifier};
use crate::config::StreamConfig;
use crate::error::{Result, VadStreamError};
use crate::streaming::chunker::FrameChunker;
use crate::streaming::frame::FrameEvent;
use crate::streaming::segmenter::SpeechSegmenter;
use tokio::sync::mpsc;

/// Final accounting returned by [`StreamProcessor::close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSummary {
    /// Total bytes consumed into complete frames.
    pub bytes_consumed: u64,
    /// Trailing bytes (< one frame) discarded at close.
    pub discarded_bytes: usize,
    /// Start time of a segment that was still open at close, if any.
    pub open_segment_start_ms: Option<u64>,
}

/// Per-stream processor: raw byte chunks in, ordered [`FrameEvent`]s out.
pub struct StreamProcessor {
    config: StreamConfig,
    chunker: FrameChunker,
    adapter: ClassifierAdapter,
    segmenter: SpeechSegmenter,
    byte_count: u64,
    failed: bool,
}

impl std::fmt::Debug for StreamProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamProcessor")
            .field("config", &self.config)
            .field("byte_count", &self.byte_count)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl StreamProcessor {
    /// Creates a processor backed by the production WebRTC classifier.
    ///
    /// Fails synchronously on an invalid configuration or if the classifier
    /// cannot be allocated.
    pub fn new(config: StreamConfig) -> Result<Self> {
        config.validate()?;
        let classifier = WebRtcClassifier::new(config.mode, config.sample_rate)?;
        Ok(Self::assemble(config, Box::new(classifier)))
    }

    /// Creates a processor around a caller-supplied classifier.
    pub fn with_classifier(
        config: StreamConfig,
        classifier: Box<dyn FrameClassifier>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, classifier))
    }

    fn assemble(config: StreamConfig, classifier: Box<dyn FrameClassifier>) -> Self {
        let chunker = FrameChunker::new(config.sample_rate);
        let adapter = ClassifierAdapter::new(classifier, config.sample_rate, config.bit_depth);
        let segmenter = SpeechSegmenter::new(config.debounce_ms);
        Self {
            config,
            chunker,
            adapter,
            segmenter,
            byte_count: 0,
            failed: false,
        }
    }

    /// The stream's configuration.
    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Whether the stream hit a fatal classification error.
    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Whether a speech segment is currently open.
    pub fn is_speaking(&self) -> bool {
        self.segmenter.is_speaking()
    }

    /// Time offset of the next frame, derived from consumed bytes.
    fn frame_time_ms(&self) -> u64 {
        self.byte_count * 1000 / (self.config.sample_rate as u64 * 2)
    }

    /// Classifies one frame and advances the segmenter.
    async fn process_frame(&mut self, frame: Vec<u8>) -> Result<FrameEvent> {
        let time_ms = self.frame_time_ms();
        let classification = self.adapter.classify(&frame).await?;
        let speech = self.segmenter.advance(time_ms, classification)?;
        self.byte_count += frame.len() as u64;
        Ok(FrameEvent {
            time_ms,
            audio: frame,
            speech,
        })
    }

    /// Latches the terminal failed state and discards buffered bytes.
    fn fail(&mut self) {
        self.failed = true;
        self.chunker.reset();
    }

    /// Submits a byte chunk and returns the events for every completed frame.
    ///
    /// Frames are classified one at a time, in order; the call suspends on
    /// each classification. On a fatal classification error the stream
    /// latches closed: the buffered remainder is discarded, the error is
    /// returned, and every later call fails with
    /// [`VadStreamError::StreamClosed`]. For per-frame delivery ahead of a
    /// mid-write failure, use [`run`](Self::run).
    pub async fn submit(&mut self, bytes: &[u8]) -> Result<Vec<FrameEvent>> {
        if self.failed {
            return Err(VadStreamError::StreamClosed);
        }

        let frames = self.chunker.ingest(bytes);
        let mut events = Vec::with_capacity(frames.len());
        for frame in frames {
            match self.process_frame(frame).await {
                Ok(event) => events.push(event),
                Err(e) => {
                    self.fail();
                    return Err(e);
                }
            }
        }
        Ok(events)
    }

    /// Closes the stream, discarding any buffered partial frame.
    ///
    /// No event is emitted for the remainder; the summary reports what was
    /// dropped and whether a segment was still open.
    pub fn close(self) -> StreamSummary {
        StreamSummary {
            bytes_consumed: self.byte_count,
            discarded_bytes: self.chunker.leftover().len(),
            open_segment_start_ms: self.segmenter.open_segment_start(),
        }
    }

    /// Runs the processor as a station: byte chunks in, frame events out.
    ///
    /// Each event is sent downstream before the next frame is classified.
    /// Returns when the input channel closes (normal end of stream), when
    /// the output channel closes (downstream cancelled), or with the fatal
    /// error that stopped the stream. The bounded channels give a fast
    /// producer natural backpressure at the ingestion boundary.
    pub async fn run(
        mut self,
        mut input: mpsc::Receiver<Vec<u8>>,
        output: mpsc::Sender<FrameEvent>,
    ) -> Result<StreamSummary> {
        while let Some(chunk) = input.recv().await {
            if self.failed {
                return Err(VadStreamError::StreamClosed);
            }
            for frame in self.chunker.ingest(&chunk) {
                match self.process_frame(frame).await {
                    Ok(event) => {
                        if output.send(event).await.is_err() {
                            return Ok(self.close());
                        }
                    }
                    Err(e) => {
                        self.fail();
                        return Err(e);
                    }
                }
            }
        }
        Ok(self.close())
    }
}
