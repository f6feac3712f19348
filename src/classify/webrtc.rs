//! WebRTC-VAD backed frame classifier.
//!
//! Wraps a `webrtc_vad::Vad` handle on a dedicated worker thread. The handle
//! is `!Send`, so it is created and used only inside that thread; requests
//! cross over a bounded channel and replies come back over a oneshot. One
//! request is in flight at a time, matching the per-stream ordering contract.

use crate::classify::classifier::{Classification, FrameClassifier};
use crate::config::VadMode;
use crate::error::{Result, VadStreamError};
use async_trait::async_trait;
use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;
use webrtc_vad::{SampleRate, Vad, VadMode as NativeMode};

/// The native engine accepts 10/20/30ms windows; a 60ms frame is scored as
/// two 30ms sub-frames, voiced if either is.
const SUB_FRAME_MS: usize = 30;

impl From<VadMode> for NativeMode {
    fn from(mode: VadMode) -> Self {
        match mode {
            VadMode::Normal => NativeMode::Quality,
            VadMode::LowBitrate => NativeMode::LowBitrate,
            VadMode::Aggressive => NativeMode::Aggressive,
            VadMode::VeryAggressive => NativeMode::VeryAggressive,
        }
    }
}

fn native_rate(sample_rate: u32) -> Result<SampleRate> {
    match sample_rate {
        8000 => Ok(SampleRate::Rate8kHz),
        16000 => Ok(SampleRate::Rate16kHz),
        32000 => Ok(SampleRate::Rate32kHz),
        48000 => Ok(SampleRate::Rate48kHz),
        other => Err(VadStreamError::ConfigInvalidValue {
            key: "sample_rate".to_string(),
            message: format!("{} Hz is not supported by the classifier", other),
        }),
    }
}

struct ClassifyRequest {
    samples: Vec<i16>,
    reply: oneshot::Sender<Classification>,
}

/// Production classifier backed by the `webrtc-vad` engine.
pub struct WebRtcClassifier {
    requests: Option<Sender<ClassifyRequest>>,
    worker: Option<JoinHandle<()>>,
}

impl WebRtcClassifier {
    /// Allocates and configures a classifier instance.
    ///
    /// Returns [`VadStreamError::ClassifierUnavailable`] if the worker thread
    /// holding the native handle cannot be brought up.
    pub fn new(mode: VadMode, sample_rate: u32) -> Result<Self> {
        let rate = native_rate(sample_rate)?;
        let native_mode = NativeMode::from(mode);
        let sub_frame_len = sample_rate as usize * SUB_FRAME_MS / 1000;

        // One slot: at most one frame in flight per stream.
        let (request_tx, request_rx) = crossbeam_channel::bounded::<ClassifyRequest>(1);
        let (ready_tx, ready_rx) = crossbeam_channel::bounded::<()>(1);

        let worker = thread::Builder::new()
            .name("vad-classifier".to_string())
            .spawn(move || {
                let mut vad = Vad::new_with_rate_and_mode(rate, native_mode);
                let _ = ready_tx.send(());
                worker_loop(&mut vad, &request_rx, sub_frame_len);
            })
            .map_err(|e| VadStreamError::ClassifierUnavailable {
                message: format!("failed to spawn classifier thread: {}", e),
            })?;

        ready_rx
            .recv()
            .map_err(|_| VadStreamError::ClassifierUnavailable {
                message: "classifier thread exited during initialization".to_string(),
            })?;

        Ok(Self {
            requests: Some(request_tx),
            worker: Some(worker),
        })
    }
}

fn worker_loop(vad: &mut Vad, requests: &Receiver<ClassifyRequest>, sub_frame_len: usize) {
    while let Ok(request) = requests.recv() {
        let classification = classify_samples(vad, &request.samples, sub_frame_len);
        // Receiver gone means the call was cancelled; nothing to do.
        let _ = request.reply.send(classification);
    }
}

fn classify_samples(vad: &mut Vad, samples: &[i16], sub_frame_len: usize) -> Classification {
    if samples.is_empty() || samples.len() % sub_frame_len != 0 {
        return Classification::Error;
    }

    let mut voiced = false;
    for sub_frame in samples.chunks_exact(sub_frame_len) {
        match vad.is_voice_segment(sub_frame) {
            Ok(true) => voiced = true,
            Ok(false) => {}
            Err(()) => return Classification::Error,
        }
    }

    if voiced {
        Classification::Voice
    } else {
        Classification::Silence
    }
}

#[async_trait]
impl FrameClassifier for WebRtcClassifier {
    async fn classify(&mut self, frame: &[f32], _sample_rate: u32) -> Result<Classification> {
        let samples: Vec<i16> = frame
            .iter()
            .map(|&s| (s * 32767.0).clamp(-32768.0, 32767.0) as i16)
            .collect();

        let (reply_tx, reply_rx) = oneshot::channel();
        let requests =
            self.requests
                .as_ref()
                .ok_or_else(|| VadStreamError::ClassifierUnavailable {
                    message: "classifier already released".to_string(),
                })?;
        requests
            .send(ClassifyRequest {
                samples,
                reply: reply_tx,
            })
            .map_err(|_| VadStreamError::ClassifierUnavailable {
                message: "classifier thread exited".to_string(),
            })?;

        reply_rx
            .await
            .map_err(|_| VadStreamError::ClassifierUnavailable {
                message: "classifier thread dropped the request".to_string(),
            })
    }
}

impl Drop for WebRtcClassifier {
    fn drop(&mut self) {
        // Closing the request channel stops the worker loop.
        self.requests.take();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
