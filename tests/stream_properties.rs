//! End-to-end properties of the segmentation stream.
//!
//! Everything runs against a scripted mock classifier so the expected event
//! sequence is fully deterministic.

use vadstream::Classification::{Noise, Silence, Voice};
use vadstream::{
    BitDepth, Classification, FrameEvent, MockClassifier, StreamConfig, StreamProcessor, VadMode,
    VadStreamError,
};

const FRAME: usize = 1920; // 60ms at 16kHz

fn processor(script: Vec<Classification>, debounce_ms: u64) -> StreamProcessor {
    let config = StreamConfig::default().with_debounce_ms(debounce_ms);
    let mock = MockClassifier::with_script(script);
    StreamProcessor::with_classifier(config, Box::new(mock))
        .expect("default config with mock classifier")
}

/// Feeds `input` split into `write_size`d chunks, collecting all events.
async fn feed_in_chunks(
    processor: &mut StreamProcessor,
    input: &[u8],
    write_size: usize,
) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    for write in input.chunks(write_size) {
        events.extend(processor.submit(write).await.expect("submit"));
    }
    events
}

#[tokio::test]
async fn chunk_boundary_independence() {
    // 12 frames of audio with a voice burst in the middle
    let mut script = vec![Silence; 4];
    script.extend([Voice; 4]);
    script.extend([Silence; 4]);

    let input: Vec<u8> = (0..FRAME * 12).map(|i| (i % 256) as u8).collect();

    let mut reference = processor(script.clone(), 120);
    let expected = feed_in_chunks(&mut reference, &input, FRAME).await;
    assert_eq!(expected.len(), 12);

    // Any partitioning of the same bytes produces the identical sequence
    for write_size in [1, 13, 500, FRAME - 1, FRAME + 1, FRAME * 3, input.len()] {
        let mut processor = processor(script.clone(), 120);
        let events = feed_in_chunks(&mut processor, &input, write_size).await;
        assert_eq!(events, expected, "write_size {}", write_size);
    }
}

#[tokio::test]
async fn single_start_and_end_per_segment() {
    // Two utterances with a noisy gap inside the first
    let mut script = vec![Silence; 2];
    script.extend([Voice, Voice, Noise, Voice]); // gap absorbed by debounce
    script.extend([Silence; 5]); // long enough to end the segment
    script.extend([Voice; 2]);
    script.extend([Silence; 5]);

    let mut processor = processor(script.clone(), 120);
    let input = vec![0u8; FRAME * script.len()];
    let events = feed_in_chunks(&mut processor, &input, FRAME * 4).await;

    let mut speaking = false;
    let mut starts = 0;
    let mut ends = 0;
    for event in &events {
        if event.speech.start {
            assert!(!speaking, "start while already speaking at {}", event.time_ms);
            starts += 1;
        }
        if event.speech.end {
            assert!(speaking, "end without open segment at {}", event.time_ms);
            ends += 1;
        }
        // state reflects the post-transition machine
        speaking = event.speech.state;
        if event.speech.start {
            assert!(speaking);
        }
        if event.speech.end {
            assert!(!speaking);
        }
    }
    assert_eq!(starts, 2);
    assert_eq!(ends, 2);
}

#[tokio::test]
async fn duration_is_monotonic_and_anchored_to_start_time() {
    let mut script = vec![Voice; 3];
    script.extend([Silence, Voice, Silence, Silence]);

    let mut processor = processor(script.clone(), 200);
    let input = vec![0u8; FRAME * script.len()];
    let events = feed_in_chunks(&mut processor, &input, 777).await;

    let mut last_duration = 0;
    for event in &events {
        if event.speech.state {
            assert_eq!(
                event.speech.duration_ms,
                event.time_ms - event.speech.start_time_ms
            );
            assert!(event.speech.duration_ms >= last_duration);
            last_duration = event.speech.duration_ms;
        } else {
            assert_eq!(event.speech.duration_ms, 0);
        }
    }
}

#[tokio::test]
async fn spec_scenario_segment_lifecycle() {
    // 16kHz, 1000ms debounce: frames 1-5 silence, 6-8 voice, 9-28 silence
    let mut script = vec![Silence; 5];
    script.extend([Voice; 3]);
    script.extend([Silence; 20]);

    let mut processor = processor(script.clone(), 1000);
    let input = vec![0u8; FRAME * 28];
    let events = feed_in_chunks(&mut processor, &input, 1000).await;
    assert_eq!(events.len(), 28);

    let start_frame = &events[5];
    assert!(start_frame.speech.start);
    assert_eq!(start_frame.time_ms, 300);
    assert_eq!(start_frame.speech.start_time_ms, 300);
    assert_eq!(start_frame.speech.duration_ms, 0);

    assert_eq!(events[6].speech.duration_ms, 60);
    assert_eq!(events[7].speech.duration_ms, 120);

    for event in &events[8..24] {
        assert!(event.speech.state);
        assert!(!event.speech.start);
        assert!(!event.speech.end);
    }

    let end_frame = &events[24];
    assert!(end_frame.speech.end);
    assert!(!end_frame.speech.state);
    assert_eq!(end_frame.time_ms, 1440);
    assert_eq!(end_frame.speech.start_time_ms, 300);
    assert_eq!(end_frame.speech.duration_ms, 0);

    for event in &events[25..] {
        assert!(!event.speech.state);
        assert!(!event.speech.start);
        assert!(!event.speech.end);
    }
}

#[tokio::test]
async fn fatal_error_terminates_the_stream() {
    let script = vec![Voice, Voice, Classification::Error, Voice, Voice];
    let mut processor = processor(script, 1000);

    let err = processor
        .submit(&vec![0u8; FRAME * 5])
        .await
        .expect_err("classification error should fail the stream");
    assert!(matches!(
        err,
        VadStreamError::ClassificationFailed { time_ms: 120 }
    ));

    // No further events, ever
    let err = processor.submit(&vec![0u8; FRAME]).await.unwrap_err();
    assert!(matches!(err, VadStreamError::StreamClosed));
}

#[tokio::test]
async fn trailing_partial_frame_is_discarded_at_close() {
    let mut processor = processor(vec![Silence; 2], 1000);

    let events = processor
        .submit(&vec![0u8; FRAME * 2 + 321])
        .await
        .expect("submit");
    assert_eq!(events.len(), 2);

    let summary = processor.close();
    assert_eq!(summary.bytes_consumed, (FRAME * 2) as u64);
    assert_eq!(summary.discarded_bytes, 321);
}

#[tokio::test]
async fn float32_streams_use_the_same_frame_geometry() {
    // Same byte-level framing, different sample decoding
    let config = StreamConfig {
        mode: VadMode::Normal,
        sample_rate: 16000,
        debounce_ms: 1000,
        bit_depth: BitDepth::Float32,
    };
    let mock = MockClassifier::with_script(vec![Voice]);
    let mut processor =
        StreamProcessor::with_classifier(config, Box::new(mock)).expect("float32 config");

    let events = processor.submit(&vec![0u8; FRAME]).await.expect("submit");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].time_ms, 0);
    assert!(events[0].speech.start);
}

#[tokio::test]
async fn independent_streams_do_not_share_state() {
    let mut voiced = processor(vec![Voice; 3], 1000);
    let mut silent = processor(vec![Silence; 3], 1000);

    let input = vec![0u8; FRAME * 3];
    let voiced_events = voiced.submit(&input).await.expect("voiced submit");
    let silent_events = silent.submit(&input).await.expect("silent submit");

    assert!(voiced_events.iter().all(|e| e.speech.state));
    assert!(silent_events.iter().all(|e| !e.speech.state));
}
