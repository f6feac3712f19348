//! Error types for vadstream.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VadStreamError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Classifier errors
    #[error("Classifier unavailable: {message}")]
    ClassifierUnavailable { message: String },

    #[error("Frame classification failed at {time_ms} ms")]
    ClassificationFailed { time_ms: u64 },

    // Audio input errors
    #[error("Sample buffer length {len} is not a multiple of the {width}-byte sample width")]
    SampleAlignment { len: usize, width: usize },

    #[error("Unsupported audio input: {message}")]
    UnsupportedAudio { message: String },

    // Stream lifecycle
    #[error("Stream is closed")]
    StreamClosed,

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, VadStreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = VadStreamError::ConfigFileNotFound {
            path: "/path/to/vadstream.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/vadstream.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = VadStreamError::ConfigInvalidValue {
            key: "sample_rate".to_string(),
            message: "must be one of 8000, 16000, 32000, 48000".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for sample_rate: must be one of 8000, 16000, 32000, 48000"
        );
    }

    #[test]
    fn test_classifier_unavailable_display() {
        let error = VadStreamError::ClassifierUnavailable {
            message: "worker thread exited".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Classifier unavailable: worker thread exited"
        );
    }

    #[test]
    fn test_classification_failed_display() {
        let error = VadStreamError::ClassificationFailed { time_ms: 420 };
        assert_eq!(error.to_string(), "Frame classification failed at 420 ms");
    }

    #[test]
    fn test_sample_alignment_display() {
        let error = VadStreamError::SampleAlignment { len: 3, width: 2 };
        assert_eq!(
            error.to_string(),
            "Sample buffer length 3 is not a multiple of the 2-byte sample width"
        );
    }

    #[test]
    fn test_unsupported_audio_display() {
        let error = VadStreamError::UnsupportedAudio {
            message: "24-bit WAV".to_string(),
        };
        assert_eq!(error.to_string(), "Unsupported audio input: 24-bit WAV");
    }

    #[test]
    fn test_stream_closed_display() {
        assert_eq!(VadStreamError::StreamClosed.to_string(), "Stream is closed");
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: VadStreamError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_str = "invalid = toml = syntax";
        let toml_error = toml::from_str::<toml::Value>(toml_str).unwrap_err();
        let error: VadStreamError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: VadStreamError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<VadStreamError>();
        assert_sync::<VadStreamError>();
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);

        fn returns_error() -> Result<i32> {
            Err(VadStreamError::StreamClosed)
        }
        assert!(returns_error().is_err());
    }
}
