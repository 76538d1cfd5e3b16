//! Error handling for audio-filters
//!
//! Every fallible operation returns [`FilterError`]. Errors carry a stable
//! code and a recovery hint so the harness can explain what went wrong.

use thiserror::Error;

/// Result type alias for audio-filters operations
pub type Result<T> = std::result::Result<T, FilterError>;

/// Main error type for audio-filters operations
#[derive(Error, Debug)]
pub enum FilterError {
    // Transform errors
    #[error("Invalid fade length {fade_length} for a sound of {len} samples (expected 1..={len})")]
    InvalidFadeLength { fade_length: usize, len: usize },

    #[error("Sound contains no samples")]
    EmptySound,

    #[error("Sample index {index} out of range for a sound of {len} samples")]
    IndexOutOfRange { index: usize, len: usize },

    // Command errors
    #[error("Unknown filter: {name}")]
    UnknownFilter { name: String },

    #[error("Filter {filter} requires a value for {param}")]
    MissingParameter {
        filter: &'static str,
        param: &'static str,
    },

    #[error("Invalid value for {param}: {value} (must be a positive integer)")]
    InvalidParameter { param: &'static str, value: i64 },

    // File errors
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read audio file: {path}")]
    AudioRead {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Failed to write audio file: {path}")]
    AudioWrite {
        path: String,
        #[source]
        source: hound::Error,
    },

    #[error("Unsupported audio format: {details}")]
    UnsupportedFormat { details: String },

    // Playback errors
    #[error("Playback failed: {details}")]
    Playback { details: String },

    // Configuration errors
    #[error("Configuration error: {details}")]
    Config { details: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FilterError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            FilterError::InvalidFadeLength { .. } => "INVALID_FADE_LENGTH",
            FilterError::EmptySound => "EMPTY_SOUND",
            FilterError::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            FilterError::UnknownFilter { .. } => "UNKNOWN_FILTER",
            FilterError::MissingParameter { .. } => "MISSING_PARAMETER",
            FilterError::InvalidParameter { .. } => "INVALID_PARAMETER",
            FilterError::FileNotFound { .. } => "FILE_NOT_FOUND",
            FilterError::AudioRead { .. } => "AUDIO_READ_ERROR",
            FilterError::AudioWrite { .. } => "AUDIO_WRITE_ERROR",
            FilterError::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            FilterError::Playback { .. } => "PLAYBACK_ERROR",
            FilterError::Config { .. } => "CONFIG_ERROR",
            FilterError::Io(_) => "IO_ERROR",
            FilterError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Returns a suggested recovery action for this error
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            Self::InvalidFadeLength { .. } => {
                "Choose a fade length between 1 and the number of samples in the sound"
            }
            Self::EmptySound => "Load a sound with at least one sample",
            Self::UnknownFilter { .. } => "Run 'audio-filters list' to see the available filters",
            Self::MissingParameter { .. } | Self::InvalidParameter { .. } => {
                "Pass a positive integer with --param"
            }
            Self::FileNotFound { .. } => "Check the file path is correct",
            Self::AudioRead { .. } => "Check that the file is a valid PCM WAV file",
            Self::UnsupportedFormat { .. } => "Convert to an integer PCM mono or stereo WAV",
            Self::Playback { .. } => {
                "Check that an audio output device is connected, or display the waveform instead"
            }
            Self::Config { .. } => "Fix the configuration file or remove --config",
            _ => "Check the error details and try again",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = FilterError::FileNotFound {
            path: "test.wav".to_string(),
        };
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
        assert_eq!(FilterError::EmptySound.error_code(), "EMPTY_SOUND");
    }

    #[test]
    fn test_fade_length_message() {
        let err = FilterError::InvalidFadeLength {
            fade_length: 12,
            len: 10,
        };
        assert_eq!(
            err.to_string(),
            "Invalid fade length 12 for a sound of 10 samples (expected 1..=10)"
        );
        assert!(err.recovery_hint().contains("fade length"));
    }

    #[test]
    fn test_playback_error() {
        let err = FilterError::Playback {
            details: "no default output device".to_string(),
        };
        assert_eq!(err.error_code(), "PLAYBACK_ERROR");
        assert_eq!(err.to_string(), "Playback failed: no default output device");
        assert!(err.recovery_hint().contains("output device"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: FilterError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
