//! Core error types for schoolbell-core.
//!
//! Expected edge cases (malformed time strings, invalid periods, an empty
//! schedule, a denied playback attempt) are never surfaced as errors -- the
//! schedule model degrades leniently and the audio path falls back and logs.
//! These types cover the remaining failures: storage writes, audio device
//! setup, and serialization.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for schoolbell-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Audio-related errors
    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No platform config directory could be resolved
    #[error("No config directory available on this platform")]
    NoConfigDir,

    /// Failed to write a value
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: PathBuf, message: String },

    /// Failed to serialize a value
    #[error("Failed to encode value for '{key}': {message}")]
    EncodeFailed { key: String, message: String },
}

/// Audio-specific errors.
#[derive(Error, Debug)]
pub enum AudioError {
    /// No audio output device could be opened
    #[error("Failed to open audio output: {0}")]
    OutputUnavailable(String),

    /// The dedicated audio thread is gone
    #[error("Audio thread is not running")]
    ThreadStopped,

    /// Failed to spawn the audio thread
    #[error("Failed to spawn audio thread: {0}")]
    SpawnFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
