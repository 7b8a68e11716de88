//! Error types for the jukebox player

use thiserror::Error;

/// Player errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerError {
    /// Source identifier does not match `rbxassetid://<digits>`
    #[error("Malformed source id: {0:?}")]
    MalformedId(String),

    /// Metadata lookup produced no usable name for a track
    #[error("Could not resolve a name for {0}")]
    NameResolution(String),

    /// The metadata capability itself failed
    #[error("Metadata lookup failed: {0}")]
    Lookup(String),

    /// Operation used before `init` completed
    #[error("Player is not initialized")]
    Uninitialized,

    /// `init` called on a live player
    #[error("Player is already initialized")]
    AlreadyInitialized,

    /// Playlist empty or index out of range when playback was attempted
    #[error("No current track (index {index}, playlist length {len})")]
    MissingCurrentTrack { index: usize, len: usize },

    /// Audio object rejected an operation
    #[error("Audio object error: {0}")]
    Audio(String),

    /// Host framework failed to create or mutate a control
    #[error("Control surface error: {0}")]
    Surface(String),

    /// Host framework is unusable
    #[error("Invalid host framework: {0}")]
    InvalidHost(String),

    /// Settings could not be loaded or are out of range
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for player operations
pub type Result<T> = std::result::Result<T, PlayerError>;
