//! Core types for playback management

use crate::validator::SourceId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable track
///
/// The name is resolved once at load time; tracks are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display name (non-empty)
    pub name: String,

    /// Validated source identifier
    pub id: SourceId,
}

impl Track {
    pub fn new(name: impl Into<String>, id: SourceId) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransportState {
    /// Nothing started yet, or torn down
    Stopped,

    /// Currently playing
    Playing,

    /// Paused mid-track
    Paused,
}

/// Read-only snapshot of the controller's playback state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Index into the current playlist (0-based)
    pub current_index: usize,

    /// Mirrors the audio object's real play/pause state
    pub is_playing: bool,

    /// Source currently assigned to the audio object
    pub current_source_id: Option<String>,

    /// Elapsed position in the current source
    pub position: Duration,

    pub transport: TransportState,
}

/// Options accepted by `load_tracks`
///
/// Every key is optional and unknown keys are ignored, so an empty or
/// unrelated config map is a plain load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Start playing the first track once the playlist is committed
    pub autostart: bool,

    /// Shuffle the playlist before committing it
    pub shuffle: bool,
}

impl LoadOptions {
    pub fn autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

/// Result of a load call that did not fail validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// New playlist committed
    Loaded { tracks: usize },

    /// A name could not be resolved; previous playlist kept
    Aborted { id: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_options_ignore_unknown_keys() {
        let options: LoadOptions = serde_json::from_str(r#"{"volume": 3}"#).unwrap();
        assert_eq!(options, LoadOptions::default());

        let options: LoadOptions = serde_json::from_str(r#"{"shuffle": true}"#).unwrap();
        assert!(options.shuffle);
        assert!(!options.autostart);
    }

    #[test]
    fn load_options_builder() {
        let options = LoadOptions::default().autostart(true).shuffle(true);
        assert!(options.autostart);
        assert!(options.shuffle);
    }

    #[test]
    fn track_creation() {
        let track = Track::new("Theme", SourceId::parse("7").unwrap());
        assert_eq!(track.name, "Theme");
        assert_eq!(track.id.as_str(), "rbxassetid://7");
    }
}
