//! Player settings
//!
//! Layered from an optional TOML file and `JUKEBOX_*` environment variables.

use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerSettings {
    #[serde(default = "default_toolbar")]
    pub toolbar: ToolbarSettings,

    #[serde(default = "default_images")]
    pub images: ImageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ToolbarSettings {
    /// Name of the root toggle control
    #[serde(default = "default_toolbar_name")]
    pub name: String,

    /// Key that toggles the control surface open and closed
    #[serde(default)]
    pub toggle_key: Option<String>,

    /// Title label text before anything has played
    #[serde(default = "default_title_placeholder")]
    pub title_placeholder: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ImageSettings {
    #[serde(default = "default_icon_image")]
    pub icon: String,

    #[serde(default = "default_play_image")]
    pub play: String,

    #[serde(default = "default_pause_image")]
    pub pause: String,

    #[serde(default = "default_rewind_image")]
    pub rewind: String,

    #[serde(default = "default_fast_forward_image")]
    pub fast_forward: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaybackSettings {
    /// Seconds after which rewind restarts the current track
    #[serde(default = "default_restart_threshold_secs")]
    pub restart_threshold_secs: f64,

    /// Audio group the audio object is routed through, if any
    #[serde(default)]
    pub audio_group: Option<String>,
}

impl PlaybackSettings {
    pub fn restart_threshold(&self) -> Duration {
        Duration::try_from_secs_f64(self.restart_threshold_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_restart_threshold_secs()))
    }
}

impl PlayerSettings {
    /// Load settings from an optional TOML file, then `JUKEBOX_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        // JUKEBOX_PLAYBACK__RESTART_THRESHOLD_SECS=3
        settings = settings.add_source(
            config::Environment::with_prefix("JUKEBOX")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        let settings: Self = config
            .try_deserialize()
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.toolbar.name.trim().is_empty() {
            return Err(PlayerError::Config("toolbar name cannot be empty".into()));
        }

        let threshold = self.playback.restart_threshold_secs;
        if Duration::try_from_secs_f64(threshold).is_err() {
            return Err(PlayerError::Config(format!(
                "restart threshold must be a non-negative number of seconds, got {threshold}"
            )));
        }

        Ok(())
    }
}

// Default values
fn default_toolbar() -> ToolbarSettings {
    ToolbarSettings {
        name: default_toolbar_name(),
        toggle_key: None,
        title_placeholder: default_title_placeholder(),
    }
}

fn default_toolbar_name() -> String {
    "Music".to_string()
}

fn default_title_placeholder() -> String {
    "Nothing playing".to_string()
}

fn default_images() -> ImageSettings {
    ImageSettings {
        icon: default_icon_image(),
        play: default_play_image(),
        pause: default_pause_image(),
        rewind: default_rewind_image(),
        fast_forward: default_fast_forward_image(),
    }
}

fn default_icon_image() -> String {
    "rbxassetid://6026660085".to_string()
}

fn default_play_image() -> String {
    "rbxassetid://6026663699".to_string()
}

fn default_pause_image() -> String {
    "rbxassetid://6026663719".to_string()
}

fn default_rewind_image() -> String {
    "rbxassetid://6026667011".to_string()
}

fn default_fast_forward_image() -> String {
    "rbxassetid://6026667003".to_string()
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        restart_threshold_secs: default_restart_threshold_secs(),
        audio_group: None,
    }
}

fn default_restart_threshold_secs() -> f64 {
    5.0
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            toolbar: default_toolbar(),
            images: default_images(),
            playback: default_playback(),
        }
    }
}
