//! Jukebox - Playback Control
//!
//! Playlist-driven playback controller for toolbar music players.
//!
//! This crate provides:
//! - Source id validation (`rbxassetid://<digits>`)
//! - Asynchronous track name resolution through a metadata capability
//! - All-or-nothing playlist loading with optional shuffle
//! - A transport state machine (play/pause, rewind-or-restart, skip, auto-advance)
//! - A control surface binding that mirrors playback state onto toolbar controls
//!
//! # Architecture
//!
//! `jukebox-playback` never touches real audio or UI. The host provides:
//! - [`AudioObject`] - play/pause/stop, a source id and a playhead
//! - [`MetadataLookup`] - display names for asset ids
//! - [`HostFramework`] / [`Control`] - toolbar controls
//!
//! Clicks and audio notifications flow back into the [`Player`] over one
//! channel, so they are always handled serially.
//!
//! # Example: Loading and Playing
//!
//! ```rust,no_run
//! use jukebox_playback::{LoadOptions, MetadataLookup, Player, PlayerSettings, Result};
//! use std::sync::Arc;
//!
//! struct Catalog;
//!
//! #[async_trait::async_trait]
//! impl MetadataLookup for Catalog {
//!     async fn product_name(&self, asset_id: u64) -> Result<Option<String>> {
//!         Ok(Some(format!("Track {asset_id}")))
//!     }
//! }
//!
//! # async fn demo(host: Box<dyn jukebox_playback::HostFramework>) -> Result<()> {
//! let mut player = Player::new(PlayerSettings::default(), Arc::new(Catalog));
//! player.init(host)?;
//!
//! player
//!     .load_tracks(&["1843404009", "rbxassetid://1845554017"], LoadOptions::default().autostart(true))
//!     .await?;
//!
//! player.fast_forward();
//! player.toggle_music(false, false);
//! player.destroy();
//! # Ok(())
//! # }
//! ```

mod audio;
mod controller;
mod error;
pub mod events;
mod player;
mod playlist;
mod resolver;
mod settings;
pub mod shuffle;
mod surface;
pub mod types;
pub mod validator;

// Public exports
pub use audio::{AudioGroup, AudioObject};
pub use controller::{PlaybackController, DEFAULT_RESTART_THRESHOLD};
pub use error::{PlayerError, Result};
pub use events::{AudioNotifier, ClickBinding, ControlAction, PlaybackEvent, PlayerEvent};
pub use player::Player;
pub use playlist::{Playlist, PlaylistBuilder};
pub use resolver::{MetadataLookup, NameResolver};
pub use settings::{ImageSettings, PlaybackSettings, PlayerSettings, ToolbarSettings};
pub use surface::{play_pause_face, Control, ControlId, ControlKind, ControlSurface, HostFramework};
pub use types::{LoadOptions, LoadOutcome, PlaybackState, Track, TransportState};
pub use validator::{SourceId, SOURCE_PREFIX};
