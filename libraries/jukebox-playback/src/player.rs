//! Player session
//!
//! One owned object per playback session: controller, control surface, host
//! framework and audio resources. Clicks and audio notifications arrive on a
//! single channel and are handled one at a time by [`Player::handle_event`].

use crate::{
    audio::AudioGroup,
    controller::PlaybackController,
    error::{PlayerError, Result},
    events::{self, AudioNotifier, ControlAction, EventReceiver, EventSender, PlayerEvent},
    playlist::PlaylistBuilder,
    resolver::{MetadataLookup, NameResolver},
    settings::PlayerSettings,
    surface::{ControlId, ControlSurface, HostFramework},
    types::{LoadOptions, LoadOutcome, PlaybackState},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Playback session bound to a host toolbar
pub struct Player {
    settings: PlayerSettings,
    controller: PlaybackController,
    resolver: NameResolver,

    // Present only between init and destroy
    host: Option<Box<dyn HostFramework>>,
    surface: Option<ControlSurface>,
    audio_group: Option<Box<dyn AudioGroup>>,

    events_tx: EventSender,
    events_rx: EventReceiver,
}

impl Player {
    pub fn new(settings: PlayerSettings, lookup: Arc<dyn MetadataLookup>) -> Self {
        let (events_tx, events_rx) = events::channel();
        Self {
            controller: PlaybackController::new(settings.playback.restart_threshold()),
            resolver: NameResolver::new(lookup),
            settings,
            host: None,
            surface: None,
            audio_group: None,
            events_tx,
            events_rx,
        }
    }

    // ===== Lifecycle =====

    /// Allocate the audio object and build the control surface
    ///
    /// Nothing is kept if any step fails.
    pub fn init(&mut self, mut host: Box<dyn HostFramework>) -> Result<()> {
        if self.is_initialized() {
            return Err(PlayerError::AlreadyInitialized);
        }
        if !host.is_ready() {
            return Err(PlayerError::InvalidHost(
                "host framework cannot create controls".into(),
            ));
        }

        let mut group = match &self.settings.playback.audio_group {
            Some(name) => Some(host.create_audio_group(name)?),
            None => None,
        };

        let mut audio = match host.create_audio() {
            Ok(audio) => audio,
            Err(e) => {
                if let Some(group) = group.as_mut() {
                    group.release();
                }
                return Err(e);
            }
        };
        if let Some(group) = group.as_deref() {
            audio.set_group(group);
        }
        audio.subscribe(AudioNotifier::new(self.events_tx.clone()));

        let mut surface = match ControlSurface::build(host.as_mut(), &self.settings, &self.events_tx)
        {
            Ok(surface) => surface,
            Err(e) => {
                audio.release();
                if let Some(group) = group.as_mut() {
                    group.release();
                }
                return Err(e);
            }
        };
        surface.show_playing(self.controller.is_playing());
        if let Some(track) = self.controller.current_track() {
            surface.show_title(&track.name);
        }

        info!("Player initialized (icon {:?})", surface.icon());
        self.controller.attach_audio(audio);
        self.surface = Some(surface);
        self.audio_group = group;
        self.host = Some(host);
        Ok(())
    }

    /// Tear everything down; safe to call repeatedly
    pub fn destroy(&mut self) {
        if let Some(mut audio) = self.controller.detach_audio() {
            if let Err(e) = audio.stop() {
                warn!("Failed to stop audio during teardown: {}", e);
            }
            audio.release();
        }

        self.controller.clear();
        // Leftover events refer to the old session
        self.controller.drain_events();
        while self.events_rx.try_recv().is_ok() {}

        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
        if let Some(mut group) = self.audio_group.take() {
            group.release();
        }
        if self.host.take().is_some() {
            info!("Player destroyed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.host.is_some()
    }

    /// Root control handle, if initialized
    pub fn get_icon(&self) -> Option<ControlId> {
        self.surface.as_ref().map(ControlSurface::icon)
    }

    // ===== Playlist =====

    /// Replace the playlist
    ///
    /// Malformed entries fail the call. An unresolvable name aborts the load
    /// with a warning and `LoadOutcome::Aborted`. Either way the previous
    /// playlist is kept.
    pub async fn load_tracks<S: AsRef<str>>(
        &mut self,
        playlist: &[S],
        options: LoadOptions,
    ) -> Result<LoadOutcome> {
        let built = PlaylistBuilder::new(&self.resolver)
            .shuffle(options.shuffle)
            .build(playlist)
            .await;

        let playlist = match built {
            Ok(playlist) => playlist,
            Err(PlayerError::NameResolution(id)) => {
                warn!("Playlist load aborted: could not resolve a name for {}", id);
                return Ok(LoadOutcome::Aborted { id });
            }
            Err(e) => return Err(e),
        };

        let tracks = playlist.len();
        info!(tracks, shuffle = options.shuffle, "Playlist loaded");
        self.controller.set_playlist(playlist);

        if options.autostart {
            self.toggle_music(true, false);
        }
        self.sync_surface();

        Ok(LoadOutcome::Loaded { tracks })
    }

    // ===== Transport =====

    pub fn toggle_music(&mut self, enable: bool, restart: bool) {
        if self.ensure_initialized("toggle") {
            self.controller.toggle(enable, restart);
            self.sync_surface();
        }
    }

    pub fn rewind(&mut self) {
        if self.ensure_initialized("rewind") {
            self.controller.rewind();
            self.sync_surface();
        }
    }

    pub fn fast_forward(&mut self) {
        if self.ensure_initialized("fast-forward") {
            self.controller.fast_forward();
            self.sync_surface();
        }
    }

    fn ensure_initialized(&self, operation: &str) -> bool {
        if self.is_initialized() {
            true
        } else {
            warn!("Ignoring {}: {}", operation, PlayerError::Uninitialized);
            false
        }
    }

    // ===== Events =====

    /// Sender for host adapters that deliver events themselves
    pub fn event_sender(&self) -> EventSender {
        self.events_tx.clone()
    }

    /// Handle one event; returns false once the player shut down
    pub fn handle_event(&mut self, event: PlayerEvent) -> bool {
        debug!(?event, "Handling event");
        match event {
            PlayerEvent::Clicked(ControlAction::Rewind) => self.rewind(),
            PlayerEvent::Clicked(ControlAction::PlayPause) => {
                let enable = !self.controller.is_playing();
                self.toggle_music(enable, false);
            }
            PlayerEvent::Clicked(ControlAction::FastForward) => self.fast_forward(),
            PlayerEvent::AudioEnded => self.controller.on_track_ended(),
            PlayerEvent::AudioPaused => self.controller.on_audio_paused(),
            PlayerEvent::AudioResumed => self.controller.on_audio_resumed(),
            PlayerEvent::AudioPlayed => self.controller.on_audio_played(),
            PlayerEvent::Shutdown => {
                self.destroy();
                return false;
            }
        }
        self.sync_surface();
        true
    }

    /// Handle every queued event without waiting; returns how many ran
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            handled += 1;
            if !self.handle_event(event) {
                break;
            }
        }
        handled
    }

    /// Handle events as they arrive until [`PlayerEvent::Shutdown`]
    pub async fn run(&mut self) {
        while let Some(event) = self.events_rx.recv().await {
            if !self.handle_event(event) {
                break;
            }
        }
    }

    fn sync_surface(&mut self) {
        let events = self.controller.drain_events();
        if let Some(surface) = self.surface.as_mut() {
            for event in &events {
                surface.apply(event);
            }
        }
    }

    // ===== State Queries =====

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    pub fn state(&self) -> PlaybackState {
        self.controller.state()
    }

    pub fn settings(&self) -> &PlayerSettings {
        &self.settings
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.destroy();
    }
}
