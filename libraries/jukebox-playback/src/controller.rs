//! Playback controller - the transport state machine
//!
//! Owns the playlist, the current index and the play/pause mirror of the
//! audio object. Every transport call comes in two flavours: a `try_*`
//! method returning [`Result`], and a plain method that downgrades failures
//! to a warning so a failed click never reaches the caller.

use crate::{
    audio::AudioObject,
    error::{PlayerError, Result},
    events::PlaybackEvent,
    playlist::Playlist,
    types::{PlaybackState, Track, TransportState},
    validator::validate,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Default elapsed time after which rewind restarts the current track
pub const DEFAULT_RESTART_THRESHOLD: Duration = Duration::from_secs(5);

/// Transport state machine
pub struct PlaybackController {
    // State
    playlist: Playlist,
    current_index: usize,
    is_playing: bool,
    transport: TransportState,

    // Settings
    restart_threshold: Duration,

    audio: Option<Box<dyn AudioObject>>,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_RESTART_THRESHOLD)
    }
}

impl PlaybackController {
    pub fn new(restart_threshold: Duration) -> Self {
        Self {
            playlist: Playlist::default(),
            current_index: 0,
            is_playing: false,
            transport: TransportState::Stopped,
            restart_threshold,
            audio: None,
            pending_events: Vec::new(),
        }
    }

    // ===== Audio Object =====

    pub fn attach_audio(&mut self, audio: Box<dyn AudioObject>) {
        self.audio = Some(audio);
    }

    /// Hand the audio object back to the caller for teardown
    pub fn detach_audio(&mut self) -> Option<Box<dyn AudioObject>> {
        self.audio.take()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    fn audio_mut(&mut self) -> Result<&mut dyn AudioObject> {
        let audio: &mut dyn AudioObject = self
            .audio
            .as_deref_mut()
            .ok_or(PlayerError::Uninitialized)?;
        Ok(audio)
    }

    // ===== Playlist =====

    /// Commit a freshly built playlist
    ///
    /// The index always resets to the first track.
    pub fn set_playlist(&mut self, playlist: Playlist) {
        self.playlist = playlist;
        self.current_index = 0;
        self.emit(PlaybackEvent::PlaylistChanged {
            length: self.playlist.len(),
        });
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Drop the playlist and rewind the index
    pub fn clear(&mut self) {
        self.playlist.clear();
        self.current_index = 0;
        self.is_playing = false;
        self.transport = TransportState::Stopped;
    }

    // ===== Transport =====

    /// Start or pause playback, logging instead of failing
    pub fn toggle(&mut self, enable: bool, restart: bool) {
        if let Err(e) = self.try_toggle(enable, restart) {
            warn!(enable, restart, "Toggle failed: {}", e);
        }
    }

    /// Start or pause playback
    ///
    /// On error `is_playing` is left as it was.
    pub fn try_toggle(&mut self, enable: bool, restart: bool) -> Result<()> {
        if enable {
            self.start_current(restart)
        } else {
            self.audio_mut()?.pause()?;
            self.set_playing(false);
            Ok(())
        }
    }

    fn start_current(&mut self, restart: bool) -> Result<()> {
        let index = self.current_index;
        let track = self
            .playlist
            .get(index)
            .cloned()
            .ok_or(PlayerError::MissingCurrentTrack {
                index,
                len: self.playlist.len(),
            })?;
        validate(track.id.as_str())?;

        // Title label follows the current track even if the audio call fails
        self.emit(PlaybackEvent::TrackChanged {
            index,
            track_id: track.id.to_string(),
            name: track.name.clone(),
        });

        let audio = self.audio_mut()?;
        if restart {
            audio.reset()?;
        }
        audio.set_source_id(&track.id)?;
        audio.play()?;

        debug!(index, "Playing {} ({})", track.name, track.id);
        self.set_playing(true);
        Ok(())
    }

    /// Restart the current track, or step back when near its start
    pub fn rewind(&mut self) {
        if let Err(e) = self.try_rewind() {
            warn!("Rewind failed: {}", e);
        }
    }

    /// Restart the current track if past the threshold, otherwise move to
    /// the previous track (wrapping to the last) and start it from zero
    pub fn try_rewind(&mut self) -> Result<()> {
        if self.current_track().is_some() && self.position() > self.restart_threshold {
            debug!("Restarting current track");
            return self.try_toggle(true, true);
        }

        self.current_index = self.playlist.previous_index(self.current_index);
        self.try_toggle(true, true)
    }

    /// Skip to the next track, wrapping to the first
    pub fn fast_forward(&mut self) {
        if let Err(e) = self.try_fast_forward() {
            warn!("Fast-forward failed: {}", e);
        }
    }

    pub fn try_fast_forward(&mut self) -> Result<()> {
        self.current_index = self.playlist.next_index(self.current_index);
        self.try_toggle(true, true)
    }

    // ===== Audio Notifications =====

    /// Current source finished; advance and keep playing
    ///
    /// The next track starts from zero even when it has the same source id as
    /// the one that just ended (single-track playlists, repeated entries).
    pub fn on_track_ended(&mut self) {
        let finished = self.current_track().map(|track| track.id.clone());
        if let Some(id) = &finished {
            self.emit(PlaybackEvent::TrackFinished {
                track_id: id.to_string(),
            });
        }

        self.current_index = self.playlist.next_index(self.current_index);
        let replay = finished.is_some() && self.current_track().map(|t| &t.id) == finished.as_ref();
        self.toggle(true, replay);
    }

    /// Audio object paused, possibly by someone else
    pub fn on_audio_paused(&mut self) {
        self.set_playing(false);
    }

    /// Audio object resumed, possibly by someone else
    pub fn on_audio_resumed(&mut self) {
        self.set_playing(true);
    }

    /// Audio object started a source, possibly by someone else
    pub fn on_audio_played(&mut self) {
        self.set_playing(true);
    }

    fn set_playing(&mut self, is_playing: bool) {
        let state = if is_playing {
            TransportState::Playing
        } else if self.transport == TransportState::Stopped && !self.is_playing {
            TransportState::Stopped
        } else {
            TransportState::Paused
        };

        if self.is_playing == is_playing && self.transport == state {
            return;
        }

        self.is_playing = is_playing;
        self.transport = state;
        self.emit(PlaybackEvent::StateChanged { state, is_playing });
    }

    // ===== State Queries =====

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.playlist.get(self.current_index)
    }

    /// Elapsed position of the audio object (zero when there is none)
    pub fn position(&self) -> Duration {
        self.audio
            .as_ref()
            .map(|audio| audio.position())
            .unwrap_or(Duration::ZERO)
    }

    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            current_index: self.current_index,
            is_playing: self.is_playing,
            current_source_id: self
                .audio
                .as_ref()
                .and_then(|audio| audio.source_id().map(str::to_string)),
            position: self.position(),
            transport: self.transport,
        }
    }

    pub fn restart_threshold(&self) -> Duration {
        self.restart_threshold
    }

    // ===== Events =====

    fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    /// Take all events emitted since the last call
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }
}
