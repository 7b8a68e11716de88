/// Simulated audio object
///
/// No sound is produced. The playhead only moves through `seek`, and the end
/// of a track is reported when the user asks for it.
use jukebox_playback::{AudioGroup, AudioNotifier, AudioObject, PlayerError, Result, SourceId};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct AudioState {
    source: Option<String>,
    position: Duration,
    playing: bool,
    released: bool,
    group: Option<String>,
    notifier: Option<AudioNotifier>,
}

/// Handle the command loop keeps to poke the audio object the player owns
#[derive(Debug, Clone, Default)]
pub struct AudioHandle {
    state: Arc<Mutex<AudioState>>,
}

impl AudioHandle {
    fn lock(&self) -> MutexGuard<'_, AudioState> {
        // Fields are independent, poisoning is ignored
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn seek(&self, position: Duration) {
        self.lock().position = position;
    }

    /// Report the current source as finished
    pub fn finish(&self) -> bool {
        let mut state = self.lock();
        if !state.playing {
            return false;
        }
        state.playing = false;
        state.notifier.as_ref().is_some_and(AudioNotifier::ended)
    }

    /// Pause as if the host had done it behind the player's back
    pub fn external_pause(&self) -> bool {
        let mut state = self.lock();
        state.playing = false;
        state.notifier.as_ref().is_some_and(AudioNotifier::paused)
    }

    pub fn position(&self) -> Duration {
        self.lock().position
    }

    pub fn source(&self) -> Option<String> {
        self.lock().source.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.lock().playing
    }

    pub fn group(&self) -> Option<String> {
        self.lock().group.clone()
    }
}

pub struct SimulatedAudio {
    handle: AudioHandle,
    source: Option<String>,
}

impl SimulatedAudio {
    pub fn new(handle: AudioHandle) -> Self {
        Self {
            handle,
            source: None,
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.handle.lock().released {
            return Err(PlayerError::Audio("audio object was released".into()));
        }
        Ok(())
    }
}

impl AudioObject for SimulatedAudio {
    fn source_id(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn set_source_id(&mut self, id: &SourceId) -> Result<()> {
        self.ensure_live()?;
        if self.source.as_deref() == Some(id.as_str()) {
            return Ok(());
        }

        self.source = Some(id.to_string());
        let mut state = self.handle.lock();
        state.source = Some(id.to_string());
        state.position = Duration::ZERO;
        debug!("Source set to {}", id);
        Ok(())
    }

    fn position(&self) -> Duration {
        self.handle.position()
    }

    fn set_position(&mut self, position: Duration) -> Result<()> {
        self.ensure_live()?;
        self.handle.seek(position);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.ensure_live()?;
        let mut state = self.handle.lock();
        let source = state
            .source
            .clone()
            .ok_or_else(|| PlayerError::Audio("no source assigned".into()))?;
        if !state.playing {
            state.playing = true;
            info!("♪ {} from {:.1}s", source, state.position.as_secs_f64());
            if let Some(notifier) = &state.notifier {
                notifier.played();
            }
        }
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.ensure_live()?;
        let mut state = self.handle.lock();
        if state.playing {
            state.playing = false;
            info!("Paused at {:.1}s", state.position.as_secs_f64());
            if let Some(notifier) = &state.notifier {
                notifier.paused();
            }
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut state = self.handle.lock();
        state.playing = false;
        state.position = Duration::ZERO;
        Ok(())
    }

    fn subscribe(&mut self, notifier: AudioNotifier) {
        self.handle.lock().notifier = Some(notifier);
    }

    fn set_group(&mut self, group: &dyn AudioGroup) {
        self.handle.lock().group = Some(group.name().to_string());
    }

    fn release(&mut self) {
        let mut state = self.handle.lock();
        state.released = true;
        state.notifier = None;
        debug!("Audio object released");
    }
}

/// Named mixing group; only its name matters here
pub struct SimulatedGroup {
    name: String,
}

impl SimulatedGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl AudioGroup for SimulatedGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn release(&mut self) {
        debug!("Audio group '{}' released", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jukebox_playback::{events, PlayerEvent};

    fn id(n: u64) -> SourceId {
        SourceId::parse(&n.to_string()).unwrap()
    }

    #[test]
    fn test_same_source_keeps_position() {
        let handle = AudioHandle::default();
        let mut audio = SimulatedAudio::new(handle.clone());

        audio.set_source_id(&id(1)).unwrap();
        handle.seek(Duration::from_secs(12));
        audio.set_source_id(&id(1)).unwrap();
        assert_eq!(audio.position(), Duration::from_secs(12));

        audio.set_source_id(&id(2)).unwrap();
        assert_eq!(audio.position(), Duration::ZERO);
    }

    #[test]
    fn test_play_without_source_fails() {
        let mut audio = SimulatedAudio::new(AudioHandle::default());
        assert!(matches!(audio.play(), Err(PlayerError::Audio(_))));
    }

    #[test]
    fn test_notifications_reach_channel() {
        let (tx, mut rx) = events::channel();
        let handle = AudioHandle::default();
        let mut audio = SimulatedAudio::new(handle.clone());
        audio.subscribe(AudioNotifier::new(tx));

        audio.set_source_id(&id(5)).unwrap();
        audio.play().unwrap();
        audio.pause().unwrap();
        audio.play().unwrap();
        assert!(handle.finish());
        assert!(!handle.finish());

        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::AudioPlayed);
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::AudioPaused);
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::AudioPlayed);
        assert_eq!(rx.try_recv().unwrap(), PlayerEvent::AudioEnded);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_released_object_rejects_calls() {
        let handle = AudioHandle::default();
        let mut audio = SimulatedAudio::new(handle);
        audio.release();
        assert!(audio.set_source_id(&id(1)).is_err());
    }
}
