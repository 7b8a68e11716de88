//! Test helpers and fakes for player integration tests
//!
//! Every fake records what was done to it in shared state so tests can
//! inspect it after handing ownership to the player.

#![allow(dead_code)]

use async_trait::async_trait;
use jukebox_playback::{
    AudioGroup, AudioNotifier, AudioObject, ClickBinding, Control, ControlAction, ControlId,
    ControlKind, HostFramework, MetadataLookup, PlayerError, Result, SourceId,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ============================================================================
// AUDIO
// ============================================================================

#[derive(Debug, Default)]
pub struct AudioLog {
    pub source: Option<String>,
    pub position: Duration,
    pub playing: bool,
    pub stopped: bool,
    pub released: bool,
    pub group: Option<String>,
    pub fail_play: bool,
    pub notifier: Option<AudioNotifier>,
}

/// Audio object that behaves like the host's: reassigning the same source
/// keeps the playhead, a new source starts from zero
pub struct FakeAudio {
    log: Arc<Mutex<AudioLog>>,
    source: Option<String>,
}

impl FakeAudio {
    pub fn new(log: Arc<Mutex<AudioLog>>) -> Self {
        Self { log, source: None }
    }
}

impl AudioObject for FakeAudio {
    fn source_id(&self) -> Option<&str> {
        self.source.as_deref()
    }

    fn set_source_id(&mut self, id: &SourceId) -> Result<()> {
        if self.source.as_deref() != Some(id.as_str()) {
            self.source = Some(id.to_string());
            let mut log = self.log.lock().unwrap();
            log.source = Some(id.to_string());
            log.position = Duration::ZERO;
        }
        Ok(())
    }

    fn position(&self) -> Duration {
        self.log.lock().unwrap().position
    }

    fn set_position(&mut self, position: Duration) -> Result<()> {
        self.log.lock().unwrap().position = position;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        if log.fail_play {
            return Err(PlayerError::Audio("playback refused".into()));
        }
        log.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.log.lock().unwrap().playing = false;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.playing = false;
        log.stopped = true;
        Ok(())
    }

    fn subscribe(&mut self, notifier: AudioNotifier) {
        self.log.lock().unwrap().notifier = Some(notifier);
    }

    fn set_group(&mut self, group: &dyn AudioGroup) {
        self.log.lock().unwrap().group = Some(group.name().to_string());
    }

    fn release(&mut self) {
        self.log.lock().unwrap().released = true;
    }
}

pub struct FakeGroup {
    name: String,
    released: Arc<Mutex<Vec<String>>>,
}

impl AudioGroup for FakeGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn release(&mut self) {
        self.released.lock().unwrap().push(self.name.clone());
    }
}

// ============================================================================
// CONTROLS
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ControlLog {
    pub kind: Option<ControlKind>,
    pub name: String,
    pub label: Option<String>,
    pub image: Option<String>,
    pub caption: Option<String>,
    pub locked: bool,
    pub one_click: bool,
    pub toggle_key: Option<String>,
    pub menu: Vec<ControlId>,
    pub destroyed: bool,
    pub click: Option<ClickBinding>,
}

pub struct FakeControl {
    id: ControlId,
    log: Arc<Mutex<HashMap<ControlId, ControlLog>>>,
}

impl FakeControl {
    fn with<F: FnOnce(&mut ControlLog)>(&self, f: F) {
        let mut controls = self.log.lock().unwrap();
        f(controls.entry(self.id).or_default());
    }
}

impl Control for FakeControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn set_label(&mut self, text: &str) {
        self.with(|c| c.label = Some(text.to_string()));
    }

    fn set_image(&mut self, image: &str) {
        self.with(|c| c.image = Some(image.to_string()));
    }

    fn set_caption(&mut self, caption: &str) {
        self.with(|c| c.caption = Some(caption.to_string()));
    }

    fn lock(&mut self) {
        self.with(|c| c.locked = true);
    }

    fn set_one_click(&mut self, one_click: bool) {
        self.with(|c| c.one_click = one_click);
    }

    fn bind_click(&mut self, binding: ClickBinding) {
        self.with(|c| c.click = Some(binding));
    }

    fn bind_toggle_key(&mut self, key: &str) {
        self.with(|c| c.toggle_key = Some(key.to_string()));
    }

    fn set_menu(&mut self, children: &[ControlId]) {
        self.with(|c| c.menu = children.to_vec());
    }

    fn destroy(&mut self) {
        self.with(|c| c.destroyed = true);
    }
}

// ============================================================================
// HOST
// ============================================================================

/// Shared view of everything a [`FakeHost`] created
#[derive(Clone, Default)]
pub struct HostLog {
    pub audio: Arc<Mutex<AudioLog>>,
    pub controls: Arc<Mutex<HashMap<ControlId, ControlLog>>>,
    pub released_groups: Arc<Mutex<Vec<String>>>,
}

impl HostLog {
    pub fn control_named(&self, name: &str) -> ControlLog {
        self.controls
            .lock()
            .unwrap()
            .values()
            .find(|c| c.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("no control named {name}"))
    }

    pub fn control(&self, id: ControlId) -> ControlLog {
        self.controls.lock().unwrap()[&id].clone()
    }

    pub fn play_pause(&self) -> ControlLog {
        self.control_named("Play")
    }

    pub fn title(&self) -> Option<String> {
        self.control_named("Title").label
    }

    /// Simulate a user click on a transport button
    pub fn click(&self, action: ControlAction) -> bool {
        let controls = self.controls.lock().unwrap();
        controls
            .values()
            .filter_map(|c| c.click.as_ref())
            .find(|b| b.action() == action)
            .map(ClickBinding::fire)
            .unwrap_or(false)
    }

    /// Simulate the audio object notifying on its own
    pub fn notifier(&self) -> AudioNotifier {
        self.audio
            .lock()
            .unwrap()
            .notifier
            .clone()
            .expect("audio object was never subscribed")
    }

    pub fn set_position(&self, seconds: f64) {
        self.audio.lock().unwrap().position = Duration::from_secs_f64(seconds);
    }

    pub fn source(&self) -> Option<String> {
        self.audio.lock().unwrap().source.clone()
    }

    pub fn audio_playing(&self) -> bool {
        self.audio.lock().unwrap().playing
    }
}

pub struct FakeHost {
    log: HostLog,
    next_id: AtomicU64,
    pub ready: bool,
    pub fail_control: Option<String>,
}

impl FakeHost {
    pub fn new() -> (Self, HostLog) {
        let log = HostLog::default();
        (
            Self {
                log: log.clone(),
                next_id: AtomicU64::new(1),
                ready: true,
                fail_control: None,
            },
            log,
        )
    }

    pub fn boxed() -> (Box<dyn HostFramework>, HostLog) {
        let (host, log) = Self::new();
        (Box::new(host), log)
    }
}

impl HostFramework for FakeHost {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn create_control(&mut self, kind: ControlKind, name: &str) -> Result<Box<dyn Control>> {
        if self.fail_control.as_deref() == Some(name) {
            return Err(PlayerError::Surface(format!("cannot create {name}")));
        }

        let id = ControlId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.log.controls.lock().unwrap().insert(
            id,
            ControlLog {
                kind: Some(kind),
                name: name.to_string(),
                ..ControlLog::default()
            },
        );
        Ok(Box::new(FakeControl {
            id,
            log: self.log.controls.clone(),
        }))
    }

    fn create_audio(&mut self) -> Result<Box<dyn AudioObject>> {
        Ok(Box::new(FakeAudio::new(self.log.audio.clone())))
    }

    fn create_audio_group(&mut self, name: &str) -> Result<Box<dyn AudioGroup>> {
        Ok(Box::new(FakeGroup {
            name: name.to_string(),
            released: self.log.released_groups.clone(),
        }))
    }
}

// ============================================================================
// METADATA
// ============================================================================

/// Names every asset "Song <id>" unless told otherwise
#[derive(Default)]
pub struct FakeCatalog {
    pub missing: Vec<u64>,
    pub failing: Vec<u64>,
    pub calls: Mutex<Vec<u64>>,
}

impl FakeCatalog {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn missing(ids: &[u64]) -> Arc<Self> {
        Arc::new(Self {
            missing: ids.to_vec(),
            ..Self::default()
        })
    }

    pub fn failing(ids: &[u64]) -> Arc<Self> {
        Arc::new(Self {
            failing: ids.to_vec(),
            ..Self::default()
        })
    }

    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetadataLookup for FakeCatalog {
    async fn product_name(&self, asset_id: u64) -> Result<Option<String>> {
        self.calls.lock().unwrap().push(asset_id);
        if self.failing.contains(&asset_id) {
            return Err(PlayerError::Lookup(format!("asset {asset_id} unavailable")));
        }
        if self.missing.contains(&asset_id) {
            return Ok(None);
        }
        Ok(Some(format!("Song {asset_id}")))
    }
}

/// Raw ids `"1".."n"`
pub fn ids(n: u64) -> Vec<String> {
    (1..=n).map(|i| i.to_string()).collect()
}
