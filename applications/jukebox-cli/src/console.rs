/// Console host framework
///
/// Keeps every control the player creates in a shared table and renders the
/// toolbar as one line of text. Clicks are replayed through the bindings the
/// player registered, so they take the same path a real toolbar click would.
use crate::audio::{AudioHandle, SimulatedAudio, SimulatedGroup};
use jukebox_playback::{
    AudioGroup, AudioObject, ClickBinding, Control, ControlAction, ControlId, ControlKind,
    HostFramework, Result,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct ControlView {
    kind: ControlKind,
    name: String,
    label: Option<String>,
    image: Option<String>,
    caption: Option<String>,
    toggle_key: Option<String>,
    menu: Vec<ControlId>,
    click: Option<ClickBinding>,
}

impl ControlView {
    fn new(kind: ControlKind, name: &str) -> Self {
        Self {
            kind,
            name: name.to_string(),
            label: None,
            image: None,
            caption: None,
            toggle_key: None,
            menu: Vec::new(),
            click: None,
        }
    }

    fn text(&self) -> &str {
        self.label
            .as_deref()
            .or(self.caption.as_deref())
            .unwrap_or(&self.name)
    }
}

type ControlTable = Arc<Mutex<BTreeMap<ControlId, ControlView>>>;

fn lock(table: &ControlTable) -> MutexGuard<'_, BTreeMap<ControlId, ControlView>> {
    table.lock().unwrap_or_else(|e| e.into_inner())
}

/// Shared view of the console toolbar, kept by the command loop
#[derive(Debug, Clone, Default)]
pub struct Toolbar {
    controls: ControlTable,
    audio: AudioHandle,
}

impl Toolbar {
    pub fn audio(&self) -> &AudioHandle {
        &self.audio
    }

    /// Fire the click binding registered for `action`
    pub fn click(&self, action: ControlAction) -> bool {
        let controls = lock(&self.controls);
        controls
            .values()
            .filter_map(|c| c.click.as_ref())
            .find(|binding| binding.action() == action)
            .is_some_and(ClickBinding::fire)
    }

    /// One-line rendering, root first and then its menu
    pub fn render(&self) -> String {
        let controls = lock(&self.controls);
        let Some(root) = controls.values().find(|c| c.kind == ControlKind::Toggle) else {
            return "(no toolbar)".to_string();
        };

        let mut line = format!("[{}]", root.text());
        if let Some(key) = &root.toggle_key {
            let _ = write!(line, " ({key})");
        }
        for id in &root.menu {
            if let Some(child) = controls.get(id) {
                let _ = write!(line, " | {}", child.text());
            }
        }
        line
    }

    pub fn is_empty(&self) -> bool {
        lock(&self.controls).is_empty()
    }
}

pub struct ConsoleControl {
    id: ControlId,
    controls: ControlTable,
}

impl ConsoleControl {
    fn update<F: FnOnce(&mut ControlView)>(&self, f: F) {
        if let Some(view) = lock(&self.controls).get_mut(&self.id) {
            f(view);
        }
    }
}

impl Control for ConsoleControl {
    fn id(&self) -> ControlId {
        self.id
    }

    fn set_label(&mut self, text: &str) {
        trace!(id = self.id.0, text, "label");
        self.update(|v| v.label = Some(text.to_string()));
    }

    fn set_image(&mut self, image: &str) {
        self.update(|v| v.image = Some(image.to_string()));
    }

    fn set_caption(&mut self, caption: &str) {
        trace!(id = self.id.0, caption, "caption");
        self.update(|v| v.caption = Some(caption.to_string()));
    }

    fn lock(&mut self) {}

    fn set_one_click(&mut self, _one_click: bool) {}

    fn bind_click(&mut self, binding: ClickBinding) {
        self.update(|v| v.click = Some(binding));
    }

    fn bind_toggle_key(&mut self, key: &str) {
        self.update(|v| v.toggle_key = Some(key.to_string()));
    }

    fn set_menu(&mut self, children: &[ControlId]) {
        self.update(|v| v.menu = children.to_vec());
    }

    fn destroy(&mut self) {
        if let Some(view) = lock(&self.controls).remove(&self.id) {
            debug!("Removed control '{}'", view.name);
        }
    }
}

/// Host that creates console controls and simulated audio
#[derive(Default)]
pub struct ConsoleHost {
    toolbar: Toolbar,
    next_id: u64,
}

impl ConsoleHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle that stays valid after the host moves into the player
    pub fn toolbar(&self) -> Toolbar {
        self.toolbar.clone()
    }
}

impl HostFramework for ConsoleHost {
    fn create_control(&mut self, kind: ControlKind, name: &str) -> Result<Box<dyn Control>> {
        self.next_id += 1;
        let id = ControlId(self.next_id);
        lock(&self.toolbar.controls).insert(id, ControlView::new(kind, name));
        debug!("Created {:?} control '{}' as {:?}", kind, name, id);

        Ok(Box::new(ConsoleControl {
            id,
            controls: self.toolbar.controls.clone(),
        }))
    }

    fn create_audio(&mut self) -> Result<Box<dyn AudioObject>> {
        Ok(Box::new(SimulatedAudio::new(self.toolbar.audio.clone())))
    }

    fn create_audio_group(&mut self, name: &str) -> Result<Box<dyn AudioGroup>> {
        Ok(Box::new(SimulatedGroup::new(name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogEntry, JsonCatalog};
    use jukebox_playback::{events, LoadOptions, Player, PlayerEvent, PlayerSettings};

    #[test]
    fn test_render_follows_menu_order() {
        let mut host = ConsoleHost::new();
        let toolbar = host.toolbar();

        let mut root = host.create_control(ControlKind::Toggle, "Music").unwrap();
        let mut title = host.create_control(ControlKind::Label, "Title").unwrap();
        let play = host.create_control(ControlKind::Button, "Play").unwrap();
        title.set_label("Boss Fight");
        root.bind_toggle_key("M");
        root.set_menu(&[title.id(), play.id()]);

        assert_eq!(toolbar.render(), "[Music] (M) | Boss Fight | Play");
    }

    #[test]
    fn test_click_goes_through_binding() {
        let (tx, mut rx) = events::channel();
        let mut host = ConsoleHost::new();
        let toolbar = host.toolbar();

        let mut rewind = host.create_control(ControlKind::Button, "Rewind").unwrap();
        rewind.bind_click(ClickBinding::new(ControlAction::Rewind, tx));

        assert!(toolbar.click(ControlAction::Rewind));
        assert!(!toolbar.click(ControlAction::FastForward));
        assert_eq!(
            rx.try_recv().unwrap(),
            PlayerEvent::Clicked(ControlAction::Rewind)
        );
    }

    #[test]
    fn test_destroy_removes_control() {
        let mut host = ConsoleHost::new();
        let toolbar = host.toolbar();

        let mut root = host.create_control(ControlKind::Toggle, "Music").unwrap();
        assert!(!toolbar.is_empty());
        root.destroy();
        assert!(toolbar.is_empty());
        assert_eq!(toolbar.render(), "(no toolbar)");
    }

    #[tokio::test]
    async fn test_player_drives_toolbar() {
        let host = ConsoleHost::new();
        let toolbar = host.toolbar();
        let catalog = JsonCatalog::new(
            vec![
                CatalogEntry {
                    id: 1,
                    name: "One".into(),
                },
                CatalogEntry {
                    id: 2,
                    name: "Two".into(),
                },
            ],
            false,
        );

        let mut player = Player::new(PlayerSettings::default(), Arc::new(catalog));
        player.init(Box::new(host)).unwrap();
        assert_eq!(
            toolbar.render(),
            "[Music] | Nothing playing | Rewind | Play | Fast-forward"
        );

        player
            .load_tracks(&["1", "2"], LoadOptions::default().autostart(true))
            .await
            .unwrap();
        assert_eq!(
            toolbar.render(),
            "[Music] | One | Rewind | Pause | Fast-forward"
        );
        assert!(toolbar.audio().is_playing());

        assert!(toolbar.click(ControlAction::FastForward));
        player.process_pending();
        assert!(toolbar.render().contains("| Two |"));

        player.destroy();
        assert!(toolbar.is_empty());
    }

    #[tokio::test]
    async fn test_single_track_end_replays_from_start() {
        let host = ConsoleHost::new();
        let toolbar = host.toolbar();
        let catalog = JsonCatalog::new(Vec::new(), true);

        let mut player = Player::new(PlayerSettings::default(), Arc::new(catalog));
        player.init(Box::new(host)).unwrap();
        player
            .load_tracks(&["42"], LoadOptions::default().autostart(true))
            .await
            .unwrap();
        player.process_pending();

        toolbar.audio().seek(std::time::Duration::from_secs(180));
        assert!(toolbar.audio().finish());
        player.process_pending();

        assert!(toolbar.audio().is_playing());
        assert_eq!(toolbar.audio().position(), std::time::Duration::ZERO);
        assert_eq!(
            toolbar.audio().source().as_deref(),
            Some("rbxassetid://42")
        );
        assert!(toolbar.render().contains("| Asset 42 |"));
    }
}
