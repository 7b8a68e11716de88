//! Control surface binding
//!
//! Builds the toolbar control tree through the host framework, routes clicks
//! into the player's event channel, and applies [`PlaybackEvent`]s to the
//! controls.
//!
//! ```text
//! [icon] (toggle root, menu)
//!   ├── title label
//!   ├── rewind
//!   ├── play / pause
//!   └── fast-forward
//! ```

use crate::audio::{AudioGroup, AudioObject};
use crate::error::{PlayerError, Result};
use crate::events::{ClickBinding, ControlAction, EventSender, PlaybackEvent};
use crate::settings::{ImageSettings, PlayerSettings};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Opaque handle for a control created by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ControlId(pub u64);

/// What kind of control to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Toggleable root that opens the menu
    Toggle,

    /// Text-only display
    Label,

    /// Clickable button
    Button,
}

/// Host UI framework capability
pub trait HostFramework: Send {
    /// Whether the host can create controls at all
    fn is_ready(&self) -> bool {
        true
    }

    fn create_control(&mut self, kind: ControlKind, name: &str) -> Result<Box<dyn Control>>;

    fn create_audio(&mut self) -> Result<Box<dyn AudioObject>>;

    fn create_audio_group(&mut self, name: &str) -> Result<Box<dyn AudioGroup>>;
}

/// A single host control
pub trait Control: Send {
    fn id(&self) -> ControlId;

    fn set_label(&mut self, text: &str);

    fn set_image(&mut self, image: &str);

    fn set_caption(&mut self, caption: &str);

    /// Prevent the user from rearranging the control
    fn lock(&mut self);

    /// Fire once per click instead of acting as a toggle
    fn set_one_click(&mut self, one_click: bool);

    fn bind_click(&mut self, binding: ClickBinding);

    fn bind_toggle_key(&mut self, key: &str);

    fn set_menu(&mut self, children: &[ControlId]);

    fn destroy(&mut self);
}

/// Image and caption shown on the play/pause button
pub fn play_pause_face(images: &ImageSettings, is_playing: bool) -> (&str, &'static str) {
    if is_playing {
        (images.pause.as_str(), "Pause")
    } else {
        (images.play.as_str(), "Play")
    }
}

/// The live control tree
pub struct ControlSurface {
    images: ImageSettings,
    root: Box<dyn Control>,
    title: Box<dyn Control>,
    rewind: Box<dyn Control>,
    play_pause: Box<dyn Control>,
    fast_forward: Box<dyn Control>,
}

impl ControlSurface {
    /// Create every control and wire its clicks to `sender`
    ///
    /// Controls created before a failure are destroyed again.
    pub fn build(
        host: &mut dyn HostFramework,
        settings: &PlayerSettings,
        sender: &EventSender,
    ) -> Result<Self> {
        let mut created: Vec<Box<dyn Control>> = Vec::with_capacity(5);
        if let Err(e) = Self::create_controls(host, settings, sender, &mut created) {
            for mut control in created {
                control.destroy();
            }
            return Err(e);
        }

        let [mut root, title, rewind, play_pause, fast_forward]: [Box<dyn Control>; 5] = created
            .try_into()
            .map_err(|_| PlayerError::Surface("control tree incomplete".into()))?;

        root.set_menu(&[
            title.id(),
            rewind.id(),
            play_pause.id(),
            fast_forward.id(),
        ]);
        root.lock();

        debug!("Control surface built under {:?}", root.id());
        Ok(Self {
            images: settings.images.clone(),
            root,
            title,
            rewind,
            play_pause,
            fast_forward,
        })
    }

    /// Pushes the root first, then its children in menu order
    fn create_controls(
        host: &mut dyn HostFramework,
        settings: &PlayerSettings,
        sender: &EventSender,
        created: &mut Vec<Box<dyn Control>>,
    ) -> Result<()> {
        let mut root = host.create_control(ControlKind::Toggle, &settings.toolbar.name)?;
        root.set_image(&settings.images.icon);
        root.set_caption(&settings.toolbar.name);
        if let Some(key) = &settings.toolbar.toggle_key {
            root.bind_toggle_key(key);
        }
        created.push(root);

        let mut title = host.create_control(ControlKind::Label, "Title")?;
        title.set_label(&settings.toolbar.title_placeholder);
        title.lock();
        created.push(title);

        let (play_image, _) = play_pause_face(&settings.images, false);
        let buttons = [
            ("Rewind", settings.images.rewind.as_str(), ControlAction::Rewind),
            ("Play", play_image, ControlAction::PlayPause),
            (
                "Fast-forward",
                settings.images.fast_forward.as_str(),
                ControlAction::FastForward,
            ),
        ];
        for (caption, image, action) in buttons {
            created.push(Self::button(host, caption, image, action, sender)?);
        }

        Ok(())
    }

    fn button(
        host: &mut dyn HostFramework,
        caption: &str,
        image: &str,
        action: ControlAction,
        sender: &EventSender,
    ) -> Result<Box<dyn Control>> {
        let mut button = host.create_control(ControlKind::Button, caption)?;
        button.set_image(image);
        button.set_caption(caption);
        button.set_one_click(true);
        button.bind_click(ClickBinding::new(action, sender.clone()));
        button.lock();
        Ok(button)
    }

    /// Root control handle
    pub fn icon(&self) -> ControlId {
        self.root.id()
    }

    /// Paint the play/pause button for `is_playing`
    pub fn show_playing(&mut self, is_playing: bool) {
        let (image, caption) = play_pause_face(&self.images, is_playing);
        self.play_pause.set_image(image);
        self.play_pause.set_caption(caption);
    }

    pub fn show_title(&mut self, name: &str) {
        self.title.set_label(name);
    }

    /// Mirror a controller event onto the controls
    pub fn apply(&mut self, event: &PlaybackEvent) {
        match event {
            PlaybackEvent::StateChanged { is_playing, .. } => self.show_playing(*is_playing),
            PlaybackEvent::TrackChanged { name, .. } => self.show_title(name),
            PlaybackEvent::TrackFinished { .. } | PlaybackEvent::PlaylistChanged { .. } => {}
        }
    }

    /// Release every control, children first
    pub fn destroy(mut self) {
        self.title.destroy();
        self.rewind.destroy();
        self.play_pause.destroy();
        self.fast_forward.destroy();
        self.root.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn play_pause_face_follows_state() {
        let images = PlayerSettings::default().images;
        assert_eq!(
            play_pause_face(&images, true),
            (images.pause.as_str(), "Pause")
        );
        assert_eq!(
            play_pause_face(&images, false),
            (images.play.as_str(), "Play")
        );
    }

    #[test]
    fn control_ids_order_by_creation() {
        let mut ids = vec![ControlId(3), ControlId(1), ControlId(2)];
        ids.sort();
        assert_eq!(ids, vec![ControlId(1), ControlId(2), ControlId(3)]);
    }
}
