//! Player events
//!
//! Two directions of traffic:
//! - [`PlayerEvent`] flows *into* the player from UI and audio adapters over a
//!   single channel, so delivery stays serial.
//! - [`PlaybackEvent`] flows *out of* the controller and is applied to the
//!   control surface.

use crate::types::TransportState;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Sending half of the player's event channel
pub type EventSender = UnboundedSender<PlayerEvent>;

/// Receiving half of the player's event channel
pub type EventReceiver = UnboundedReceiver<PlayerEvent>;

/// Create the player's event channel
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Transport buttons on the control surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlAction {
    Rewind,
    PlayPause,
    FastForward,
}

/// Inputs delivered to the player's single event entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// A transport button was clicked
    Clicked(ControlAction),

    /// Audio object reached the end of its source
    AudioEnded,

    /// Audio object paused, by us or by someone else
    AudioPaused,

    /// Audio object resumed from pause
    AudioResumed,

    /// Audio object started playing a source
    AudioPlayed,

    /// Tear the player down and stop the event loop
    Shutdown,
}

/// Events emitted by the controller for UI synchronization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Play/pause state changed
    StateChanged {
        state: TransportState,
        is_playing: bool,
    },

    /// A track became current; emitted before the audio object is touched
    TrackChanged {
        index: usize,
        track_id: String,
        name: String,
    },

    /// Track finished playing naturally
    TrackFinished { track_id: String },

    /// A new playlist was committed
    PlaylistChanged { length: usize },
}

/// Click subscription handed to a control
///
/// The host adapter calls [`ClickBinding::fire`] whenever the control is
/// activated.
#[derive(Debug, Clone)]
pub struct ClickBinding {
    action: ControlAction,
    sender: EventSender,
}

impl ClickBinding {
    pub fn new(action: ControlAction, sender: EventSender) -> Self {
        Self { action, sender }
    }

    pub fn action(&self) -> ControlAction {
        self.action
    }

    /// Deliver the click. Returns false once the player is gone.
    pub fn fire(&self) -> bool {
        self.sender
            .send(PlayerEvent::Clicked(self.action))
            .is_ok()
    }
}

/// Notification handle given to the audio object
///
/// Adapters call these whenever the underlying audio object changes state,
/// whether or not the player caused the change.
#[derive(Debug, Clone)]
pub struct AudioNotifier {
    sender: EventSender,
}

impl AudioNotifier {
    pub fn new(sender: EventSender) -> Self {
        Self { sender }
    }

    pub fn ended(&self) -> bool {
        self.sender.send(PlayerEvent::AudioEnded).is_ok()
    }

    pub fn paused(&self) -> bool {
        self.sender.send(PlayerEvent::AudioPaused).is_ok()
    }

    pub fn resumed(&self) -> bool {
        self.sender.send(PlayerEvent::AudioResumed).is_ok()
    }

    pub fn played(&self) -> bool {
        self.sender.send(PlayerEvent::AudioPlayed).is_ok()
    }
}
