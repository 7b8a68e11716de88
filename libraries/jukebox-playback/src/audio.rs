//! Audio object capability
//!
//! The player never decodes audio. It drives an opaque audio object owned by
//! the host: one mutable source id, one read/write position, start/pause/stop,
//! and notifications back through an [`AudioNotifier`].

use crate::error::Result;
use crate::events::AudioNotifier;
use crate::validator::SourceId;
use std::time::Duration;

/// Host-provided audio object
///
/// Assigning the source id it already holds must not rewind it, so that
/// `play` after `pause` resumes where it left off.
pub trait AudioObject: Send {
    /// Source currently assigned, if any
    fn source_id(&self) -> Option<&str>;

    /// Assign a new source
    fn set_source_id(&mut self, id: &SourceId) -> Result<()>;

    /// Elapsed position in the current source
    fn position(&self) -> Duration;

    /// Move the playhead
    fn set_position(&mut self, position: Duration) -> Result<()>;

    /// Start or resume playback of the current source
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    fn stop(&mut self) -> Result<()>;

    /// Register the channel that receives ended/paused/resumed/played
    fn subscribe(&mut self, notifier: AudioNotifier);

    /// Route output through an audio group
    fn set_group(&mut self, _group: &dyn AudioGroup) {}

    /// Free host resources; the object is not used afterwards
    fn release(&mut self) {}

    /// Rewind to the start of the current source
    fn reset(&mut self) -> Result<()> {
        self.set_position(Duration::ZERO)
    }
}

/// Host-provided mixing group the audio object is routed through
pub trait AudioGroup: Send {
    fn name(&self) -> &str;

    fn release(&mut self) {}
}
