//! Playlist model and builder
//!
//! A playlist is replaced wholesale on every load. Building is
//! all-or-nothing: the first malformed entry or unresolvable name aborts the
//! build and nothing is committed.

use crate::error::{PlayerError, Result};
use crate::resolver::NameResolver;
use crate::shuffle::shuffle;
use crate::types::Track;
use crate::validator::SourceId;
use tracing::{debug, warn};

/// Ordered list of tracks with cyclic navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Track> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Index after `index`, wrapping from last to first
    ///
    /// An empty playlist yields 0, which `get` then rejects.
    pub fn next_index(&self, index: usize) -> usize {
        match self.tracks.len() {
            0 => 0,
            len => (index + 1) % len,
        }
    }

    /// Index before `index`, wrapping from first to last
    pub fn previous_index(&self, index: usize) -> usize {
        match self.tracks.len() {
            0 => 0,
            len if index == 0 || index >= len => len - 1,
            _ => index - 1,
        }
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
    }
}

impl FromIterator<Track> for Playlist {
    fn from_iter<I: IntoIterator<Item = Track>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns raw playlist entries into named, validated tracks
pub struct PlaylistBuilder<'a> {
    resolver: &'a NameResolver,
    shuffle: bool,
}

impl<'a> PlaylistBuilder<'a> {
    pub fn new(resolver: &'a NameResolver) -> Self {
        Self {
            resolver,
            shuffle: false,
        }
    }

    pub fn shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Build a playlist from raw entries
    ///
    /// Entries are processed strictly in order: normalize, validate, resolve.
    /// A malformed entry fails with [`PlayerError::MalformedId`]; an entry
    /// whose name cannot be resolved fails with
    /// [`PlayerError::NameResolution`]. Remaining entries are not touched
    /// after a failure.
    pub async fn build<S: AsRef<str>>(self, raw_ids: &[S]) -> Result<Playlist> {
        let mut tracks = Vec::with_capacity(raw_ids.len());

        for raw in raw_ids {
            let id = SourceId::parse(raw.as_ref())?;

            let Some(name) = self.resolver.resolve(&id).await else {
                warn!("Aborting playlist load: no name for {}", id);
                return Err(PlayerError::NameResolution(id.to_string()));
            };

            tracks.push(Track::new(name, id));
        }

        if self.shuffle {
            tracks = shuffle(&tracks);
        }

        debug!("Built playlist with {} tracks", tracks.len());
        Ok(Playlist::new(tracks))
    }
}
