/// JSON-backed track catalog
use async_trait::async_trait;
use jukebox_playback::{MetadataLookup, PlayerError, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// One catalog entry as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    pub id: u64,
    pub name: String,
}

/// Product names keyed by asset id
///
/// With `fallback` set, unknown ids resolve to `"Asset <id>"` instead of
/// failing resolution.
#[derive(Debug, Default)]
pub struct JsonCatalog {
    names: HashMap<u64, String>,
    fallback: bool,
}

impl JsonCatalog {
    pub fn new(entries: Vec<CatalogEntry>, fallback: bool) -> Self {
        Self {
            names: entries.into_iter().map(|e| (e.id, e.name)).collect(),
            fallback,
        }
    }

    /// Read a JSON array of `{ "id": .., "name": .. }` objects
    pub fn from_file(path: &Path, fallback: bool) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| PlayerError::Lookup(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&raw, fallback)
    }

    pub fn from_json(raw: &str, fallback: bool) -> Result<Self> {
        let entries: Vec<CatalogEntry> =
            serde_json::from_str(raw).map_err(|e| PlayerError::Lookup(e.to_string()))?;
        debug!("Catalog loaded with {} entries", entries.len());
        Ok(Self::new(entries, fallback))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[async_trait]
impl MetadataLookup for JsonCatalog {
    async fn product_name(&self, asset_id: u64) -> Result<Option<String>> {
        match self.names.get(&asset_id) {
            Some(name) => Ok(Some(name.clone())),
            None if self.fallback => Ok(Some(format!("Asset {asset_id}"))),
            None => Ok(None),
        }
    }
}
