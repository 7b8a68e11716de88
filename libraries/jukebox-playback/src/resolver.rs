//! Track name resolution
//!
//! Names come from an external metadata service. Every lookup is a
//! suspension point and may fail independently per track.

use crate::error::Result;
use crate::validator::SourceId;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// External metadata capability
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    /// Display name for a numeric asset id
    ///
    /// `Ok(None)` means the service answered but has no name.
    async fn product_name(&self, asset_id: u64) -> Result<Option<String>>;
}

/// Resolves display names for validated source ids
#[derive(Clone)]
pub struct NameResolver {
    lookup: Arc<dyn MetadataLookup>,
}

impl NameResolver {
    pub fn new(lookup: Arc<dyn MetadataLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve a display name
    ///
    /// Returns `None` when the numeric id cannot be extracted (the lookup is
    /// not called), when the lookup fails, or when it yields no usable name.
    pub async fn resolve(&self, id: &SourceId) -> Option<String> {
        let Some(asset_id) = id.asset_number() else {
            warn!("Cannot extract asset number from {}", id);
            return None;
        };

        match self.lookup.product_name(asset_id).await {
            Ok(Some(name)) if !name.trim().is_empty() => {
                debug!("Resolved {} -> {:?}", id, name);
                Some(name)
            }
            Ok(_) => {
                warn!("Metadata lookup returned no name for {}", id);
                None
            }
            Err(e) => {
                warn!("Metadata lookup failed for {}: {}", id, e);
                None
            }
        }
    }
}
