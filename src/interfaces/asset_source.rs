// ============================================================================
// Asset Source Interface
// Backing lookup the registry delegates to on a cache miss
// ============================================================================

use crate::domain::{AssetDescriptor, AssetId};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;

/// Supplies descriptors for identifiers, from a node, a store or a table.
///
/// Implementations report unknown identifiers as `Error::AssetNotFound`;
/// any other failure should be `Error::Source`. Timeouts are the
/// implementation's business.
#[async_trait]
pub trait AssetSource: Send + Sync {
    /// Look up the descriptor for `id`
    async fn fetch(&self, id: &AssetId) -> Result<AssetDescriptor>;

    /// Source name for logging
    fn name(&self) -> &str {
        "asset-source"
    }
}

/// In-memory table of well-known assets.
#[derive(Debug, Clone, Default)]
pub struct StaticAssetSource {
    assets: HashMap<AssetId, AssetDescriptor>,
}

impl StaticAssetSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table holding only the native asset
    pub fn with_native() -> Self {
        Self::new().with_asset(AssetDescriptor::native())
    }

    /// Builder method: add (or replace) a descriptor
    pub fn with_asset(mut self, descriptor: AssetDescriptor) -> Self {
        self.assets.insert(descriptor.id().clone(), descriptor);
        self
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

#[async_trait]
impl AssetSource for StaticAssetSource {
    async fn fetch(&self, id: &AssetId) -> Result<AssetDescriptor> {
        self.assets
            .get(id)
            .cloned()
            .ok_or_else(|| Error::AssetNotFound {
                asset_id: id.clone(),
            })
    }

    fn name(&self) -> &str {
        "static"
    }
}
