// ============================================================================
// Registry Event Handler Interface
// Defines the contract for observing asset resolution
// ============================================================================

use crate::domain::AssetId;
use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the asset registry
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegistryEvent {
    /// Descriptor served from the cache
    CacheHit {
        asset_id: AssetId,
        timestamp: DateTime<Utc>,
    },

    /// A new fetch was issued to the asset source
    FetchStarted {
        asset_id: AssetId,
        timestamp: DateTime<Utc>,
    },

    /// Caller attached to a fetch that was already in flight
    FetchJoined {
        asset_id: AssetId,
        timestamp: DateTime<Utc>,
    },

    /// Fetch succeeded and the descriptor was cached
    Resolved {
        asset_id: AssetId,
        precision: u32,
        timestamp: DateTime<Utc>,
    },

    /// Fetch failed; nothing was cached
    FetchFailed {
        asset_id: AssetId,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// Caller-supplied descriptor was cached without a fetch
    Seeded {
        asset_id: AssetId,
        timestamp: DateTime<Utc>,
    },
}

impl RegistryEvent {
    pub fn asset_id(&self) -> &AssetId {
        match self {
            RegistryEvent::CacheHit { asset_id, .. }
            | RegistryEvent::FetchStarted { asset_id, .. }
            | RegistryEvent::FetchJoined { asset_id, .. }
            | RegistryEvent::Resolved { asset_id, .. }
            | RegistryEvent::FetchFailed { asset_id, .. }
            | RegistryEvent::Seeded { asset_id, .. } => asset_id,
        }
    }
}

/// Event handler trait for processing registry events
/// Implementations can handle logging, metrics, tests, etc.
pub trait RegistryEventHandler: Send + Sync {
    /// Handle a registry event
    fn on_event(&self, event: RegistryEvent);
}

/// No-op event handler
pub struct NoOpEventHandler;

impl RegistryEventHandler for NoOpEventHandler {
    fn on_event(&self, _event: RegistryEvent) {}
}

/// Logging event handler
pub struct LoggingEventHandler;

impl RegistryEventHandler for LoggingEventHandler {
    fn on_event(&self, event: RegistryEvent) {
        tracing::debug!("Asset registry event: {:?}", event);
    }
}
