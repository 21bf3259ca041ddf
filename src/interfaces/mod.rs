// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod asset_source;
mod event_handler;

pub use asset_source::{AssetSource, StaticAssetSource};
pub use event_handler::{LoggingEventHandler, NoOpEventHandler, RegistryEvent, RegistryEventHandler};
