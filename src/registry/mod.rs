// ============================================================================
// Registry Module
// Asset resolution, caching and configuration
// ============================================================================

mod asset_registry;

pub mod config;
pub mod factory;

pub use asset_registry::AssetRegistry;
pub use config::{Network, RegistryConfig};
pub use factory::{create_from_config, AssetRegistryBuilder};
