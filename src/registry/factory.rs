// ============================================================================
// Asset Registry Factory
// Creates registries with validated configuration
// ============================================================================

use super::config::{Network, RegistryConfig};
use super::AssetRegistry;
use crate::domain::AssetDescriptor;
use crate::error::{Error, Result};
use crate::interfaces::{AssetSource, NoOpEventHandler, RegistryEventHandler};
use std::sync::Arc;

// ============================================================================
// Factory Functions
// ============================================================================

/// Creates an asset registry from configuration
///
/// # Arguments
/// * `config` - Registry configuration
/// * `source` - Backing lookup for cache misses
/// * `event_handler` - Event handler for resolution events
///
/// # Example
/// ```
/// use ledger_money::prelude::*;
/// use ledger_money::registry::create_from_config;
/// use std::sync::Arc;
///
/// let registry = create_from_config(
///     RegistryConfig::testnet(),
///     Arc::new(StaticAssetSource::new()),
///     Arc::new(NoOpEventHandler),
/// )
/// .unwrap();
/// assert!(registry.is_cached(&AssetId::from("WAVES")));
/// ```
pub fn create_from_config(
    config: RegistryConfig,
    source: Arc<dyn AssetSource>,
    event_handler: Arc<dyn RegistryEventHandler>,
) -> Result<AssetRegistry> {
    config.validate().map_err(Error::InvalidConfig)?;

    let registry = AssetRegistry::from_parts(
        config.network,
        config.max_precision,
        source,
        event_handler,
    );
    for descriptor in config.preload {
        registry.insert(descriptor)?;
    }

    Ok(registry)
}

impl AssetRegistry {
    /// Create a registry from configuration, without event handling
    pub fn with_config(source: Arc<dyn AssetSource>, config: RegistryConfig) -> Result<Self> {
        create_from_config(config, source, Arc::new(NoOpEventHandler))
    }
}

// ============================================================================
// Builder Pattern for Advanced Configuration
// ============================================================================

/// Builder for creating asset registries with fluent API
///
/// # Example
/// ```
/// use ledger_money::prelude::*;
/// use std::sync::Arc;
///
/// let registry = AssetRegistryBuilder::new(Arc::new(StaticAssetSource::with_native()))
///     .testnet()
///     .with_asset(AssetDescriptor::new("FOUR", "Four Precision Token", 4).unwrap())
///     .with_event_handler(Arc::new(LoggingEventHandler))
///     .build()
///     .unwrap();
/// assert_eq!(registry.len(), 1);
/// ```
pub struct AssetRegistryBuilder {
    config: RegistryConfig,
    source: Arc<dyn AssetSource>,
    event_handler: Arc<dyn RegistryEventHandler>,
}

impl AssetRegistryBuilder {
    /// Create a new builder around an asset source
    pub fn new(source: Arc<dyn AssetSource>) -> Self {
        Self {
            config: RegistryConfig::default(),
            source,
            event_handler: Arc::new(NoOpEventHandler),
        }
    }

    /// Target mainnet
    pub fn mainnet(mut self) -> Self {
        self.config.network = Network::Mainnet;
        self
    }

    /// Target testnet
    pub fn testnet(mut self) -> Self {
        self.config.network = Network::Testnet;
        self
    }

    /// Target a custom network
    pub fn network(mut self, network: Network) -> Self {
        self.config.network = network;
        self
    }

    /// Preload a descriptor
    pub fn with_asset(mut self, descriptor: AssetDescriptor) -> Self {
        self.config = self.config.with_asset(descriptor);
        self
    }

    /// Cap accepted precision
    pub fn with_max_precision(mut self, max_precision: u32) -> Self {
        self.config = self.config.with_max_precision(max_precision);
        self
    }

    /// Set the event handler
    pub fn with_event_handler(mut self, event_handler: Arc<dyn RegistryEventHandler>) -> Self {
        self.event_handler = event_handler;
        self
    }

    /// Build the registry
    pub fn build(self) -> Result<AssetRegistry> {
        create_from_config(self.config, self.source, self.event_handler)
    }
}
