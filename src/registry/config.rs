// ============================================================================
// Asset Registry Configuration
// Network selection, preloaded descriptors and precision limits
// ============================================================================

use crate::domain::AssetDescriptor;
use crate::numeric::MAX_PRECISION;
use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Network
// ============================================================================

/// Ledger network the registry resolves assets for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    /// Private network identified by its chain byte
    Custom(u8),
}

impl Network {
    /// Chain identifier byte
    pub fn chain_id(&self) -> u8 {
        match self {
            Network::Mainnet => b'W',
            Network::Testnet => b'T',
            Network::Custom(byte) => *byte,
        }
    }
}

// ============================================================================
// Complete Registry Configuration
// ============================================================================

/// Configuration for creating an asset registry
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// The ledger network
    pub network: Network,

    /// Descriptors seeded into the cache at construction
    pub preload: Vec<AssetDescriptor>,

    /// Largest precision accepted for any descriptor
    pub max_precision: u32,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new(Network::default())
    }
}

impl RegistryConfig {
    /// Create a configuration with nothing preloaded
    pub fn new(network: Network) -> Self {
        Self {
            network,
            preload: Vec::new(),
            max_precision: MAX_PRECISION,
        }
    }

    /// Builder method: preload a descriptor
    pub fn with_asset(mut self, descriptor: AssetDescriptor) -> Self {
        self.preload.push(descriptor);
        self
    }

    /// Builder method: cap accepted precision
    pub fn with_max_precision(mut self, max_precision: u32) -> Self {
        self.max_precision = max_precision;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_precision > MAX_PRECISION {
            return Err(format!(
                "Max precision {} exceeds engine limit {}",
                self.max_precision, MAX_PRECISION
            ));
        }

        let mut seen = HashSet::new();
        for descriptor in &self.preload {
            if !seen.insert(descriptor.id()) {
                return Err(format!("Duplicate preloaded asset {}", descriptor.id()));
            }
            if descriptor.precision() > self.max_precision {
                return Err(format!(
                    "Preloaded asset {} has precision {} above {}",
                    descriptor.id(),
                    descriptor.precision(),
                    self.max_precision
                ));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl RegistryConfig {
    /// Mainnet with the native asset preloaded
    pub fn mainnet() -> Self {
        Self::new(Network::Mainnet).with_asset(AssetDescriptor::native())
    }

    /// Testnet with the native asset preloaded
    pub fn testnet() -> Self {
        Self::new(Network::Testnet).with_asset(AssetDescriptor::native())
    }
}
