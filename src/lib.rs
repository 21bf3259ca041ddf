// ============================================================================
// Ledger Money Library
// Precision-safe monetary values for multi-asset ledger clients
// ============================================================================

//! # Ledger Money
//!
//! Amounts of named, divisible assets, kept in integer minor units
//! ("coins") and shown in decimal display units ("tokens").
//!
//! ## Features
//!
//! - **No floating point**: amounts enter as decimal strings only
//! - **Explicit truncation**: excess fraction digits are dropped, never rounded up
//! - **Asset-safe arithmetic**: mixing assets is an error, not a silent bug
//! - **Cached asset registry** with de-duplicated concurrent resolution
//! - **Canonical JSON**: `{"assetId": ..., "tokens": ...}`
//!
//! ## Example
//!
//! ```rust
//! use ledger_money::prelude::*;
//! use rust_decimal::Decimal;
//! use std::sync::Arc;
//!
//! # futures::executor::block_on(async {
//! let source = StaticAssetSource::with_native()
//!     .with_asset(AssetDescriptor::new("FOUR", "Four Precision Token", 4).unwrap());
//! let registry = AssetRegistry::new(Arc::new(source));
//!
//! let a = Money::from_tokens("1.1", "WAVES", &registry).await.unwrap();
//! let b = Money::from_coins("190000000", "WAVES", &registry).await.unwrap();
//! let total = a.add(&b).unwrap();
//! assert_eq!(total.to_string(), "3.00000000 WAVES");
//!
//! let four = registry.resolve("FOUR").await.unwrap();
//! let converted = Money::convert(total, &four, Decimal::new(25, 2)).unwrap();
//! assert_eq!(converted.to_tokens(), "0.7500");
//! # });
//! ```

pub mod domain;
pub mod error;
pub mod interfaces;
pub mod numeric;
pub mod registry;
pub mod utils;

pub use error::{Error, Result};

// Re-exports for convenience
pub mod prelude {
    pub use crate::domain::{Amount, AssetDescriptor, AssetId, AssetRef, Money};
    #[cfg(feature = "serde")]
    pub use crate::domain::MoneyRecord;
    pub use crate::error::{Error, Result};
    pub use crate::interfaces::{
        AssetSource, LoggingEventHandler, NoOpEventHandler, RegistryEvent, RegistryEventHandler,
        StaticAssetSource,
    };
    pub use crate::numeric::Rounding;
    pub use crate::registry::{AssetRegistry, AssetRegistryBuilder, Network, RegistryConfig};
}
