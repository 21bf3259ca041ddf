// ============================================================================
// Domain Models Module
// Assets, raw amounts and the Money value type
// ============================================================================

pub mod amount;
pub mod asset;
pub mod money;
#[cfg(feature = "serde")]
pub mod record;

pub use amount::Amount;
pub use asset::{AssetDescriptor, AssetId, AssetRef, NATIVE_ASSET_ID};
pub use money::Money;
#[cfg(feature = "serde")]
pub use record::MoneyRecord;
