// ============================================================================
// Crate Errors
// Failure channels for asset resolution, construction and arithmetic
// ============================================================================

use crate::domain::AssetId;
use crate::numeric::NumericError;
use thiserror::Error;

/// Top-level error for every public operation.
///
/// `Clone` so that the outcome of a single de-duplicated fetch can be
/// handed to every caller waiting on it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Amount was not a decimal string, or was otherwise malformed
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The asset source does not know the identifier
    #[error("asset not found: {asset_id}")]
    AssetNotFound { asset_id: AssetId },

    /// Operands belong to different assets
    #[error("incompatible assets: {left} and {right}")]
    IncompatibleAsset { left: AssetId, right: AssetId },

    #[error("numeric error: {0}")]
    Numeric(#[from] NumericError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The asset source failed for a reason other than an unknown identifier
    #[error("asset source error: {0}")]
    Source(String),
}

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;
