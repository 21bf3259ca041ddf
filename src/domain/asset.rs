// ============================================================================
// Asset Domain Model
// ============================================================================

use crate::error::{Error, Result};
use crate::numeric::MAX_PRECISION;
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Identifier of the ledger's native asset.
pub const NATIVE_ASSET_ID: &str = "WAVES";

// ============================================================================
// Value Objects
// ============================================================================

/// Opaque identifier naming an asset on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AssetId(Arc<str>);

impl AssetId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AssetId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AssetId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for AssetId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

impl From<&AssetId> for AssetId {
    fn from(id: &AssetId) -> Self {
        id.clone()
    }
}

// ============================================================================
// Asset Descriptor
// ============================================================================

/// Resolved, immutable identity record of an asset.
///
/// `precision` is the number of decimal places between the minor unit
/// ("coin") and the display unit ("token"). Two descriptors with the same
/// identifier denote the same asset, so equality and hashing only look at
/// the identifier.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct AssetDescriptor {
    id: AssetId,
    name: String,
    precision: u32,
}

impl AssetDescriptor {
    /// Create a descriptor.
    ///
    /// # Errors
    /// `InvalidArgument` for an empty identifier or a precision the decimal
    /// engine cannot carry.
    pub fn new(id: impl Into<AssetId>, name: impl Into<String>, precision: u32) -> Result<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidArgument(
                "asset identifier cannot be empty".to_string(),
            ));
        }
        if precision > MAX_PRECISION {
            return Err(Error::InvalidArgument(format!(
                "precision {precision} of asset {id} exceeds {MAX_PRECISION}"
            )));
        }

        Ok(Self {
            id,
            name: name.into(),
            precision,
        })
    }

    /// The ledger's native asset (8 decimal places).
    pub fn native() -> Self {
        Self {
            id: AssetId::from(NATIVE_ASSET_ID),
            name: "Waves".to_string(),
            precision: 8,
        }
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Whether both descriptors name the same asset.
    #[inline]
    pub fn same_asset(&self, other: &AssetDescriptor) -> bool {
        self.id == other.id
    }
}

impl PartialEq for AssetDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.same_asset(other)
    }
}

impl Eq for AssetDescriptor {}

impl Hash for AssetDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for AssetDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, precision {})", self.name, self.id, self.precision)
    }
}

// ============================================================================
// Asset Reference
// ============================================================================

/// Either an already materialized descriptor or a bare identifier that
/// still has to go through the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRef {
    Descriptor(Arc<AssetDescriptor>),
    Identifier(AssetId),
}

impl AssetRef {
    pub fn id(&self) -> &AssetId {
        match self {
            AssetRef::Descriptor(descriptor) => descriptor.id(),
            AssetRef::Identifier(id) => id,
        }
    }
}

impl From<AssetDescriptor> for AssetRef {
    fn from(descriptor: AssetDescriptor) -> Self {
        AssetRef::Descriptor(Arc::new(descriptor))
    }
}

impl From<Arc<AssetDescriptor>> for AssetRef {
    fn from(descriptor: Arc<AssetDescriptor>) -> Self {
        AssetRef::Descriptor(descriptor)
    }
}

impl From<&Arc<AssetDescriptor>> for AssetRef {
    fn from(descriptor: &Arc<AssetDescriptor>) -> Self {
        AssetRef::Descriptor(Arc::clone(descriptor))
    }
}

impl From<AssetId> for AssetRef {
    fn from(id: AssetId) -> Self {
        AssetRef::Identifier(id)
    }
}

impl From<&AssetId> for AssetRef {
    fn from(id: &AssetId) -> Self {
        AssetRef::Identifier(id.clone())
    }
}

impl From<&str> for AssetRef {
    fn from(id: &str) -> Self {
        AssetRef::Identifier(AssetId::from(id))
    }
}

impl From<String> for AssetRef {
    fn from(id: String) -> Self {
        AssetRef::Identifier(AssetId::from(id))
    }
}
