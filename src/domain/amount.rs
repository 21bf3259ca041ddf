// ============================================================================
// Raw Amount Input
// Loosely typed amount accepted at construction boundaries
// ============================================================================

use crate::error::{Error, Result};

/// Amount as handed over by a caller, before any validation.
///
/// Only [`Amount::Text`] is ever accepted by the `Money` factories: binary
/// floating point cannot represent every decimal fraction, so numeric input
/// is refused outright instead of being silently rounded.
#[derive(Debug, Clone, PartialEq)]
pub enum Amount {
    /// Decimal string, e.g. `"10.25"`
    Text(String),
    /// Floating point number (always rejected)
    Number(f64),
    /// Native integer (always rejected)
    Integer(i128),
}

impl Amount {
    /// Borrow the decimal string.
    ///
    /// # Errors
    /// `InvalidArgument` for any numeric variant.
    pub fn as_text(&self) -> Result<&str> {
        match self {
            Amount::Text(text) => Ok(text),
            Amount::Number(value) => Err(Error::InvalidArgument(format!(
                "amount must be a decimal string, got number {value}"
            ))),
            Amount::Integer(value) => Err(Error::InvalidArgument(format!(
                "amount must be a decimal string, got number {value}"
            ))),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Amount::Text(_))
    }
}

impl From<&str> for Amount {
    fn from(text: &str) -> Self {
        Amount::Text(text.to_string())
    }
}

impl From<String> for Amount {
    fn from(text: String) -> Self {
        Amount::Text(text)
    }
}

impl From<&String> for Amount {
    fn from(text: &String) -> Self {
        Amount::Text(text.clone())
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Number(value)
    }
}

impl From<f32> for Amount {
    fn from(value: f32) -> Self {
        Amount::Number(f64::from(value))
    }
}

macro_rules! amount_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Amount {
                fn from(value: $ty) -> Self {
                    Amount::Integer(i128::from(value))
                }
            }
        )*
    };
}

amount_from_int!(i32, i64, u32, u64);

#[cfg(feature = "serde")]
impl From<&serde_json::Value> for Amount {
    fn from(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Amount::Text(text.clone()),
            serde_json::Value::Number(number) => match number.as_i64() {
                Some(int) => Amount::Integer(i128::from(int)),
                None => Amount::Number(number.as_f64().unwrap_or(f64::NAN)),
            },
            // bool/null/array/object: not a string, rejected like a number
            _ => Amount::Number(f64::NAN),
        }
    }
}
