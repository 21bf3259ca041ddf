// ============================================================================
// Numeric Errors
// Error types for decimal parsing, scaling and formatting
// ============================================================================

use thiserror::Error;

/// Errors that can occur inside the decimal engine.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result does not fit the 96-bit decimal mantissa
    #[error("arithmetic overflow: result exceeded maximum value")]
    Overflow,
    /// Input string is not a decimal number
    #[error("invalid input: could not parse value")]
    InvalidInput,
    /// Requested scale is outside of 0..=MAX_PRECISION
    #[error("precision {0} is out of range")]
    PrecisionOutOfRange(u32),
}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
