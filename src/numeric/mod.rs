// ============================================================================
// Numeric Module
// Decimal engine used by every monetary computation
// ============================================================================
//
// This module provides:
// - parse/scale/format primitives over rust_decimal::Decimal
// - Rounding: the named truncation policy applied when digits are dropped
// - NumericError: error types for the primitives
//
// Design principles:
// - No floating-point operations
// - All fallible arithmetic returns Result (no panics)
// - Scaling by powers of ten moves the decimal point, never divides

mod decimal;
mod errors;

pub use decimal::{
    format_fixed, is_integer, mul_scale_up, parse_decimal, parse_truncated, pow10, scale_down,
    scale_up, to_integer, Rounding, MAX_PRECISION,
};
pub use errors::{NumericError, NumericResult};
