// ============================================================================
// Decimal Engine
// Parsing, power-of-ten scaling and fixed-digit formatting on rust_decimal
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::{Decimal, RoundingStrategy};

/// Largest scale the decimal engine can carry (rust_decimal limit).
pub const MAX_PRECISION: u32 = 28;

/// Rounding policy applied whenever digits are dropped.
///
/// Ledger amounts are never rounded up: excess digits are cut off,
/// toward zero for negative values too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Drop excess digits (round toward zero)
    #[default]
    Truncate,
}

impl Rounding {
    #[inline]
    fn strategy(self) -> RoundingStrategy {
        match self {
            Rounding::Truncate => RoundingStrategy::ToZero,
        }
    }
}

fn map_engine_error(err: rust_decimal::Error) -> NumericError {
    match err {
        rust_decimal::Error::ExceedsMaximumPossibleValue
        | rust_decimal::Error::LessThanMinimumPossibleValue => NumericError::Overflow,
        rust_decimal::Error::ScaleExceedsMaximumPrecision(scale) => {
            NumericError::PrecisionOutOfRange(scale)
        },
        _ => NumericError::InvalidInput,
    }
}

#[inline]
fn check_precision(exp: u32) -> NumericResult<()> {
    if exp > MAX_PRECISION {
        Err(NumericError::PrecisionOutOfRange(exp))
    } else {
        Ok(())
    }
}

// ============================================================================
// Parsing
// ============================================================================

/// Split a plain decimal literal into (negative, integer digits, fraction digits).
///
/// Returns `None` for anything that is not `[+-]digits[.digits]`.
fn split_literal(s: &str) -> Option<(bool, &str, &str)> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (int_part, frac_part) = match body.find('.') {
        Some(pos) => (&body[..pos], &body[pos + 1..]),
        None => (body, ""),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int_part) || !all_digits(frac_part) {
        return None;
    }

    Some((negative, int_part, frac_part))
}

/// Parse a decimal string exactly.
///
/// Accepts `[+-]digits[.digits]` and scientific notation (`1.5e3`).
/// Surrounding whitespace is ignored. Fails instead of rounding when the
/// literal carries more digits than the engine can hold.
pub fn parse_decimal(input: &str) -> NumericResult<Decimal> {
    let s = input.trim();
    if s.is_empty() {
        return Err(NumericError::InvalidInput);
    }

    if s.contains(['e', 'E']) {
        return Decimal::from_scientific(s).map_err(map_engine_error);
    }

    let (negative, int_part, frac_part) = split_literal(s).ok_or(NumericError::InvalidInput)?;
    build_decimal(negative, int_part, frac_part)
}

/// Parse a decimal string, dropping fraction digits beyond `digits`
/// according to `rounding` before the value ever enters the engine.
///
/// This keeps literals such as `"10.1234567890123456789012345678901"`
/// usable for low-precision assets even though they exceed the engine's
/// 28-digit scale.
pub fn parse_truncated(input: &str, digits: u32, rounding: Rounding) -> NumericResult<Decimal> {
    check_precision(digits)?;
    let s = input.trim();
    if s.is_empty() {
        return Err(NumericError::InvalidInput);
    }

    if s.contains(['e', 'E']) {
        let value = Decimal::from_scientific(s).map_err(map_engine_error)?;
        return Ok(value.round_dp_with_strategy(digits, rounding.strategy()));
    }

    let (negative, int_part, frac_part) = split_literal(s).ok_or(NumericError::InvalidInput)?;
    let kept = match rounding {
        Rounding::Truncate => &frac_part[..frac_part.len().min(digits as usize)],
    };
    build_decimal(negative, int_part, kept)
}

fn build_decimal(negative: bool, int_part: &str, frac_part: &str) -> NumericResult<Decimal> {
    let scale = u32::try_from(frac_part.len()).map_err(|_| NumericError::InvalidInput)?;
    check_precision(scale)?;

    let digits = format!("{int_part}{frac_part}");
    let digits = digits.trim_start_matches('0');
    let mantissa: i128 = if digits.is_empty() {
        0
    } else {
        // 39+ significant digits cannot fit the 96-bit mantissa anyway
        if digits.len() > 38 {
            return Err(NumericError::Overflow);
        }
        digits.parse().map_err(|_| NumericError::InvalidInput)?
    };
    let mantissa = if negative { -mantissa } else { mantissa };

    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(map_engine_error)
}

// ============================================================================
// Scaling
// ============================================================================

/// 10^exp as a decimal integer.
pub fn pow10(exp: u32) -> NumericResult<Decimal> {
    check_precision(exp)?;
    Decimal::try_from_i128_with_scale(10i128.pow(exp), 0).map_err(map_engine_error)
}

/// Multiply by 10^exp and cut the result down to an integer.
///
/// Used to turn display units into minor units.
pub fn scale_up(value: Decimal, exp: u32, rounding: Rounding) -> NumericResult<Decimal> {
    let factor = pow10(exp)?;
    let scaled = value.checked_mul(factor).ok_or(NumericError::Overflow)?;
    Ok(to_integer(scaled, rounding))
}

/// Multiply `lhs` by `rhs` and by 10^exp, then cut the result down to an
/// integer.
///
/// The product is formed from the exact mantissas, so no digit is dropped
/// before `rounding` is applied, even when `lhs.scale() + rhs.scale()`
/// exceeds the engine's 28-digit scale.
pub fn mul_scale_up(
    lhs: Decimal,
    rhs: Decimal,
    exp: u32,
    rounding: Rounding,
) -> NumericResult<Decimal> {
    check_precision(exp)?;
    let negative = lhs.is_sign_negative() != rhs.is_sign_negative();
    let scale = lhs.scale() + rhs.scale();
    let product = mul_wide(lhs.mantissa().unsigned_abs(), rhs.mantissa().unsigned_abs());

    let magnitude = if exp >= scale {
        let narrow = narrow_u128(&product).ok_or(NumericError::Overflow)?;
        narrow
            .checked_mul(10u128.pow(exp - scale))
            .ok_or(NumericError::Overflow)?
    } else {
        let quotient = match rounding {
            Rounding::Truncate => div_pow10_truncated(product, scale - exp),
        };
        narrow_u128(&quotient).ok_or(NumericError::Overflow)?
    };

    let magnitude = i128::try_from(magnitude).map_err(|_| NumericError::Overflow)?;
    let mantissa = if negative { -magnitude } else { magnitude };
    let result = Decimal::try_from_i128_with_scale(mantissa, 0).map_err(map_engine_error)?;
    Ok(normalize_zero(result))
}

// Largest power of ten that fits a u64 limb.
const LIMB_POW10: u32 = 19;

/// Full 256-bit product of two magnitudes, little-endian u64 limbs.
fn mul_wide(a: u128, b: u128) -> [u64; 4] {
    let a = [a as u64, (a >> 64) as u64];
    let b = [b as u64, (b >> 64) as u64];
    let mut out = [0u64; 4];
    for i in 0..2 {
        let mut carry = 0u128;
        for j in 0..2 {
            let t = out[i + j] as u128 + (a[i] as u128) * (b[j] as u128) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }
        out[i + 2] = carry as u64;
    }
    out
}

/// `n / 10^exp`, discarding the remainder.
fn div_pow10_truncated(mut n: [u64; 4], mut exp: u32) -> [u64; 4] {
    while exp > 0 {
        let step = exp.min(LIMB_POW10);
        let divisor = 10u128.pow(step);
        let mut rem = 0u128;
        for limb in n.iter_mut().rev() {
            let cur = (rem << 64) | *limb as u128;
            *limb = (cur / divisor) as u64;
            rem = cur % divisor;
        }
        exp -= step;
    }
    n
}

fn narrow_u128(n: &[u64; 4]) -> Option<u128> {
    if n[2] != 0 || n[3] != 0 {
        return None;
    }
    Some(n[0] as u128 | (n[1] as u128) << 64)
}

/// Divide by 10^exp exactly by moving the decimal point.
pub fn scale_down(value: Decimal, exp: u32) -> NumericResult<Decimal> {
    let scale = value
        .scale()
        .checked_add(exp)
        .ok_or(NumericError::PrecisionOutOfRange(exp))?;
    check_precision(scale)?;

    let mut result = value;
    result.set_scale(scale).map_err(map_engine_error)?;
    Ok(result)
}

/// Drop the fractional part of `value`, leaving a scale-0 decimal.
pub fn to_integer(value: Decimal, rounding: Rounding) -> Decimal {
    let mut result = value.round_dp_with_strategy(0, rounding.strategy());
    result.rescale(0);
    normalize_zero(result)
}

/// Whether `value` has no fractional part.
#[inline]
pub fn is_integer(value: &Decimal) -> bool {
    value.fract().is_zero()
}

// ============================================================================
// Formatting
// ============================================================================

/// Format with exactly `digits` fractional digits.
///
/// Extra digits are dropped by `rounding`; missing ones are zero-padded.
pub fn format_fixed(value: Decimal, digits: u32, rounding: Rounding) -> NumericResult<String> {
    check_precision(digits)?;
    let mut result = value.round_dp_with_strategy(digits, rounding.strategy());
    result.rescale(digits);
    Ok(normalize_zero(result).to_string())
}

// A truncated "-0.5" must print as "0", not "-0".
#[inline]
fn normalize_zero(mut value: Decimal) -> Decimal {
    if value.is_zero() {
        value.set_sign_positive(true);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("123.456").unwrap(), dec!(123.456));
        assert_eq!(parse_decimal("-0.001").unwrap(), dec!(-0.001));
        assert_eq!(parse_decimal("  42 ").unwrap(), dec!(42));
        assert_eq!(parse_decimal(".5").unwrap(), dec!(0.5));
        assert_eq!(parse_decimal("7.").unwrap(), dec!(7));
        assert_eq!(parse_decimal("+3").unwrap(), dec!(3));
        assert_eq!(parse_decimal("1.5e3").unwrap(), dec!(1500));
    }

    #[test]
    fn test_parse_decimal_invalid() {
        for input in ["", "   ", "abc", "1.2.3", "-", ".", "1,5", "0x10", "1_000"] {
            assert_eq!(
                parse_decimal(input),
                Err(NumericError::InvalidInput),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_parse_decimal_too_many_fraction_digits() {
        let input = "0.12345678901234567890123456789"; // 29 digits
        assert_eq!(
            parse_decimal(input),
            Err(NumericError::PrecisionOutOfRange(29))
        );
    }

    #[test]
    fn test_parse_truncated() {
        assert_eq!(
            parse_truncated("10.1234567890", 8, Rounding::Truncate).unwrap(),
            dec!(10.12345678)
        );
        assert_eq!(
            parse_truncated("1.999", 0, Rounding::Truncate).unwrap(),
            dec!(1)
        );
        assert_eq!(
            parse_truncated("-1.999", 1, Rounding::Truncate).unwrap(),
            dec!(-1.9)
        );
        assert_eq!(
            parse_truncated("0.12345678901234567890123456789999", 4, Rounding::Truncate).unwrap(),
            dec!(0.1234)
        );
        assert_eq!(
            parse_truncated("1.23456e2", 2, Rounding::Truncate).unwrap(),
            dec!(123.45)
        );
    }

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0).unwrap(), Decimal::ONE);
        assert_eq!(pow10(8).unwrap(), dec!(100000000));
        assert!(pow10(28).is_ok());
        assert_eq!(pow10(29), Err(NumericError::PrecisionOutOfRange(29)));
    }

    #[test]
    fn test_scale_up_truncates() {
        let coins = scale_up(dec!(10.1234567890), 8, Rounding::Truncate).unwrap();
        assert_eq!(coins, dec!(1012345678));
        assert_eq!(coins.scale(), 0);

        let coins = scale_up(dec!(1.123), 0, Rounding::Truncate).unwrap();
        assert_eq!(coins, dec!(1));

        let coins = scale_up(dec!(-0.5), 0, Rounding::Truncate).unwrap();
        assert_eq!(coins.to_string(), "0");
    }

    #[test]
    fn test_scale_up_overflow() {
        let huge = Decimal::MAX;
        assert_eq!(
            scale_up(huge, 8, Rounding::Truncate),
            Err(NumericError::Overflow)
        );
    }

    #[test]
    fn test_mul_scale_up_never_rounds_up() {
        // exact product 0.99999999999999999999999999995 needs scale 29
        let rate = Decimal::from_str_exact("1.9999999999999999999999999999").unwrap();
        let coins = mul_scale_up(dec!(0.50000000), rate, 8, Rounding::Truncate).unwrap();
        assert_eq!(coins, dec!(99999999));
        assert_eq!(coins.scale(), 0);

        let coins = mul_scale_up(dec!(-0.5), rate, 8, Rounding::Truncate).unwrap();
        assert_eq!(coins, dec!(-99999999));

        let third = Decimal::from_str_exact("0.3333333333333333333333333333").unwrap();
        let coins = mul_scale_up(dec!(3), third, 0, Rounding::Truncate).unwrap();
        assert_eq!(coins.to_string(), "0");
    }

    #[test]
    fn test_mul_scale_up_wide_mantissas() {
        // both mantissas near 2^96; the intermediate product needs ~190 bits
        let amount = Decimal::from_str_exact("79228162514.264337593543950335").unwrap();
        let rate = Decimal::from_str_exact("0.9999999999999999999999999999").unwrap();
        let coins = mul_scale_up(amount, rate, 8, Rounding::Truncate).unwrap();
        assert_eq!(coins, dec!(7922816251426433759));
    }

    #[test]
    fn test_mul_scale_up_exact_cases() {
        assert_eq!(
            mul_scale_up(dec!(100), dec!(0.25), 4, Rounding::Truncate).unwrap(),
            dec!(250000)
        );
        assert_eq!(
            mul_scale_up(dec!(1), dec!(0.3333333), 2, Rounding::Truncate).unwrap(),
            dec!(33)
        );
        assert_eq!(
            mul_scale_up(dec!(1.5), dec!(2), 0, Rounding::Truncate).unwrap(),
            dec!(3)
        );
    }

    #[test]
    fn test_mul_scale_up_overflow() {
        assert_eq!(
            mul_scale_up(Decimal::MAX, dec!(2), 0, Rounding::Truncate),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            mul_scale_up(Decimal::MAX, Decimal::MAX, 0, Rounding::Truncate),
            Err(NumericError::Overflow)
        );
        assert_eq!(
            mul_scale_up(dec!(1), dec!(1), 29, Rounding::Truncate),
            Err(NumericError::PrecisionOutOfRange(29))
        );
    }

    #[test]
    fn test_scale_down_is_exact() {
        let tokens = scale_down(dec!(112300000), 8).unwrap();
        assert_eq!(tokens, dec!(1.123));
        assert_eq!(tokens.to_string(), "1.12300000");

        assert_eq!(
            scale_down(dec!(1), 29),
            Err(NumericError::PrecisionOutOfRange(29))
        );
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(
            format_fixed(dec!(3), 8, Rounding::Truncate).unwrap(),
            "3.00000000"
        );
        assert_eq!(
            format_fixed(dec!(1.129), 2, Rounding::Truncate).unwrap(),
            "1.12"
        );
        assert_eq!(
            format_fixed(dec!(-1.129), 2, Rounding::Truncate).unwrap(),
            "-1.12"
        );
        assert_eq!(
            format_fixed(dec!(-0.001), 2, Rounding::Truncate).unwrap(),
            "0.00"
        );
        assert_eq!(format_fixed(dec!(42.9), 0, Rounding::Truncate).unwrap(), "42");
    }

    #[test]
    fn test_is_integer() {
        assert!(is_integer(&dec!(100)));
        assert!(is_integer(&dec!(100.000)));
        assert!(!is_integer(&dec!(100.5)));
    }
}
