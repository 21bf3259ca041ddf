// ============================================================================
// Money Domain Model
// Immutable amount of a single asset, stored in minor units ("coins")
// ============================================================================

use super::{Amount, AssetDescriptor, AssetId, AssetRef};
use crate::error::{Error, Result};
use crate::numeric::{
    is_integer, mul_scale_up, parse_decimal, parse_truncated, scale_up, to_integer, NumericError,
    Rounding,
};
use crate::registry::AssetRegistry;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Quantity of an asset.
///
/// The amount is kept as an integer number of coins; tokens are derived as
/// `coins / 10^precision`. Every operation returns a new value.
///
/// # Example
/// ```
/// use ledger_money::prelude::*;
/// use std::sync::Arc;
///
/// let waves = Arc::new(AssetDescriptor::native());
/// let a = Money::from_tokens_with("1.1", Arc::clone(&waves)).unwrap();
/// let b = Money::from_tokens_with("1.9", waves).unwrap();
///
/// assert_eq!(a.add(&b).unwrap().to_tokens(), "3.00000000");
/// ```
#[derive(Debug, Clone)]
pub struct Money {
    asset: Arc<AssetDescriptor>,
    coins: Decimal,
}

// Numeric parse failures surface as bad arguments to the caller.
fn invalid_amount(input: &str, err: NumericError) -> Error {
    match err {
        NumericError::InvalidInput => {
            Error::InvalidArgument(format!("{input:?} is not a decimal string"))
        },
        other => Error::Numeric(other),
    }
}

impl Money {
    // ========================================================================
    // Construction
    // ========================================================================

    fn from_parts(asset: Arc<AssetDescriptor>, coins: Decimal) -> Self {
        Self {
            asset,
            coins: to_integer(coins, Rounding::Truncate),
        }
    }

    /// Create from a token (display unit) string, resolving the asset first.
    ///
    /// Fraction digits beyond the asset's precision are dropped.
    ///
    /// # Errors
    /// - `InvalidArgument` if `amount` is not a decimal string; reported
    ///   before the registry is consulted
    /// - `AssetNotFound` if the asset cannot be resolved
    pub async fn from_tokens(
        amount: impl Into<Amount>,
        asset: impl Into<AssetRef>,
        registry: &AssetRegistry,
    ) -> Result<Self> {
        let amount = amount.into();
        let tokens = amount.as_text()?;
        let asset = registry.resolve(asset).await?;
        Self::from_tokens_with(tokens, asset)
    }

    /// Create from a coin (minor unit) string, resolving the asset first.
    ///
    /// # Errors
    /// - `InvalidArgument` if `amount` is not a decimal string or is fractional
    /// - `AssetNotFound` if the asset cannot be resolved
    pub async fn from_coins(
        amount: impl Into<Amount>,
        asset: impl Into<AssetRef>,
        registry: &AssetRegistry,
    ) -> Result<Self> {
        let amount = amount.into();
        let coins = amount.as_text()?;
        let asset = registry.resolve(asset).await?;
        Self::from_coins_with(coins, asset)
    }

    /// Create from a token string against an already resolved asset.
    pub fn from_tokens_with(tokens: &str, asset: Arc<AssetDescriptor>) -> Result<Self> {
        let precision = asset.precision();
        let value = parse_truncated(tokens, precision, Rounding::Truncate)
            .map_err(|err| invalid_amount(tokens, err))?;
        let coins = scale_up(value, precision, Rounding::Truncate)?;
        Ok(Self::from_parts(asset, coins))
    }

    /// Create from a coin string against an already resolved asset.
    pub fn from_coins_with(coins: &str, asset: Arc<AssetDescriptor>) -> Result<Self> {
        let value = parse_decimal(coins).map_err(|err| invalid_amount(coins, err))?;
        if !is_integer(&value) {
            return Err(Error::InvalidArgument(format!(
                "coins must be a whole number, got {coins:?}"
            )));
        }
        Ok(Self::from_parts(asset, value))
    }

    /// Zero of the given asset.
    pub fn zero(asset: Arc<AssetDescriptor>) -> Self {
        Self::from_parts(asset, Decimal::ZERO)
    }

    /// Same asset, new token amount.
    pub fn clone_with_tokens(&self, tokens: &str) -> Result<Self> {
        Self::from_tokens_with(tokens, Arc::clone(&self.asset))
    }

    /// Same asset, new coin amount.
    pub fn clone_with_coins(&self, coins: &str) -> Result<Self> {
        Self::from_coins_with(coins, Arc::clone(&self.asset))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn asset(&self) -> &Arc<AssetDescriptor> {
        &self.asset
    }

    pub fn asset_id(&self) -> &AssetId {
        self.asset.id()
    }

    /// Amount in minor units.
    pub fn get_coins(&self) -> Decimal {
        self.coins
    }

    /// Amount in display units, carrying exactly `precision` fraction digits.
    pub fn get_tokens(&self) -> Decimal {
        // coins always has scale 0 and precision <= MAX_PRECISION, so moving
        // the decimal point cannot fail
        Decimal::from_i128_with_scale(self.coins.mantissa(), self.asset.precision())
    }

    /// Coins formatted without a fractional part.
    pub fn to_coins(&self) -> String {
        self.coins.to_string()
    }

    /// Tokens formatted with exactly `precision` fraction digits.
    pub fn to_tokens(&self) -> String {
        self.get_tokens().to_string()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.coins.is_zero()
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.coins.is_sign_positive() && !self.coins.is_zero()
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.coins.is_sign_negative() && !self.coins.is_zero()
    }

    // ========================================================================
    // Arithmetic
    // ========================================================================

    fn ensure_same_asset(&self, other: &Money) -> Result<()> {
        if self.asset.same_asset(&other.asset) {
            Ok(())
        } else {
            Err(Error::IncompatibleAsset {
                left: self.asset.id().clone(),
                right: other.asset.id().clone(),
            })
        }
    }

    /// Sum of two amounts of the same asset.
    ///
    /// # Errors
    /// `IncompatibleAsset` if the assets differ, `Numeric(Overflow)` if the
    /// sum does not fit.
    #[allow(clippy::should_implement_trait)]
    pub fn add(&self, other: &Money) -> Result<Money> {
        self.ensure_same_asset(other)?;
        let coins = self
            .coins
            .checked_add(other.coins)
            .ok_or(NumericError::Overflow)?;
        Ok(Self::from_parts(Arc::clone(&self.asset), coins))
    }

    /// Difference of two amounts of the same asset. May go negative.
    #[allow(clippy::should_implement_trait)]
    pub fn sub(&self, other: &Money) -> Result<Money> {
        self.ensure_same_asset(other)?;
        let coins = self
            .coins
            .checked_sub(other.coins)
            .ok_or(NumericError::Overflow)?;
        Ok(Self::from_parts(Arc::clone(&self.asset), coins))
    }

    #[inline]
    pub fn subtract(&self, other: &Money) -> Result<Money> {
        self.sub(other)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn neg(&self) -> Money {
        Self::from_parts(Arc::clone(&self.asset), -self.coins)
    }

    pub fn abs(&self) -> Money {
        Self::from_parts(Arc::clone(&self.asset), self.coins.abs())
    }

    // ========================================================================
    // Comparison
    // ========================================================================

    /// Order two amounts of the same asset.
    pub fn checked_cmp(&self, other: &Money) -> Result<Ordering> {
        self.ensure_same_asset(other)?;
        Ok(self.coins.cmp(&other.coins))
    }

    pub fn eq_value(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Equal)
    }

    pub fn lt(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Less)
    }

    pub fn lte(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Greater)
    }

    pub fn gt(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? == Ordering::Greater)
    }

    pub fn gte(&self, other: &Money) -> Result<bool> {
        Ok(self.checked_cmp(other)? != Ordering::Less)
    }

    // ========================================================================
    // Conversion
    // ========================================================================

    /// Express `money` in `target` at `rate` target tokens per source token.
    ///
    /// The product is computed at full precision and then truncated to the
    /// target's precision. Converting to the asset `money` already has hands
    /// the same value back untouched.
    ///
    /// # Example
    /// ```
    /// use ledger_money::prelude::*;
    /// use rust_decimal::Decimal;
    /// use std::sync::Arc;
    ///
    /// let waves = Arc::new(AssetDescriptor::native());
    /// let four = Arc::new(AssetDescriptor::new("FOUR", "Four", 4).unwrap());
    ///
    /// let money = Money::from_tokens_with("100", waves).unwrap();
    /// let converted = Money::convert(money, &four, Decimal::new(25, 2)).unwrap();
    /// assert_eq!(converted.to_tokens(), "25.0000");
    /// ```
    pub fn convert(money: Money, target: &Arc<AssetDescriptor>, rate: Decimal) -> Result<Money> {
        if money.asset.same_asset(target) {
            return Ok(money);
        }

        let coins = mul_scale_up(
            money.get_tokens(),
            rate,
            target.precision(),
            Rounding::Truncate,
        )?;

        tracing::trace!(
            from = %money.asset.id(),
            to = %target.id(),
            %rate,
            "converted money"
        );

        Ok(Self::from_parts(Arc::clone(target), coins))
    }
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.asset.same_asset(&other.asset) && self.coins == other.coins
    }
}

impl Eq for Money {}

impl PartialOrd for Money {
    /// `None` for amounts of different assets.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.checked_cmp(other).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_tokens(), self.asset.id())
    }
}
