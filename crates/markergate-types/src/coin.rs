//! Coins and net asset values.
//!
//! Amounts are whole units of a denom, carried as [`Decimal`] so that
//! arithmetic never silently wraps.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{MarkerError, Result, validate_denom};

/// An amount of a single denom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: Decimal,
}

impl Coin {
    #[must_use]
    pub fn new(denom: impl Into<String>, amount: Decimal) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Shorthand for whole-unit amounts.
    #[must_use]
    pub fn units(denom: impl Into<String>, amount: i64) -> Self {
        Self::new(denom, Decimal::from(amount))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Valid denom, amount non-negative and integral.
    pub fn validate(&self) -> Result<()> {
        validate_denom(&self.denom)?;
        validate_amount(self.amount)
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Amounts are whole, non-negative units.
pub fn validate_amount(amount: Decimal) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(MarkerError::InvalidCoin {
            reason: format!("negative amount {amount}"),
        });
    }
    if !amount.fract().is_zero() {
        return Err(MarkerError::InvalidCoin {
            reason: format!("amount {amount} is not a whole number of units"),
        });
    }
    Ok(())
}

/// Net asset value: the price paid for `volume` units of a marker's denom.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetAssetValue {
    pub price: Coin,
    pub volume: u64,
}

impl NetAssetValue {
    #[must_use]
    pub fn new(price: Coin, volume: u64) -> Self {
        Self { price, volume }
    }

    /// A positive price requires at least one unit of observed volume.
    pub fn validate(&self) -> Result<()> {
        self.price.validate()?;
        if self.price.is_positive() && self.volume < 1 {
            return Err(MarkerError::InvalidCoin {
                reason: "marker net asset value volume must be positive value".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_positive_coin_valid() {
        assert!(Coin::units("gold", 10).validate().is_ok());
        assert!(Coin::units("gold", 0).validate().is_ok());
    }

    #[test]
    fn negative_or_fractional_rejected() {
        assert!(Coin::units("gold", -1).validate().is_err());
        assert!(Coin::new("gold", Decimal::new(15, 1)).validate().is_err());
    }

    #[test]
    fn bad_denom_rejected() {
        let err = Coin::units("1x", 5).validate().unwrap_err();
        assert!(matches!(err, MarkerError::InvalidDenom { .. }));
    }

    #[test]
    fn nav_positive_price_needs_volume() {
        let nav = NetAssetValue::new(Coin::units("usd", 100), 0);
        assert!(nav.validate().is_err());
        let nav = NetAssetValue::new(Coin::units("usd", 100), 1);
        assert!(nav.validate().is_ok());
    }

    #[test]
    fn nav_zero_price_zero_volume_ok() {
        let nav = NetAssetValue::new(Coin::units("usd", 0), 0);
        assert!(nav.validate().is_ok());
    }

    #[test]
    fn coin_display() {
        assert_eq!(Coin::units("gold", 42).to_string(), "42gold");
    }
}
