//! Fixed-point monetary amounts.
//!
//! [`Money`] wraps a [`rust_decimal::Decimal`] held at two fractional
//! digits. All ledger arithmetic goes through this type so that repeated
//! additions never accumulate binary floating-point drift.
//!
//! On the wire an amount is a JSON string with exactly two fractional
//! digits (`"30.00"`). Both strings and JSON numbers are accepted on input.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of fractional digits carried by every amount.
pub const MONEY_SCALE: u32 = 2;

/// Errors raised when an amount cannot be represented as [`Money`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    /// The input is not a decimal number.
    #[error("invalid amount: {0}")]
    Invalid(String),

    /// The input carries more than two significant fractional digits.
    #[error("amount {0} has more than 2 decimal places")]
    TooPrecise(String),

    /// The input is larger in magnitude than [`Money::MAX`].
    #[error("amount {0} exceeds the maximum of 9999999999.99")]
    OutOfRange(String),
}

/// A signed amount of money with two fractional digits.
///
/// Transaction amounts are never negative (checked at the write boundary),
/// but balances derived from them can be, so the type itself is signed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest storable amount, `9999999999.99` (the `NUMERIC(12,2)` ceiling).
    pub const MAX: Self = Self(Decimal::from_parts(0xD4A5_0FFF, 0xE8, 0, false, MONEY_SCALE));

    /// Builds an amount from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, MONEY_SCALE))
    }

    /// Builds an amount from a decimal, rejecting sub-cent precision.
    ///
    /// Trailing zeros beyond two places are accepted (`1.500` is `1.50`).
    ///
    /// # Errors
    ///
    /// Returns [`MoneyError::TooPrecise`] if the value has more than two
    /// significant fractional digits, or [`MoneyError::OutOfRange`] if its
    /// magnitude exceeds [`Money::MAX`].
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        if value.abs() > Self::MAX.0 {
            return Err(MoneyError::OutOfRange(value.to_string()));
        }
        let normalized = value.normalize();
        if normalized.scale() > MONEY_SCALE {
            return Err(MoneyError::TooPrecise(value.to_string()));
        }
        let mut scaled = normalized;
        scaled.rescale(MONEY_SCALE);
        if scaled.is_zero() {
            scaled.set_sign_positive(true);
        }
        Ok(Self(scaled))
    }

    /// Returns the underlying decimal.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns `true` if the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Returns `true` if the amount is strictly above zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0.is_sign_positive() && !self.0.is_zero()
    }

    /// Returns `true` if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut value = self.0;
        value.rescale(MONEY_SCALE);
        write!(f, "{value}")
    }
}

impl FromStr for Money {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = Decimal::from_str(s.trim()).map_err(|_| MoneyError::Invalid(s.to_string()))?;
        Self::from_decimal(value)
    }
}

impl TryFrom<Decimal> for Money {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::from_decimal(value)
    }
}

impl From<Money> for Decimal {
    fn from(money: Money) -> Self {
        money.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl Visitor<'_> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a decimal amount with at most 2 fractional digits")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Money, E> {
        v.parse().map_err(E::custom)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Money, E> {
        Money::from_decimal(Decimal::from(v)).map_err(E::custom)
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Money, E> {
        let value = Decimal::try_from(v).map_err(|_| E::custom(MoneyError::Invalid(v.to_string())))?;
        Money::from_decimal(value).map_err(E::custom)
    }
}
