//! Monetary amounts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Non-negative product price.
///
/// Backed by a `Decimal` so sums and averages don't drift, but carried over
/// the wire as a plain JSON number (`19.99`), which is what catalog files and
/// API consumers use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    pub const ZERO: Price = Price(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Result<Self, DomainError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(DomainError::validation(format!(
                "price must be non-negative, got {amount}"
            )));
        }
        Ok(Self(amount))
    }

    /// Build a price from an integer number of minor units (`cents(1999)` is `19.99`).
    pub fn cents(minor_units: u32) -> Self {
        Self(Decimal::new(i64::from(minor_units), 2))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Arithmetic mean of `prices`, or `None` when there are none.
    pub fn mean(prices: impl IntoIterator<Item = Price>) -> Option<Self> {
        let (sum, count) = prices
            .into_iter()
            .try_fold((Decimal::ZERO, 0u64), |(sum, count), p| {
                Some((sum.checked_add(p.0)?, count + 1))
            })?;
        if count == 0 {
            return None;
        }
        sum.checked_div(Decimal::from(count)).map(Self)
    }

    /// Round half away from zero to `dp` decimal places.
    pub fn round_dp(&self, dp: u32) -> Self {
        Self(self.0.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Price::new(amount).map_err(serde::de::Error::custom)
    }
}
