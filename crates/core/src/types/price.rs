//! Type-safe price representation using decimal arithmetic.
//!
//! Listing prices and offer amounts are denominated in TL and carried as
//! [`rust_decimal::Decimal`] to avoid binary floating point drift. On the
//! wire a price is a plain JSON number (the persisted snapshot format),
//! but numeric strings are accepted when reading because older snapshots
//! stored form input verbatim.

use core::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative amount of money in TL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero TL.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if the amount is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative);
        }
        Ok(Self(amount))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.normalize())
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Persisted snapshots carry prices as JSON numbers.
        serializer.serialize_f64(self.0.to_f64().unwrap_or_default())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PriceVisitor;

        impl Visitor<'_> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative number or numeric string")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Price, E> {
                // Malformed amounts (NaN, negatives) collapse to zero, the
                // same tolerance the loader applies to legacy snapshots.
                Ok(Decimal::from_f64(v)
                    .and_then(|d| Price::new(d).ok())
                    .unwrap_or(Price::ZERO))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Price, E> {
                Ok(Price::new(Decimal::from(v)).unwrap_or(Price::ZERO))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Price, E> {
                Ok(Price(Decimal::from(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Price, E> {
                Ok(v.trim()
                    .parse::<Decimal>()
                    .ok()
                    .and_then(|d| Price::new(d).ok())
                    .unwrap_or(Price::ZERO))
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative() {
        assert!(Price::new(Decimal::new(-1, 0)).is_err());
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(150, 0)).is_ok());
    }

    #[test]
    fn test_is_positive() {
        assert!(!Price::ZERO.is_positive());
        assert!(Price::new(Decimal::new(5, 1)).unwrap().is_positive());
    }

    #[test]
    fn test_display_normalizes() {
        let price = Price::new(Decimal::new(1500, 1)).unwrap(); // 150.0
        assert_eq!(price.to_string(), "150");
    }

    #[test]
    fn test_serialize_as_number() {
        let price = Price::new(Decimal::new(100, 0)).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "100.0");
    }

    #[test]
    fn test_deserialize_number() {
        let price: Price = serde_json::from_str("99.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(995, 1));
    }

    #[test]
    fn test_deserialize_numeric_string() {
        let price: Price = serde_json::from_str("\"150\"").unwrap();
        assert_eq!(price.amount(), Decimal::new(150, 0));
    }

    #[test]
    fn test_deserialize_garbage_coerces_to_zero() {
        let price: Price = serde_json::from_str("\"not a number\"").unwrap();
        assert_eq!(price, Price::ZERO);

        let price: Price = serde_json::from_str("-42").unwrap();
        assert_eq!(price, Price::ZERO);
    }
}
