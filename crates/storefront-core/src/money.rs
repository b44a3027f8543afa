//! # Money Module
//!
//! Provides the `Money` type for handling prices and reductions safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  With floats:                                                           │
//! │    100 × 0.29 = 28.999999999999996  → floor = 28  ❌ WRONG!             │
//! │                                                                         │
//! │  OUR SOLUTION: Integer units + basis-point rates                        │
//! │    100 × 2900 / 10000 = 29 (exact, i128 intermediate)                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storefront prices are whole currency units (no minor unit), so `Money`
//! wraps an `i64` count of units. Every discount computation floors.
//!
//! ## Usage
//! ```rust
//! use storefront_core::money::Money;
//!
//! let price = Money::from_units(10_000);
//! let line = price.multiply_quantity(3);
//! assert_eq!(line.units(), 30_000);
//! assert_eq!(line.percent_of(10).units(), 3_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary amount in whole currency units.
///
/// ## Design Decisions
/// - **i64 (signed)**: raw admin input may be negative before the validator
///   clamps it; stored prices and computed totals are never negative
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a plain number
/// - **Saturating arithmetic**: `+`, `-`, `Sum` and quantity multiplication
///   stop at `i64::MAX`/`i64::MIN` instead of panicking; the validator caps
///   prices at `MAX_PRICE` so real carts stay far below the ceiling
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(transparent)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole currency units.
    #[inline]
    pub const fn from_units(units: i64) -> Self {
        Money(units)
    }

    /// Returns the amount in whole currency units.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// let unit_price = Money::from_units(1_000);
    /// assert_eq!(unit_price.multiply_quantity(12).units(), 12_000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Returns `floor(self × rate)`.
    ///
    /// The rate is held in basis points, so the product is exact in `i128`
    /// and the division by 10000 floors for non-negative amounts.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    /// use storefront_core::types::DiscountRate;
    ///
    /// let raw = Money::from_units(12_000);
    /// let rate = DiscountRate::from_percent(10.0);
    /// assert_eq!(raw.apply_rate(rate).units(), 1_200);
    /// ```
    pub fn apply_rate(&self, rate: DiscountRate) -> Money {
        let amount = (self.0 as i128 * rate.bps() as i128).div_euclid(10_000);
        Money(amount as i64)
    }

    /// Returns `floor(self × percent / 100)` for an integer percent.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(Money::from_units(10_800).percent_of(10).units(), 1_080);
    /// assert_eq!(Money::from_units(999).percent_of(10).units(), 99);
    /// ```
    pub fn percent_of(&self, percent: i64) -> Money {
        let amount = (self.0 as i128 * percent as i128).div_euclid(100);
        Money(amount as i64)
    }

    /// Subtracts without going below zero.
    #[inline]
    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).max(0))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-friendly display (`12000`).
///
/// ## Note
/// Storefront display strings come from the host's price formatter, which
/// adds separators and the currency suffix.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_units() {
        let money = Money::from_units(12_000);
        assert_eq!(money.units(), 12_000);
        assert!(!money.is_zero());
        assert!(Money::zero().is_zero());
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_units(1_000);
        let b = Money::from_units(400);

        assert_eq!((a + b).units(), 1_400);
        assert_eq!((a - b).units(), 600);
        assert_eq!(b.saturating_sub(a), Money::zero());
        assert_eq!(a.min(b), b);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.units(), 1_800);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_units(i64::MAX - 10);

        assert_eq!((big + big).units(), i64::MAX);
        assert_eq!((Money::zero() - big - big).units(), i64::MIN);

        let mut acc = big;
        acc += Money::from_units(100);
        assert_eq!(acc.units(), i64::MAX);

        let total: Money = vec![big, big, big].into_iter().sum();
        assert_eq!(total.units(), i64::MAX);
        assert_eq!(big.multiply_quantity(3).units(), i64::MAX);
    }

    #[test]
    fn test_apply_rate_floors() {
        // 999 × 10% = 99.9 → 99
        let amount = Money::from_units(999);
        assert_eq!(amount.apply_rate(DiscountRate::from_bps(1_000)).units(), 99);
    }

    /// 0.29 has no exact binary representation; basis points keep the
    /// discount exact where `floor(100.0 * 0.29)` would lose a unit.
    #[test]
    fn test_apply_rate_is_exact_where_floats_are_not() {
        let amount = Money::from_units(100);
        let rate = DiscountRate::from_fraction(0.29);
        assert_eq!(amount.apply_rate(rate).units(), 29);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(Money::from_units(10_000).percent_of(10).units(), 1_000);
        assert_eq!(Money::from_units(10_800).percent_of(10).units(), 1_080);
        assert_eq!(Money::from_units(15).percent_of(50).units(), 7);
        assert_eq!(Money::from_units(500).percent_of(0).units(), 0);
        assert_eq!(Money::from_units(500).percent_of(100).units(), 500);
    }

    #[test]
    fn test_display_and_serde() {
        let money = Money::from_units(9_720);
        assert_eq!(money.to_string(), "9720");
        assert_eq!(serde_json::to_string(&money).unwrap(), "9720");
    }
}
