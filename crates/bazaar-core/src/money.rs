//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                         │
//! │                                                                     │
//! │  In floating point:                                                 │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                        │
//! │                                                                     │
//! │  A 12.5% discount on 9.99 lands on 8.74125 - which subunit does     │
//! │  the customer actually pay?                                         │
//! │                                                                     │
//! │  OUR SOLUTION: integer subunits everywhere, explicit rounding in    │
//! │  exactly one place (`percent_of`).                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Percentages are expressed in basis points (1 bp = 0.01%), so fractional
//! percents like 12.5% stay integer arithmetic: 1250 bps.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate results of discount math may dip negative
///   before being floored; the boundary validators keep stored prices >= 0
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Derives**: full serde support so snapshots round-trip through the
///   surrounding API/storage layers unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from subunits (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in subunits.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major-unit portion.
    #[inline]
    pub const fn units(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor-unit portion (always 0-99).
    #[inline]
    pub const fn subunits(&self) -> i64 {
        (self.0 % 100).abs()
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the smaller of two Money values.
    #[inline]
    pub const fn min(self, other: Money) -> Money {
        if self.0 <= other.0 {
            self
        } else {
            other
        }
    }

    /// Computes a rounded percentage share of this amount.
    ///
    /// ## Arguments
    /// * `bps` - share in basis points (5000 = 50%, 1250 = 12.5%)
    ///
    /// ## Implementation
    /// Integer math in i128 to prevent overflow on large amounts:
    /// `(cents * bps + 5000) / 10000`. The +5000 rounds the result to the
    /// nearest subunit (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let base = Money::from_cents(1000);
    /// assert_eq!(base.percent_of(5000).cents(), 500);  // 50%
    /// assert_eq!(base.percent_of(1250).cents(), 125);  // 12.5%
    /// ```
    pub fn percent_of(&self, bps: u32) -> Money {
        let share = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(share as i64)
    }

    /// Subtracts another amount, flooring the result at zero.
    ///
    /// Used when applying fixed discounts: a discount larger than the price
    /// yields a free item, never a negative price.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let base = Money::from_cents(200);
    /// assert_eq!(base.saturating_sub(Money::from_cents(300)).cents(), 0);
    /// assert_eq!(base.saturating_sub(Money::from_cents(50)).cents(), 150);
    /// ```
    #[inline]
    pub const fn saturating_sub(&self, other: Money) -> Money {
        let remainder = self.0 - other.0;
        if remainder < 0 {
            Money(0)
        } else {
            Money(remainder)
        }
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable, currency-neutral
/// format. Locale-aware formatting is the presentation layer's job.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.units().abs(), self.subunits())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
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
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.units(), 10);
        assert_eq!(money.subunits(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let mut acc = Money::zero();
        acc += a;
        acc -= b;
        assert_eq!(acc.cents(), 500);
    }

    #[test]
    fn test_percent_of() {
        let base = Money::from_cents(1000);
        assert_eq!(base.percent_of(5000).cents(), 500); // 50%
        assert_eq!(base.percent_of(10000).cents(), 1000); // 100%
        assert_eq!(base.percent_of(1).cents(), 0); // 0.01% of 10.00 rounds to 0
    }

    #[test]
    fn test_percent_of_rounds_to_nearest() {
        // 12.5% of 9.99 = 1.24875 → 1.25
        let base = Money::from_cents(999);
        assert_eq!(base.percent_of(1250).cents(), 125);

        // 33.33% of 1.00 = 0.3333 → 0.33
        let base = Money::from_cents(100);
        assert_eq!(base.percent_of(3333).cents(), 33);
    }

    #[test]
    fn test_saturating_sub_floors_at_zero() {
        let base = Money::from_cents(200);
        assert_eq!(base.saturating_sub(Money::from_cents(500)).cents(), 0);
        assert_eq!(base.saturating_sub(Money::from_cents(200)).cents(), 0);
        assert_eq!(base.saturating_sub(Money::from_cents(1)).cents(), 199);
    }

    #[test]
    fn test_min() {
        let a = Money::from_cents(300);
        let b = Money::from_cents(100);
        assert_eq!(a.min(b).cents(), 100);
        assert_eq!(b.min(a).cents(), 100);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 200, 300]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 600);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
    }
}
