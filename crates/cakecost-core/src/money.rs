//! # Money Module
//!
//! Provides the `Money` type for whole-unit UGX amounts and the rounding
//! helpers every aggregation step goes through.
//!
//! ## Why Whole Units?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  UGX HAS NO MINOR UNIT                                                  │
//! │                                                                         │
//! │  Every stored amount is an integer count of shillings:                  │
//! │    unit cost, line cost, subtotal, overhead, price, revenue, profit     │
//! │                                                                         │
//! │  Fractions only appear inside a single step (200 g × 12000 / 1000)      │
//! │  and are rounded back to an integer before the next addition.           │
//! │                                                                         │
//! │  ROUNDING: half away from zero                                          │
//! │    2.5 → 3    -2.5 → -3    1650.4 → 1650                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cakecost_core::money::Money;
//! use cakecost_core::types::Bps;
//!
//! let subtotal = Money::from_ugx(15_000);
//! let overhead = subtotal.percent_of(Bps::from_bps(1000)); // 10%
//! assert_eq!(overhead.ugx(), 1_500);
//! assert_eq!((subtotal + overhead).ugx(), 16_500);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::types::Bps;
use crate::BPS_SCALE;

// =============================================================================
// Rounding Helpers
// =============================================================================

/// Integer division rounded half away from zero.
///
/// Works on `i128` so that `amount × bps` products never overflow before the
/// division. A quotient outside the `i64` range saturates at `i64::MIN` or
/// `i64::MAX`. The denominator must be non-zero; callers guard the zero cases
/// (zero yield, zero revenue, 100% margin) before getting here.
///
/// ```rust
/// use cakecost_core::money::round_div;
///
/// assert_eq!(round_div(16_500, 10), 1_650);
/// assert_eq!(round_div(200_000_000, 7_000), 28_571);
/// assert_eq!(round_div(5, 2), 3);
/// assert_eq!(round_div(-5, 2), -3);
/// ```
pub fn round_div(numerator: i128, denominator: i128) -> i64 {
    debug_assert!(denominator != 0, "round_div called with zero denominator");

    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    let rounded = if remainder.abs() * 2 >= denominator.abs() {
        let away = if (numerator < 0) == (denominator < 0) { 1 } else { -1 };
        quotient + away
    } else {
        quotient
    };

    i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
}

/// Rounds a fractional amount to the nearest integer, half away from zero.
///
/// Only used where an input is fractional by nature (ingredient quantity,
/// labor hours); everything else stays in integer arithmetic.
#[inline]
pub fn round_f64(value: f64) -> i64 {
    value.round() as i64
}

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole UGX.
///
/// ## Design Decisions
/// - **i64 (signed)**: profit and margin calculations go negative on losses
/// - **Single field tuple struct**: serializes as a bare integer, exactly
///   what the persistence layer stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from a whole-shilling amount.
    #[inline]
    pub const fn from_ugx(ugx: i64) -> Self {
        Money(ugx)
    }

    /// Returns the amount in whole UGX.
    #[inline]
    pub const fn ugx(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Returns `round(self × bps / 10000)`.
    ///
    /// Used for percent-of-subtotal overhead and markup.
    ///
    /// ## Example
    /// ```rust
    /// use cakecost_core::money::Money;
    /// use cakecost_core::types::Bps;
    ///
    /// let cost = Money::from_ugx(20_000);
    /// assert_eq!(cost.percent_of(Bps::from_bps(2500)).ugx(), 5_000);
    /// ```
    pub fn percent_of(&self, rate: Bps) -> Money {
        Money(round_div(
            self.0 as i128 * rate.bps() as i128,
            BPS_SCALE as i128,
        ))
    }

    /// Multiplies money by a unit count (revenue, cost of goods sold).
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Splits the amount evenly across `units`, rounded.
    ///
    /// Returns `None` when `units` is not positive; a batch with no yield has
    /// no per-unit cost.
    ///
    /// ```rust
    /// use cakecost_core::money::Money;
    ///
    /// assert_eq!(Money::from_ugx(16_500).per_unit(10), Some(Money::from_ugx(1_650)));
    /// assert_eq!(Money::from_ugx(16_500).per_unit(0), None);
    /// ```
    pub fn per_unit(&self, units: i64) -> Option<Money> {
        if units > 0 {
            Some(Money(round_div(self.0 as i128, units as i128)))
        } else {
            None
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with a currency code and grouped digits.
///
/// ## Note
/// This is for logs and debugging. The presentation layer owns real
/// formatting and localization.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.unsigned_abs().to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}UGX {}", sign, grouped)
    }
}

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

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_div_half_away_from_zero() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(5, -2), -3);
        assert_eq!(round_div(7, 3), 2);
        assert_eq!(round_div(8, 3), 3);
        assert_eq!(round_div(0, 9), 0);
    }

    #[test]
    fn test_round_f64() {
        assert_eq!(round_f64(2.5), 3);
        assert_eq!(round_f64(-2.5), -3);
        assert_eq!(round_f64(1650.4), 1650);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_ugx(16_500)), "UGX 16,500");
        assert_eq!(format!("{}", Money::from_ugx(500)), "UGX 500");
        assert_eq!(format!("{}", Money::from_ugx(1_234_567)), "UGX 1,234,567");
        assert_eq!(format!("{}", Money::from_ugx(-2_500)), "-UGX 2,500");
        assert_eq!(format!("{}", Money::zero()), "UGX 0");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_ugx(1000);
        let b = Money::from_ugx(500);

        assert_eq!((a + b).ugx(), 1500);
        assert_eq!((a - b).ugx(), 500);
        assert_eq!(a.multiply_quantity(3).ugx(), 3000);
        assert_eq!((b - a).ugx(), -500);
    }

    #[test]
    fn test_sum() {
        let lines = [Money::from_ugx(5000), Money::from_ugx(3000), Money::from_ugx(1000)];
        let total: Money = lines.iter().sum();
        assert_eq!(total.ugx(), 9000);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_percent_of_rounds() {
        // 15001 × 10% = 1500.1 → 1500
        assert_eq!(Money::from_ugx(15_001).percent_of(Bps::from_bps(1000)).ugx(), 1500);
        // 15005 × 10% = 1500.5 → 1501
        assert_eq!(Money::from_ugx(15_005).percent_of(Bps::from_bps(1000)).ugx(), 1501);
        assert_eq!(Money::from_ugx(9_999).percent_of(Bps::zero()).ugx(), 0);
    }

    #[test]
    fn test_percent_of_large_amount_does_not_overflow() {
        let big = Money::from_ugx(i64::MAX / 2);
        let half = big.percent_of(Bps::from_bps(5000));
        assert_eq!(half.ugx(), round_div((i64::MAX / 2) as i128, 2));
    }

    #[test]
    fn test_round_div_saturates_outside_i64() {
        assert_eq!(round_div(i64::MAX as i128 * 10, 1), i64::MAX);
        assert_eq!(round_div(i64::MIN as i128 * 10, 3), i64::MIN);
        assert_eq!(round_div(i64::MAX as i128 * 2, 2), i64::MAX);
    }

    #[test]
    fn test_per_unit() {
        assert_eq!(Money::from_ugx(16_500).per_unit(10), Some(Money::from_ugx(1650)));
        assert_eq!(Money::from_ugx(10).per_unit(4), Some(Money::from_ugx(3)));
        assert_eq!(Money::from_ugx(10).per_unit(0), None);
        assert_eq!(Money::from_ugx(10).per_unit(-3), None);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!Money::from_ugx(-100).is_positive());
        assert!(Money::from_ugx(1).is_positive());
    }
}
