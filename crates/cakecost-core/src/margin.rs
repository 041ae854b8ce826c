//! # Margin Calculator
//!
//! Profit as a share of revenue, in basis points. Used for single sales and
//! for every rollup (monthly, dashboard, filtered totals).

use crate::money::{round_div, Money};
use crate::BPS_SCALE;

/// `round(profit × 10000 / revenue)`, or `0` when there is no revenue.
///
/// Not clamped: a loss is negative, and profit above revenue (a data anomaly)
/// goes above 10000. Callers display the value as-is.
///
/// ```rust
/// use cakecost_core::margin::margin_bps;
/// use cakecost_core::money::Money;
///
/// assert_eq!(margin_bps(Money::from_ugx(10_000), Money::from_ugx(2_500)), 2_500);
/// assert_eq!(margin_bps(Money::zero(), Money::from_ugx(1_000)), 0);
/// ```
pub fn margin_bps(revenue: Money, profit: Money) -> i64 {
    if !revenue.is_positive() {
        return 0;
    }

    round_div(
        profit.ugx() as i128 * BPS_SCALE as i128,
        revenue.ugx() as i128,
    )
}
