//! # Pricing Recommender
//!
//! Up to three candidate selling prices from a total cost, and the
//! recommendation that clears all of them.
//!
//! ## Strategies
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  MARKUP          cost + round(cost × markup_bps / 10000)                │
//! │  TARGET_PROFIT   cost + target_profit                                   │
//! │  TARGET_MARGIN   round(cost × 10000 / (10000 − margin_bps))             │
//! │                  only while margin_bps < 10000                          │
//! │                                                                         │
//! │  AUTO_RECOMMENDED = max(present candidates)                             │
//! │                                                                         │
//! │  Each configured strategy is a floor the baker wants satisfied; the     │
//! │  highest candidate is the one price that satisfies every floor.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the target margin is bounded. Markup has no upper limit.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{round_div, Money};
use crate::types::Bps;
use crate::BPS_SCALE;

// =============================================================================
// Pricing Input
// =============================================================================

/// Pricing parameters entered with a costing. Every field is optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PricingInput {
    #[serde(default)]
    pub markup_bps: Option<u32>,
    #[serde(default, rename = "targetProfitUGX")]
    pub target_profit_ugx: Option<i64>,
    #[serde(default)]
    pub target_margin_bps: Option<u32>,
    /// The price the baker actually intends to charge.
    #[serde(default, rename = "userSellingPriceUGX")]
    pub user_selling_price_ugx: Option<i64>,
}

impl PricingInput {
    pub fn markup(&self) -> Option<Bps> {
        self.markup_bps.map(Bps::from_bps)
    }

    pub fn target_profit(&self) -> Option<Money> {
        self.target_profit_ugx.map(Money::from_ugx)
    }

    pub fn target_margin(&self) -> Option<Bps> {
        self.target_margin_bps.map(Bps::from_bps)
    }

    pub fn user_selling_price(&self) -> Option<Money> {
        self.user_selling_price_ugx.map(Money::from_ugx)
    }

    /// Runs [`compute_recommended_price`] with these parameters.
    pub fn recommend(&self, total_cost: Money) -> PricingRecommendation {
        compute_recommended_price(
            total_cost,
            self.markup(),
            self.target_profit(),
            self.target_margin(),
        )
    }
}

// =============================================================================
// Pricing Mode
// =============================================================================

/// Which candidate a costing presents as its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PricingMode {
    Markup,
    TargetProfit,
    TargetMargin,
    #[default]
    AutoRecommended,
}

impl fmt::Display for PricingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingMode::Markup => write!(f, "MARKUP"),
            PricingMode::TargetProfit => write!(f, "TARGET_PROFIT"),
            PricingMode::TargetMargin => write!(f, "TARGET_MARGIN"),
            PricingMode::AutoRecommended => write!(f, "AUTO_RECOMMENDED"),
        }
    }
}

impl FromStr for PricingMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "MARKUP" => Ok(PricingMode::Markup),
            "TARGET_PROFIT" => Ok(PricingMode::TargetProfit),
            "TARGET_MARGIN" => Ok(PricingMode::TargetMargin),
            "AUTO_RECOMMENDED" => Ok(PricingMode::AutoRecommended),
            other => Err(CoreError::UnknownPricingMode(other.to_string())),
        }
    }
}

// =============================================================================
// Recommendation
// =============================================================================

/// The three candidate prices and the recommended one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricingRecommendation {
    #[serde(rename = "markupPriceUGX")]
    pub markup_price_ugx: Option<i64>,
    #[serde(rename = "targetProfitPriceUGX")]
    pub target_profit_price_ugx: Option<i64>,
    #[serde(rename = "targetMarginPriceUGX")]
    pub target_margin_price_ugx: Option<i64>,
    #[serde(rename = "autoRecommendedPriceUGX")]
    pub auto_recommended_price_ugx: Option<i64>,
}

impl PricingRecommendation {
    pub fn auto_recommended_price(&self) -> Option<Money> {
        self.auto_recommended_price_ugx.map(Money::from_ugx)
    }

    /// The candidate a pricing mode points at.
    pub fn price_for(&self, mode: PricingMode) -> Option<Money> {
        let ugx = match mode {
            PricingMode::Markup => self.markup_price_ugx,
            PricingMode::TargetProfit => self.target_profit_price_ugx,
            PricingMode::TargetMargin => self.target_margin_price_ugx,
            PricingMode::AutoRecommended => self.auto_recommended_price_ugx,
        };
        ugx.map(Money::from_ugx)
    }
}

/// Largest of the present values, `None` when all are absent.
///
/// Ties have no preference; equal candidates yield the same number.
///
/// ```rust
/// use cakecost_core::pricing::max_candidate;
///
/// assert_eq!(max_candidate(&[Some(25_000), None, Some(28_571)]), Some(28_571));
/// assert_eq!(max_candidate(&[None, None]), None);
/// ```
pub fn max_candidate(candidates: &[Option<i64>]) -> Option<i64> {
    candidates.iter().flatten().copied().max()
}

/// Price candidates for a total cost.
///
/// - markup price when `markup` is given
/// - target-profit price when `target_profit` is given
/// - target-margin price when `target_margin` is given and below 10000 bps;
///   a margin of 100% or more has no finite price and yields `None`
/// - auto recommended = [`max_candidate`] of the three
///
/// ## Example
/// ```rust
/// use cakecost_core::money::Money;
/// use cakecost_core::pricing::compute_recommended_price;
/// use cakecost_core::types::Bps;
///
/// let rec = compute_recommended_price(
///     Money::from_ugx(20_000),
///     Some(Bps::from_bps(2500)),
///     Some(Money::from_ugx(5_000)),
///     Some(Bps::from_bps(3000)),
/// );
/// assert_eq!(rec.markup_price_ugx, Some(25_000));
/// assert_eq!(rec.target_profit_price_ugx, Some(25_000));
/// assert_eq!(rec.target_margin_price_ugx, Some(28_571));
/// assert_eq!(rec.auto_recommended_price_ugx, Some(28_571));
/// ```
pub fn compute_recommended_price(
    total_cost: Money,
    markup: Option<Bps>,
    target_profit: Option<Money>,
    target_margin: Option<Bps>,
) -> PricingRecommendation {
    let markup_price = markup.map(|rate| total_cost + total_cost.percent_of(rate));

    let target_profit_price = target_profit.map(|profit| total_cost + profit);

    let target_margin_price = match target_margin {
        Some(margin) if margin.is_whole_or_more() => {
            warn!(margin_bps = margin.bps(), "Target margin of 100% or more has no price");
            None
        }
        Some(margin) => {
            let divisor = (BPS_SCALE - margin.bps() as i64) as i128;
            Some(Money::from_ugx(round_div(
                total_cost.ugx() as i128 * BPS_SCALE as i128,
                divisor,
            )))
        }
        None => None,
    };

    let candidates = [
        markup_price.map(|m| m.ugx()),
        target_profit_price.map(|m| m.ugx()),
        target_margin_price.map(|m| m.ugx()),
    ];

    PricingRecommendation {
        markup_price_ugx: candidates[0],
        target_profit_price_ugx: candidates[1],
        target_margin_price_ugx: candidates[2],
        auto_recommended_price_ugx: max_candidate(&candidates),
    }
}

/// True when the baker's price is set and strictly below the recommendation.
pub fn is_underpriced(user_price: Option<Money>, recommended: Option<Money>) -> bool {
    match (user_price, recommended) {
        (Some(user), Some(recommended)) if user < recommended => {
            warn!(
                user_price = user.ugx(),
                recommended = recommended.ugx(),
                "Selling price is below the recommended price"
            );
            true
        }
        _ => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ugx(amount: i64) -> Money {
        Money::from_ugx(amount)
    }

    fn bps(value: u32) -> Option<Bps> {
        Some(Bps::from_bps(value))
    }

    #[test]
    fn test_selects_max_valid_recommended_price() {
        let rec = compute_recommended_price(ugx(20_000), bps(2500), Some(ugx(5000)), bps(3000));
        assert_eq!(rec.markup_price_ugx, Some(25_000));
        assert_eq!(rec.target_profit_price_ugx, Some(25_000));
        assert_eq!(rec.target_margin_price_ugx, Some(28_571));
        assert_eq!(rec.auto_recommended_price_ugx, rec.target_margin_price_ugx);
    }

    #[test]
    fn test_no_parameters_gives_no_prices() {
        let rec = compute_recommended_price(ugx(20_000), None, None, None);
        assert_eq!(rec, PricingRecommendation::default());
        assert_eq!(rec.auto_recommended_price_ugx, None);
    }

    #[test]
    fn test_full_margin_is_rejected() {
        let rec = compute_recommended_price(ugx(20_000), None, None, bps(10_000));
        assert_eq!(rec.target_margin_price_ugx, None);
        assert_eq!(rec.auto_recommended_price_ugx, None);

        let rec = compute_recommended_price(ugx(20_000), None, None, bps(12_000));
        assert_eq!(rec.target_margin_price_ugx, None);
    }

    #[test]
    fn test_rejected_margin_does_not_hide_other_candidates() {
        let rec = compute_recommended_price(ugx(20_000), bps(1000), None, bps(10_000));
        assert_eq!(rec.target_margin_price_ugx, None);
        assert_eq!(rec.auto_recommended_price_ugx, Some(22_000));
    }

    #[test]
    fn test_highest_allowed_margin() {
        // 9999 bps: divisor 1 → cost × 10000
        let rec = compute_recommended_price(ugx(3), None, None, bps(9_999));
        assert_eq!(rec.target_margin_price_ugx, Some(30_000));
    }

    #[test]
    fn test_target_margin_price_saturates_instead_of_wrapping() {
        // 10^15 / 0.0001 is past i64::MAX
        let rec = compute_recommended_price(
            ugx(1_000_000_000_000_000),
            None,
            None,
            Some(Bps::from_bps(9_999)),
        );
        assert_eq!(rec.target_margin_price_ugx, Some(i64::MAX));
        assert_eq!(rec.auto_recommended_price_ugx, Some(i64::MAX));
    }

    #[test]
    fn test_markup_is_unbounded() {
        let rec = compute_recommended_price(ugx(10_000), bps(25_000), None, None);
        assert_eq!(rec.markup_price_ugx, Some(35_000));
        assert_eq!(rec.auto_recommended_price_ugx, Some(35_000));
    }

    #[test]
    fn test_zero_parameters_price_at_cost() {
        let rec = compute_recommended_price(ugx(12_345), bps(0), Some(ugx(0)), bps(0));
        assert_eq!(rec.markup_price_ugx, Some(12_345));
        assert_eq!(rec.target_profit_price_ugx, Some(12_345));
        assert_eq!(rec.target_margin_price_ugx, Some(12_345));
        assert_eq!(rec.auto_recommended_price_ugx, Some(12_345));
    }

    #[test]
    fn test_markup_rounding() {
        // 999 × 12.5% = 124.875 → 125
        let rec = compute_recommended_price(ugx(999), bps(1250), None, None);
        assert_eq!(rec.markup_price_ugx, Some(1124));
    }

    #[test]
    fn test_target_profit_wins_when_highest() {
        let rec = compute_recommended_price(ugx(10_000), bps(1000), Some(ugx(8000)), bps(2000));
        assert_eq!(rec.markup_price_ugx, Some(11_000));
        assert_eq!(rec.target_margin_price_ugx, Some(12_500));
        assert_eq!(rec.auto_recommended_price_ugx, Some(18_000));
    }

    #[test]
    fn test_max_candidate() {
        assert_eq!(max_candidate(&[]), None);
        assert_eq!(max_candidate(&[None, None, None]), None);
        assert_eq!(max_candidate(&[Some(5), None, Some(5)]), Some(5));
        assert_eq!(max_candidate(&[None, Some(-3), Some(-7)]), Some(-3));
    }

    #[test]
    fn test_price_for_mode() {
        let rec = compute_recommended_price(ugx(20_000), bps(2500), Some(ugx(1000)), None);
        assert_eq!(rec.price_for(PricingMode::Markup), Some(ugx(25_000)));
        assert_eq!(rec.price_for(PricingMode::TargetProfit), Some(ugx(21_000)));
        assert_eq!(rec.price_for(PricingMode::TargetMargin), None);
        assert_eq!(rec.price_for(PricingMode::AutoRecommended), Some(ugx(25_000)));
    }

    #[test]
    fn test_underpriced() {
        assert!(is_underpriced(Some(ugx(24_999)), Some(ugx(25_000))));
        assert!(!is_underpriced(Some(ugx(25_000)), Some(ugx(25_000))));
        assert!(!is_underpriced(None, Some(ugx(25_000))));
        assert!(!is_underpriced(Some(ugx(1)), None));
    }

    #[test]
    fn test_pricing_mode_parsing_and_default() {
        assert_eq!(PricingMode::default(), PricingMode::AutoRecommended);
        assert_eq!("target_margin".parse::<PricingMode>().unwrap(), PricingMode::TargetMargin);
        assert!("cheapest".parse::<PricingMode>().is_err());
        assert!("auto".parse::<PricingMode>().is_err());
        assert_eq!(
            serde_json::to_string(&PricingMode::TargetProfit).unwrap(),
            "\"TARGET_PROFIT\""
        );
    }

    #[test]
    fn test_recommendation_is_idempotent() {
        let input = PricingInput {
            markup_bps: Some(3300),
            target_profit_ugx: Some(4100),
            target_margin_bps: Some(2700),
            user_selling_price_ugx: None,
        };
        assert_eq!(input.recommend(ugx(17_777)), input.recommend(ugx(17_777)));
    }
}
