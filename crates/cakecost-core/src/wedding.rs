//! # Wedding Cake Costing
//!
//! A wedding cake is priced from its tiers plus extras (flowers, toppers,
//! delivery). A tier either points at an existing product costing, whose
//! total the persistence layer resolves and hands in, or carries a manual
//! cost.
//!
//! ```text
//! tier cost     = linked costing total ?? manual tier cost ?? 0
//! total         = Σ tier costs + Σ extra costs
//! cost/serving  = round(total / Σ servings)   when servings > 0
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{is_underpriced, PricingInput, PricingRecommendation};

/// One tier of a wedding cake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeddingTier {
    pub name: String,
    #[serde(default)]
    pub servings: Option<i64>,
    #[serde(default)]
    pub flavor: Option<String>,
    #[serde(default)]
    pub linked_product_costing_id: Option<String>,
    /// Total cost of the linked product costing, resolved by the caller.
    /// `None` when nothing is linked or the link no longer resolves.
    #[serde(default, rename = "linkedCostUGX")]
    pub linked_cost_ugx: Option<i64>,
    #[serde(default, rename = "manualTierCostUGX")]
    pub manual_tier_cost_ugx: Option<i64>,
}

impl WeddingTier {
    /// A linked costing wins over a manual cost; neither means zero.
    pub fn cost(&self) -> Money {
        self.linked_cost_ugx
            .or(self.manual_tier_cost_ugx)
            .map(Money::from_ugx)
            .unwrap_or_default()
    }
}

/// An add-on priced on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeddingExtra {
    pub name: String,
    #[serde(rename = "costUGX")]
    pub cost_ugx: i64,
}

impl WeddingExtra {
    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_ugx(self.cost_ugx)
    }
}

/// Cost breakdown of a wedding cake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeddingTotals {
    /// Cost used for each tier, in input order.
    #[serde(rename = "tierCostsUGX")]
    pub tier_costs_ugx: Vec<i64>,
    #[serde(rename = "tiersTotalUGX")]
    pub tiers_total_ugx: i64,
    #[serde(rename = "extrasTotalUGX")]
    pub extras_total_ugx: i64,
    #[serde(rename = "totalCostUGX")]
    pub total_cost_ugx: i64,
    pub total_servings: i64,
    #[serde(rename = "costPerServingUGX")]
    pub cost_per_serving_ugx: Option<i64>,
}

impl WeddingTotals {
    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_ugx(self.total_cost_ugx)
    }
}

pub fn compute_wedding_totals(tiers: &[WeddingTier], extras: &[WeddingExtra]) -> WeddingTotals {
    let tier_costs: Vec<Money> = tiers.iter().map(WeddingTier::cost).collect();
    let tiers_total: Money = tier_costs.iter().sum();
    let extras_total: Money = extras.iter().map(WeddingExtra::cost).sum();
    let total = tiers_total + extras_total;

    let total_servings: i64 = tiers.iter().map(|tier| tier.servings.unwrap_or(0)).sum();
    let cost_per_serving = total.per_unit(total_servings);

    debug!(
        tiers = tiers.len(),
        extras = extras.len(),
        total = total.ugx(),
        servings = total_servings,
        "Computed wedding cake totals"
    );

    WeddingTotals {
        tier_costs_ugx: tier_costs.iter().map(|m| m.ugx()).collect(),
        tiers_total_ugx: tiers_total.ugx(),
        extras_total_ugx: extras_total.ugx(),
        total_cost_ugx: total.ugx(),
        total_servings,
        cost_per_serving_ugx: cost_per_serving.map(|m| m.ugx()),
    }
}

/// A wedding cake as held by the editing form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeddingCakeDraft {
    #[serde(default)]
    pub client_name: Option<String>,
    /// ISO date of the event, kept as text; the core does no date math on it.
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub tiers: Vec<WeddingTier>,
    #[serde(default)]
    pub extras: Vec<WeddingExtra>,
    #[serde(default)]
    pub pricing: PricingInput,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct WeddingQuote {
    pub totals: WeddingTotals,
    pub pricing: PricingRecommendation,
    pub underpriced: bool,
}

impl WeddingCakeDraft {
    pub fn totals(&self) -> WeddingTotals {
        compute_wedding_totals(&self.tiers, &self.extras)
    }

    pub fn quote(&self) -> WeddingQuote {
        let totals = self.totals();
        let pricing = self.pricing.recommend(totals.total_cost());
        let underpriced = is_underpriced(
            self.pricing.user_selling_price(),
            pricing.auto_recommended_price(),
        );

        WeddingQuote {
            totals,
            pricing,
            underpriced,
        }
    }
}
