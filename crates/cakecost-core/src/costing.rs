//! # Product Costing
//!
//! Line costs and batch totals for a product recipe.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Product Costing Pipeline                          │
//! │                                                                         │
//! │  ingredients ──► Σ ingredient_line_cost ──┐                             │
//! │  packaging   ──► Σ cost_ugx             ──┼──► subtotal                 │
//! │  labor       ──► labor_cost             ──┘       │                     │
//! │                                                   ▼                     │
//! │  overhead (flat UGX | bps of subtotal) ─────► overhead                  │
//! │                                                   │                     │
//! │                                 subtotal + overhead ──► total           │
//! │                                                   │                     │
//! │                               total ÷ yield units ──► cost per unit     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Overhead is always taken from the subtotal, never from the total.
//! Every addition happens on already-rounded integers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};
use ts_rs::TS;

use crate::error::CoreError;
use crate::money::{round_f64, Money};
use crate::pricing::{is_underpriced, PricingInput, PricingMode, PricingRecommendation};
use crate::types::Bps;
use crate::units::{IngredientUnit, MILLI_PER_BASE_UNIT};

// =============================================================================
// Input Lines
// =============================================================================

/// One ingredient in a recipe.
///
/// `unit_cost_ugx` is the price per kilogram, liter or piece; a line entered
/// in grams or milliliters is scaled down by 1000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct IngredientLine {
    #[serde(default)]
    pub name: String,
    /// Quantity used, must be positive.
    pub qty: f64,
    pub unit: IngredientUnit,
    #[serde(rename = "unitCostUGX")]
    pub unit_cost_ugx: i64,
}

impl IngredientLine {
    pub fn new(qty: f64, unit: IngredientUnit, unit_cost_ugx: i64) -> Self {
        IngredientLine {
            name: String::new(),
            qty,
            unit,
            unit_cost_ugx,
        }
    }

    #[inline]
    pub fn unit_cost(&self) -> Money {
        Money::from_ugx(self.unit_cost_ugx)
    }

    /// Cost of this line, see [`ingredient_line_cost`].
    pub fn line_cost(&self) -> Money {
        ingredient_line_cost(self.qty, self.unit, self.unit_cost())
    }
}

/// A packaging item (box, board, ribbon) at a fixed cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PackagingLine {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "costUGX")]
    pub cost_ugx: i64,
}

impl PackagingLine {
    pub fn new(cost_ugx: i64) -> Self {
        PackagingLine {
            name: String::new(),
            cost_ugx,
        }
    }

    #[inline]
    pub fn cost(&self) -> Money {
        Money::from_ugx(self.cost_ugx)
    }
}

/// Labor spent on one batch. Absent fields count as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LaborInput {
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default, rename = "rateUGXPerHour")]
    pub rate_ugx_per_hour: Option<i64>,
}

impl LaborInput {
    pub fn new(hours: f64, rate_ugx_per_hour: i64) -> Self {
        LaborInput {
            hours: Some(hours),
            rate_ugx_per_hour: Some(rate_ugx_per_hour),
        }
    }

    pub fn cost(&self) -> Money {
        labor_cost(self.hours, self.rate_ugx_per_hour.map(Money::from_ugx))
    }
}

// =============================================================================
// Overhead
// =============================================================================

/// How the overhead value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OverheadMode {
    /// `value` is an absolute UGX amount.
    #[default]
    #[serde(rename = "flatUGX")]
    FlatUgx,
    /// `value` is basis points of the subtotal.
    #[serde(rename = "percentOfSubtotal")]
    PercentOfSubtotal,
}

impl fmt::Display for OverheadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverheadMode::FlatUgx => write!(f, "flatUGX"),
            OverheadMode::PercentOfSubtotal => write!(f, "percentOfSubtotal"),
        }
    }
}

impl FromStr for OverheadMode {
    type Err = CoreError;

    /// Accepts both the form tokens and the stored enum names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "flatUGX" | "FLAT_UGX" => Ok(OverheadMode::FlatUgx),
            "percentOfSubtotal" | "PERCENT_OF_SUBTOTAL" => Ok(OverheadMode::PercentOfSubtotal),
            other => Err(CoreError::UnknownOverheadMode(other.to_string())),
        }
    }
}

/// Overhead setting for a costing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OverheadInput {
    pub mode: OverheadMode,
    /// UGX in flat mode, basis points in percent mode.
    pub value: i64,
}

impl OverheadInput {
    pub const fn flat(ugx: i64) -> Self {
        OverheadInput {
            mode: OverheadMode::FlatUgx,
            value: ugx,
        }
    }

    pub const fn percent_of_subtotal(bps: u32) -> Self {
        OverheadInput {
            mode: OverheadMode::PercentOfSubtotal,
            value: bps as i64,
        }
    }

    /// Overhead amount for a given subtotal.
    pub fn apply(&self, subtotal: Money) -> Money {
        match self.mode {
            OverheadMode::FlatUgx => Money::from_ugx(self.value),
            // Validated values are non-negative; clamp so the u32 cast cannot wrap.
            OverheadMode::PercentOfSubtotal => {
                let bps = self.value.clamp(0, u32::MAX as i64) as u32;
                subtotal.percent_of(Bps::from_bps(bps))
            }
        }
    }
}

// =============================================================================
// Line Cost Calculator
// =============================================================================

/// Cost of one ingredient line.
///
/// - `g`, `ml`: `round(qty × unit_cost / 1000)`
/// - `kg`, `l`, `pcs`: `round(qty × unit_cost)`
///
/// Rounding happens once, after the multiply-divide. `unit_cost` must be
/// non-negative; the validation layer guarantees it and this function does
/// not re-check.
///
/// ## Example
/// ```rust
/// use cakecost_core::costing::ingredient_line_cost;
/// use cakecost_core::money::Money;
/// use cakecost_core::units::IngredientUnit;
///
/// // 200 g of butter at UGX 12,000 per kg
/// let cost = ingredient_line_cost(200.0, IngredientUnit::G, Money::from_ugx(12_000));
/// assert_eq!(cost.ugx(), 2_400);
/// ```
pub fn ingredient_line_cost(qty: f64, unit: IngredientUnit, unit_cost: Money) -> Money {
    let raw = qty * unit_cost.ugx() as f64;
    let cost = if unit.is_milli() {
        round_f64(raw / MILLI_PER_BASE_UNIT)
    } else {
        round_f64(raw)
    };
    Money::from_ugx(cost)
}

/// Labor cost: `round(hours × rate)`, absent values count as zero.
pub fn labor_cost(hours: Option<f64>, rate_per_hour: Option<Money>) -> Money {
    let hours = hours.unwrap_or(0.0);
    let rate = rate_per_hour.unwrap_or_default();
    Money::from_ugx(round_f64(hours * rate.ugx() as f64))
}

// =============================================================================
// Totals Aggregator
// =============================================================================

/// Computed cost breakdown of one product batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductTotals {
    #[serde(rename = "ingredientSubtotalUGX")]
    pub ingredient_subtotal_ugx: i64,
    #[serde(rename = "packagingSubtotalUGX")]
    pub packaging_subtotal_ugx: i64,
    #[serde(rename = "laborCostUGX")]
    pub labor_cost_ugx: i64,
    #[serde(rename = "subtotalUGX")]
    pub subtotal_ugx: i64,
    #[serde(rename = "overheadUGX")]
    pub overhead_ugx: i64,
    #[serde(rename = "totalCostUGX")]
    pub total_cost_ugx: i64,
    /// `None` when the batch has no positive yield.
    #[serde(rename = "costPerUnitUGX")]
    pub cost_per_unit_ugx: Option<i64>,
}

impl ProductTotals {
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_ugx(self.subtotal_ugx)
    }

    #[inline]
    pub fn total_cost(&self) -> Money {
        Money::from_ugx(self.total_cost_ugx)
    }

    #[inline]
    pub fn cost_per_unit(&self) -> Option<Money> {
        self.cost_per_unit_ugx.map(Money::from_ugx)
    }
}

/// Aggregates a recipe into its cost breakdown.
///
/// ## Steps
/// 1. ingredient subtotal = Σ [`ingredient_line_cost`]
/// 2. packaging subtotal = Σ packaging costs
/// 3. labor cost = [`labor_cost`]
/// 4. subtotal = 1 + 2 + 3
/// 5. overhead = flat value, or `round(subtotal × bps / 10000)`
/// 6. total = subtotal + overhead
/// 7. cost per unit = `round(total / yield)` when `yield > 0`
///
/// ## Example
/// ```rust
/// use cakecost_core::costing::{
///     compute_product_totals, IngredientLine, LaborInput, OverheadInput, PackagingLine,
/// };
/// use cakecost_core::units::IngredientUnit;
///
/// let totals = compute_product_totals(
///     &[
///         IngredientLine::new(1000.0, IngredientUnit::G, 5000),
///         IngredientLine::new(6.0, IngredientUnit::Pcs, 500),
///     ],
///     &[PackagingLine::new(1000)],
///     &LaborInput::new(2.0, 3000),
///     &OverheadInput::percent_of_subtotal(1000),
///     Some(10),
/// );
///
/// assert_eq!(totals.subtotal_ugx, 15_000);
/// assert_eq!(totals.overhead_ugx, 1_500);
/// assert_eq!(totals.total_cost_ugx, 16_500);
/// assert_eq!(totals.cost_per_unit_ugx, Some(1_650));
/// ```
pub fn compute_product_totals(
    ingredients: &[IngredientLine],
    packaging: &[PackagingLine],
    labor: &LaborInput,
    overhead: &OverheadInput,
    yield_units: Option<i64>,
) -> ProductTotals {
    let ingredient_subtotal: Money = ingredients
        .iter()
        .map(|line| {
            let cost = line.line_cost();
            trace!(qty = line.qty, unit = %line.unit, cost = cost.ugx(), "Ingredient line cost");
            cost
        })
        .sum();
    let packaging_subtotal: Money = packaging.iter().map(PackagingLine::cost).sum();
    let labor = labor.cost();

    let subtotal = ingredient_subtotal + packaging_subtotal + labor;
    let overhead_amount = overhead.apply(subtotal);
    let total = subtotal + overhead_amount;
    let cost_per_unit = yield_units.and_then(|units| total.per_unit(units));

    debug!(
        ingredients = ingredients.len(),
        packaging = packaging.len(),
        subtotal = subtotal.ugx(),
        overhead_mode = %overhead.mode,
        overhead = overhead_amount.ugx(),
        total = total.ugx(),
        cost_per_unit = ?cost_per_unit.map(|m| m.ugx()),
        "Computed product totals"
    );

    ProductTotals {
        ingredient_subtotal_ugx: ingredient_subtotal.ugx(),
        packaging_subtotal_ugx: packaging_subtotal.ugx(),
        labor_cost_ugx: labor.ugx(),
        subtotal_ugx: subtotal.ugx(),
        overhead_ugx: overhead_amount.ugx(),
        total_cost_ugx: total.ugx(),
        cost_per_unit_ugx: cost_per_unit.map(|m| m.ugx()),
    }
}

// =============================================================================
// Product Costing Draft
// =============================================================================

/// Everything the costing form holds for one product, as an immutable value.
///
/// The editing surface builds a new draft on every change and asks for a
/// fresh [`CostingQuote`]; nothing is cached between calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCostingDraft {
    pub name: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub ingredients: Vec<IngredientLine>,
    #[serde(default)]
    pub packaging: Vec<PackagingLine>,
    #[serde(default)]
    pub labor: LaborInput,
    #[serde(default)]
    pub overhead: OverheadInput,
    #[serde(default)]
    pub yield_units: Option<i64>,
    /// Display label for one unit ("slice", "cupcake").
    #[serde(default)]
    pub yield_unit_label: Option<String>,
    #[serde(default)]
    pub pricing: PricingInput,
    #[serde(default)]
    pub pricing_mode: PricingMode,
}

/// Totals, price candidates and the chosen price for a draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostingQuote {
    pub totals: ProductTotals,
    pub pricing: PricingRecommendation,
    /// Candidate picked by the draft's pricing mode.
    #[serde(rename = "selectedPriceUGX")]
    pub selected_price_ugx: Option<i64>,
    /// The baker's own price is below the recommendation.
    pub underpriced: bool,
}

impl ProductCostingDraft {
    pub fn totals(&self) -> ProductTotals {
        compute_product_totals(
            &self.ingredients,
            &self.packaging,
            &self.labor,
            &self.overhead,
            self.yield_units,
        )
    }

    pub fn quote(&self) -> CostingQuote {
        let totals = self.totals();
        let pricing = self.pricing.recommend(totals.total_cost());
        let selected = pricing.price_for(self.pricing_mode);
        let underpriced = is_underpriced(
            self.pricing.user_selling_price(),
            pricing.auto_recommended_price(),
        );

        debug!(
            name = %self.name,
            total = totals.total_cost_ugx,
            mode = %self.pricing_mode,
            selected = ?selected.map(|m| m.ugx()),
            underpriced,
            "Quoted product costing"
        );

        CostingQuote {
            totals,
            pricing,
            selected_price_ugx: selected.map(|m| m.ugx()),
            underpriced,
        }
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

    #[test]
    fn test_gram_line_cost() {
        assert_eq!(ingredient_line_cost(200.0, IngredientUnit::G, ugx(12_000)).ugx(), 2_400);
    }

    #[test]
    fn test_piece_line_cost() {
        assert_eq!(ingredient_line_cost(4.0, IngredientUnit::Pcs, ugx(500)).ugx(), 2_000);
    }

    #[test]
    fn test_milliliter_line_cost_rounds_once() {
        // 333 ml × 1001 / 1000 = 333.333 → 333
        assert_eq!(ingredient_line_cost(333.0, IngredientUnit::Ml, ugx(1001)).ugx(), 333);
        // 250 ml × 3002 / 1000 = 750.5 → 751
        assert_eq!(ingredient_line_cost(250.0, IngredientUnit::Ml, ugx(3002)).ugx(), 751);
    }

    #[test]
    fn test_base_unit_line_cost_with_fractional_qty() {
        // 0.5 kg × 3001 = 1500.5 → 1501
        assert_eq!(ingredient_line_cost(0.5, IngredientUnit::Kg, ugx(3001)).ugx(), 1501);
        assert_eq!(ingredient_line_cost(1.25, IngredientUnit::L, ugx(4000)).ugx(), 5000);
    }

    #[test]
    fn test_zero_qty_costs_nothing() {
        assert!(ingredient_line_cost(0.0, IngredientUnit::G, ugx(12_000)).is_zero());
        assert!(ingredient_line_cost(0.0, IngredientUnit::Pcs, ugx(500)).is_zero());
    }

    #[test]
    fn test_folded_scaling_matches_normalized_quantity() {
        use crate::units::normalize_quantity;

        for (qty, cost) in [(1000.0, 5000), (500.0, 8000), (250.0, 4000)] {
            let folded = ingredient_line_cost(qty, IngredientUnit::G, ugx(cost));
            let normalized = round_f64(normalize_quantity(qty, IngredientUnit::G) * cost as f64);
            assert_eq!(folded.ugx(), normalized);
        }
    }

    #[test]
    fn test_labor_cost() {
        assert_eq!(labor_cost(Some(2.0), Some(ugx(3000))).ugx(), 6000);
        assert_eq!(labor_cost(Some(1.5), Some(ugx(2001))).ugx(), 3002);
        assert!(labor_cost(None, Some(ugx(3000))).is_zero());
        assert!(labor_cost(Some(4.0), None).is_zero());
        assert!(LaborInput::default().cost().is_zero());
    }

    #[test]
    fn test_product_totals_with_percent_overhead() {
        let totals = compute_product_totals(
            &[
                IngredientLine::new(1000.0, IngredientUnit::G, 5000),
                IngredientLine::new(6.0, IngredientUnit::Pcs, 500),
            ],
            &[PackagingLine::new(1000)],
            &LaborInput::new(2.0, 3000),
            &OverheadInput::percent_of_subtotal(1000),
            Some(10),
        );

        assert_eq!(totals.ingredient_subtotal_ugx, 8000);
        assert_eq!(totals.packaging_subtotal_ugx, 1000);
        assert_eq!(totals.labor_cost_ugx, 6000);
        assert_eq!(totals.subtotal_ugx, 5000 + 3000 + 1000 + 6000);
        assert_eq!(totals.overhead_ugx, 1500);
        assert_eq!(totals.total_cost_ugx, 16_500);
        assert_eq!(totals.cost_per_unit_ugx, Some(1650));
    }

    #[test]
    fn test_product_totals_with_flat_overhead() {
        let totals = compute_product_totals(
            &[IngredientLine::new(2.0, IngredientUnit::Kg, 4000)],
            &[],
            &LaborInput::default(),
            &OverheadInput::flat(2500),
            None,
        );

        assert_eq!(totals.subtotal_ugx, 8000);
        assert_eq!(totals.overhead_ugx, 2500);
        assert_eq!(totals.total_cost_ugx, 10_500);
        assert_eq!(totals.cost_per_unit_ugx, None);
    }

    #[test]
    fn test_subtotal_is_sum_of_components() {
        let totals = compute_product_totals(
            &[
                IngredientLine::new(333.0, IngredientUnit::G, 7777),
                IngredientLine::new(0.75, IngredientUnit::L, 3333),
            ],
            &[PackagingLine::new(450), PackagingLine::new(1200)],
            &LaborInput::new(1.25, 2999),
            &OverheadInput::percent_of_subtotal(1750),
            Some(7),
        );

        assert_eq!(
            totals.subtotal_ugx,
            totals.ingredient_subtotal_ugx + totals.packaging_subtotal_ugx + totals.labor_cost_ugx
        );
        assert_eq!(totals.total_cost_ugx, totals.subtotal_ugx + totals.overhead_ugx);
    }

    #[test]
    fn test_overhead_is_taken_from_subtotal_not_total() {
        let totals = compute_product_totals(
            &[IngredientLine::new(1.0, IngredientUnit::Pcs, 10_000)],
            &[],
            &LaborInput::default(),
            &OverheadInput::percent_of_subtotal(5000),
            None,
        );

        // 50% of 10000, not 50% of 15000
        assert_eq!(totals.overhead_ugx, 5000);
        assert_eq!(totals.total_cost_ugx, 15_000);
    }

    #[test]
    fn test_cost_per_unit_requires_positive_yield() {
        let lines = [IngredientLine::new(1.0, IngredientUnit::Pcs, 1000)];
        let none = OverheadInput::default();
        let labor = LaborInput::default();

        let per_unit = |yield_units| {
            compute_product_totals(&lines, &[], &labor, &none, yield_units).cost_per_unit_ugx
        };

        assert_eq!(per_unit(Some(0)), None);
        assert_eq!(per_unit(Some(-2)), None);
        assert_eq!(per_unit(Some(3)), Some(333));
    }

    #[test]
    fn test_empty_recipe_totals_are_zero() {
        let totals = compute_product_totals(
            &[],
            &[],
            &LaborInput::default(),
            &OverheadInput::percent_of_subtotal(1000),
            Some(4),
        );
        assert_eq!(totals.total_cost_ugx, 0);
        assert_eq!(totals.cost_per_unit_ugx, Some(0));
    }

    #[test]
    fn test_totals_are_idempotent() {
        let draft = ProductCostingDraft {
            name: "Banana bread".to_string(),
            ingredients: vec![IngredientLine::new(450.0, IngredientUnit::G, 6500)],
            packaging: vec![PackagingLine::new(800)],
            labor: LaborInput::new(0.75, 4000),
            overhead: OverheadInput::percent_of_subtotal(1250),
            yield_units: Some(12),
            ..Default::default()
        };

        assert_eq!(draft.totals(), draft.totals());
        assert_eq!(draft.quote(), draft.quote());
    }

    #[test]
    fn test_overhead_mode_parsing() {
        assert_eq!("flatUGX".parse::<OverheadMode>().unwrap(), OverheadMode::FlatUgx);
        assert_eq!("FLAT_UGX".parse::<OverheadMode>().unwrap(), OverheadMode::FlatUgx);
        assert_eq!(
            "PERCENT_OF_SUBTOTAL".parse::<OverheadMode>().unwrap(),
            OverheadMode::PercentOfSubtotal
        );
        assert!("percent".parse::<OverheadMode>().is_err());
    }

    #[test]
    fn test_quote_uses_pricing_mode_and_flags_underpricing() {
        let draft = ProductCostingDraft {
            name: "Vanilla cupcakes".to_string(),
            ingredients: vec![IngredientLine::new(1.0, IngredientUnit::Pcs, 20_000)],
            pricing: PricingInput {
                markup_bps: Some(2500),
                target_profit_ugx: Some(5000),
                target_margin_bps: Some(3000),
                user_selling_price_ugx: Some(26_000),
            },
            pricing_mode: PricingMode::Markup,
            ..Default::default()
        };

        let quote = draft.quote();
        assert_eq!(quote.totals.total_cost_ugx, 20_000);
        assert_eq!(quote.pricing.auto_recommended_price_ugx, Some(28_571));
        assert_eq!(quote.selected_price_ugx, Some(25_000));
        assert!(quote.underpriced);
    }

    #[test]
    fn test_ingredient_line_wire_names() {
        let line: IngredientLine = serde_json::from_str(
            r#"{"name":"Flour","qty":500,"unit":"g","unitCostUGX":4000}"#,
        )
        .unwrap();
        assert_eq!(line.unit, IngredientUnit::G);
        assert_eq!(line.line_cost().ugx(), 2000);
    }
}
