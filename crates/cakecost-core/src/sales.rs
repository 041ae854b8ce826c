//! # Sales Arithmetic
//!
//! Revenue, cost of goods sold and profit for logged sales, and the rollups
//! the sales page and dashboard show.
//!
//! ## Snapshot Pattern
//! A sale freezes the cost per unit at the time it is logged. When the sale
//! is linked to a product costing that has a cost per unit, that cost
//! replaces whatever the form sent ([`resolve_cost_snapshot`]); later edits
//! to the costing never change past sales.
//!
//! ## Rollups
//! ```text
//! entries ──► filter ──► group by YYYY-MM ──► Σ revenue, cogs, profit
//!                                                    │
//!                          margin_bps(Σ revenue, Σ profit)   (never an
//!                                                    average of margins)
//! ```

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use ts_rs::TS;

use crate::margin::margin_bps;
use crate::money::Money;

// =============================================================================
// Sale Line
// =============================================================================

/// The numeric part of a sales entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleLine {
    pub units_sold: i64,
    #[serde(rename = "sellingPricePerUnitUGX")]
    pub selling_price_per_unit_ugx: i64,
    #[serde(rename = "costPerUnitSnapshotUGX")]
    pub cost_per_unit_snapshot_ugx: i64,
}

/// Computed amounts for one sale or one group of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleAmounts {
    #[serde(rename = "revenueUGX")]
    pub revenue_ugx: i64,
    #[serde(rename = "cogsUGX")]
    pub cogs_ugx: i64,
    #[serde(rename = "profitUGX")]
    pub profit_ugx: i64,
    #[serde(rename = "marginBps")]
    pub margin_bps: i64,
}

impl SaleAmounts {
    /// Builds amounts from revenue and cogs; profit and margin follow.
    pub fn from_revenue_and_cogs(revenue: Money, cogs: Money) -> Self {
        let profit = revenue - cogs;
        SaleAmounts {
            revenue_ugx: revenue.ugx(),
            cogs_ugx: cogs.ugx(),
            profit_ugx: profit.ugx(),
            margin_bps: margin_bps(revenue, profit),
        }
    }

    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_ugx(self.revenue_ugx)
    }

    #[inline]
    pub fn cogs(&self) -> Money {
        Money::from_ugx(self.cogs_ugx)
    }

    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_ugx(self.profit_ugx)
    }
}

/// Cost snapshot to store with a sale.
///
/// A linked costing's cost per unit overrides the entered value.
pub fn resolve_cost_snapshot(entered: Money, linked_cost_per_unit: Option<Money>) -> Money {
    linked_cost_per_unit.unwrap_or(entered)
}

/// `revenue = units × price`, `cogs = units × cost`, `profit = revenue − cogs`.
///
/// ```rust
/// use cakecost_core::sales::{compute_sale_amounts, SaleLine};
///
/// let amounts = compute_sale_amounts(&SaleLine {
///     units_sold: 12,
///     selling_price_per_unit_ugx: 2_500,
///     cost_per_unit_snapshot_ugx: 1_650,
/// });
/// assert_eq!(amounts.revenue_ugx, 30_000);
/// assert_eq!(amounts.cogs_ugx, 19_800);
/// assert_eq!(amounts.profit_ugx, 10_200);
/// assert_eq!(amounts.margin_bps, 3_400);
/// ```
pub fn compute_sale_amounts(line: &SaleLine) -> SaleAmounts {
    let revenue =
        Money::from_ugx(line.selling_price_per_unit_ugx).multiply_quantity(line.units_sold);
    let cogs = Money::from_ugx(line.cost_per_unit_snapshot_ugx).multiply_quantity(line.units_sold);
    SaleAmounts::from_revenue_and_cogs(revenue, cogs)
}

// =============================================================================
// Sales Entry
// =============================================================================

/// A logged sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesEntry {
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(default)]
    pub product_costing_id: Option<String>,
    /// Product name at time of sale (frozen).
    pub product_name_snapshot: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(flatten)]
    pub line: SaleLine,
}

impl SalesEntry {
    pub fn amounts(&self) -> SaleAmounts {
        compute_sale_amounts(&self.line)
    }

    /// Calendar month key, `YYYY-MM`.
    pub fn month_key(&self) -> String {
        self.date.format("%Y-%m").to_string()
    }
}

/// Filters the sales page applies. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesFilter {
    /// Inclusive lower bound.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound.
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub product_costing_id: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
}

impl SalesFilter {
    pub fn matches(&self, entry: &SalesEntry) -> bool {
        if self.start_date.is_some_and(|start| entry.date < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| entry.date > end) {
            return false;
        }
        if let Some(id) = &self.product_costing_id {
            if entry.product_costing_id.as_ref() != Some(id) {
                return false;
            }
        }
        if let Some(channel) = &self.channel {
            if entry.channel.as_ref() != Some(channel) {
                return false;
            }
        }
        true
    }
}

/// Entries matching every set field of `filter`, in input order.
pub fn filter_entries<'a>(entries: &'a [SalesEntry], filter: &SalesFilter) -> Vec<&'a SalesEntry> {
    entries.iter().filter(|entry| filter.matches(entry)).collect()
}

// =============================================================================
// Rollups
// =============================================================================

/// Totals for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRollup {
    /// `YYYY-MM`
    pub month: String,
    #[serde(rename = "totalRevenueUGX")]
    pub total_revenue_ugx: i64,
    #[serde(rename = "totalCogsUGX")]
    pub total_cogs_ugx: i64,
    #[serde(rename = "totalProfitUGX")]
    pub total_profit_ugx: i64,
    pub avg_margin_bps: i64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    revenue: Money,
    cogs: Money,
    units: i64,
    entries: usize,
}

impl Accumulator {
    fn add(&mut self, entry: &SalesEntry) {
        let amounts = entry.amounts();
        self.revenue += amounts.revenue();
        self.cogs += amounts.cogs();
        self.units += entry.line.units_sold;
        self.entries += 1;
    }

    fn amounts(&self) -> SaleAmounts {
        SaleAmounts::from_revenue_and_cogs(self.revenue, self.cogs)
    }

    fn rollup(&self, month: String) -> MonthlyRollup {
        let amounts = self.amounts();
        MonthlyRollup {
            month,
            total_revenue_ugx: amounts.revenue_ugx,
            total_cogs_ugx: amounts.cogs_ugx,
            total_profit_ugx: amounts.profit_ugx,
            avg_margin_bps: amounts.margin_bps,
        }
    }
}

/// Per-month totals, newest month first.
pub fn monthly_rollups<'a, I>(entries: I) -> Vec<MonthlyRollup>
where
    I: IntoIterator<Item = &'a SalesEntry>,
{
    let mut months: BTreeMap<String, Accumulator> = BTreeMap::new();
    for entry in entries {
        months.entry(entry.month_key()).or_default().add(entry);
    }

    debug!(months = months.len(), "Computed monthly sales rollups");

    months
        .into_iter()
        .rev()
        .map(|(month, acc)| acc.rollup(month))
        .collect()
}

/// Rollups for the `months` calendar months ending with the month of
/// `through`, oldest first, as the dashboard chart draws them.
///
/// Months without sales come back as zero rows. Entries outside the window
/// are ignored.
pub fn windowed_monthly_rollups<'a, I>(
    entries: I,
    through: NaiveDate,
    months: u32,
) -> Vec<MonthlyRollup>
where
    I: IntoIterator<Item = &'a SalesEntry>,
{
    let first_of_month = through.with_day(1).unwrap_or(through);

    let mut window: BTreeMap<String, Accumulator> = BTreeMap::new();
    for back in 0..months {
        if let Some(start) = first_of_month.checked_sub_months(Months::new(back)) {
            window.insert(start.format("%Y-%m").to_string(), Accumulator::default());
        }
    }

    for entry in entries {
        if let Some(acc) = window.get_mut(&entry.month_key()) {
            acc.add(entry);
        }
    }

    debug!(months = window.len(), %through, "Computed windowed sales rollups");

    window.into_iter().map(|(month, acc)| acc.rollup(month)).collect()
}

/// Totals across a set of sales.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub entries: usize,
    pub units_sold: i64,
    pub totals: SaleAmounts,
}

pub fn summarize_sales<'a, I>(entries: I) -> SalesSummary
where
    I: IntoIterator<Item = &'a SalesEntry>,
{
    let mut acc = Accumulator::default();
    for entry in entries {
        acc.add(entry);
    }

    SalesSummary {
        entries: acc.entries,
        units_sold: acc.units,
        totals: acc.amounts(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
