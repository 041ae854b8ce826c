//! # cakecost-core: Costing & Pricing Engine
//!
//! This crate holds the bakery costing arithmetic as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Bakery Costing Architecture                         │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Web UI                                       │   │
//! │  │   Costing form ──► Wedding cake form ──► Sales log ──► Export   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ validated drafts                       │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cakecost-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  units   │ │ costing  │ │ pricing  │ │  margin  │          │   │
//! │  │   │ g kg ml  │ │ totals   │ │ markup   │ │   bps    │          │   │
//! │  │   │ l pcs    │ │ overhead │ │ margin   │ │          │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │ wedding  │ │  sales   │ │validation│ │ settings │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ integer UGX totals                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              Persistence + spreadsheet export                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Ingredient units and quantity normalization
//! - [`costing`] - Line costs, product totals, costing drafts
//! - [`pricing`] - Candidate prices and the recommendation
//! - [`margin`] - Margin in basis points
//! - [`wedding`] - Wedding cake tiers and extras
//! - [`sales`] - Sale amounts, summaries and monthly rollups
//! - [`validation`] - Input rules for drafts and sales entries
//! - [`settings`] - Team defaults
//! - [`money`] - Whole-unit `Money` type and rounding
//! - [`types`] - Basis points
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no state between calls
//! 2. **No I/O**: the caller reads files and rows and hands in values
//! 3. **Integer Money**: whole UGX in i64; fractions are rounded at each step
//! 4. **Total Calculations**: undefined ratios become `None` or `0`, never errors
//!
//! ## Example Usage
//!
//! ```rust
//! use cakecost_core::costing::{IngredientLine, LaborInput, OverheadInput, ProductCostingDraft};
//! use cakecost_core::pricing::PricingInput;
//! use cakecost_core::units::IngredientUnit;
//!
//! let draft = ProductCostingDraft {
//!     name: "Chocolate cupcakes".to_string(),
//!     ingredients: vec![IngredientLine::new(500.0, IngredientUnit::G, 16_000)],
//!     labor: LaborInput::new(1.0, 4_000),
//!     overhead: OverheadInput::flat(2_000),
//!     yield_units: Some(12),
//!     pricing: PricingInput { markup_bps: Some(5000), ..Default::default() },
//!     ..Default::default()
//! };
//!
//! let quote = draft.quote();
//! assert_eq!(quote.totals.total_cost_ugx, 14_000);
//! assert_eq!(quote.totals.cost_per_unit_ugx, Some(1_167));
//! assert_eq!(quote.pricing.auto_recommended_price_ugx, Some(21_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod costing;
pub mod error;
pub mod margin;
pub mod money;
pub mod pricing;
pub mod sales;
pub mod settings;
pub mod types;
pub mod units;
pub mod validation;
pub mod wedding;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use costing::{
    compute_product_totals, ingredient_line_cost, labor_cost, CostingQuote, IngredientLine,
    LaborInput, OverheadInput, OverheadMode, PackagingLine, ProductCostingDraft, ProductTotals,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use margin::margin_bps;
pub use money::Money;
pub use pricing::{
    compute_recommended_price, max_candidate, PricingInput, PricingMode, PricingRecommendation,
};
pub use sales::{
    compute_sale_amounts, monthly_rollups, summarize_sales, windowed_monthly_rollups,
    MonthlyRollup, SaleAmounts, SaleLine, SalesEntry, SalesFilter, SalesSummary,
};
pub use settings::TeamSettings;
pub use types::Bps;
pub use units::{normalize_quantity, IngredientUnit};
pub use wedding::{
    compute_wedding_totals, WeddingCakeDraft, WeddingExtra, WeddingTier, WeddingTotals,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Basis points in a whole (100%).
pub const BPS_SCALE: i64 = 10_000;

/// Highest target margin a form may submit (99.99%).
pub const MAX_TARGET_MARGIN_BPS: u32 = 9_999;

/// Currency used when team settings do not name one.
pub const DEFAULT_CURRENCY: &str = "UGX";
