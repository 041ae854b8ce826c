//! # Validation Module
//!
//! Input rules for costing forms and sales entries.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form                                                          │
//! │  └── Immediate feedback while editing                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Save handler                                                  │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: rule validation                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Calculations                                                  │
//! │  └── Assume every rule here holds; they do not re-check                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cakecost_core::validation::{validate_quantity, validate_target_margin_bps};
//!
//! assert!(validate_quantity("qty", 250.0).is_ok());
//! assert!(validate_target_margin_bps(10_000).is_err());
//! ```

use crate::costing::{IngredientLine, PackagingLine, ProductCostingDraft};
use crate::error::ValidationError;
use crate::pricing::PricingInput;
use crate::sales::SalesEntry;
use crate::wedding::{WeddingCakeDraft, WeddingExtra, WeddingTier};
use crate::MAX_TARGET_MARGIN_BPS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (product, ingredient, tier, ...).
///
/// Must not be empty after trimming. There is no length cap.
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an ingredient quantity.
///
/// ## Rules
/// - Must be a finite number
/// - Must be greater than zero
pub fn validate_quantity(field: &str, qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if qty <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a UGX amount. Zero is allowed (donated ingredients, free items).
///
/// ```rust
/// use cakecost_core::validation::validate_amount_ugx;
///
/// assert!(validate_amount_ugx("cost", 0).is_ok());
/// assert!(validate_amount_ugx("cost", -100).is_err());
/// ```
pub fn validate_amount_ugx(field: &str, ugx: i64) -> ValidationResult<()> {
    if ugx < 0 {
        return Err(ValidationError::MustBeNonNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

pub fn validate_labor_hours(hours: f64) -> ValidationResult<()> {
    if !hours.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "labor hours".to_string(),
        });
    }

    if hours < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "labor hours".to_string(),
        });
    }

    Ok(())
}

/// Validates a target margin in basis points.
///
/// ## Rules
/// - At most 9999 (a 100% margin has no finite price)
/// - Markup and overhead have no such bound
pub fn validate_target_margin_bps(bps: u32) -> ValidationResult<()> {
    if bps > MAX_TARGET_MARGIN_BPS {
        return Err(ValidationError::OutOfRange {
            field: "target margin".to_string(),
            min: 0,
            max: MAX_TARGET_MARGIN_BPS as i64,
        });
    }

    Ok(())
}

/// Validates an optional count (yield units, tier servings): positive if set.
pub fn validate_optional_count(field: &str, count: Option<i64>) -> ValidationResult<()> {
    match count {
        Some(n) if n <= 0 => Err(ValidationError::MustBePositive {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}

pub fn validate_units_sold(units: i64) -> ValidationResult<()> {
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units sold".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

pub fn validate_ingredient_line(line: &IngredientLine) -> ValidationResult<()> {
    validate_name("ingredient name", &line.name)?;
    validate_quantity("quantity", line.qty)?;
    validate_amount_ugx("unit cost", line.unit_cost_ugx)
}

pub fn validate_packaging_line(line: &PackagingLine) -> ValidationResult<()> {
    validate_name("packaging name", &line.name)?;
    validate_amount_ugx("packaging cost", line.cost_ugx)
}

pub fn validate_pricing_input(pricing: &PricingInput) -> ValidationResult<()> {
    if let Some(profit) = pricing.target_profit_ugx {
        validate_amount_ugx("target profit", profit)?;
    }
    if let Some(margin) = pricing.target_margin_bps {
        validate_target_margin_bps(margin)?;
    }
    if let Some(price) = pricing.user_selling_price_ugx {
        validate_amount_ugx("selling price", price)?;
    }
    Ok(())
}

/// Validates a whole product costing, returning the first failure.
///
/// ## Rules
/// - Product name required
/// - At least one ingredient; each with a name, positive qty, cost >= 0
/// - Packaging lines named with cost >= 0
/// - Labor hours and rate >= 0
/// - Overhead value >= 0
/// - Yield units positive when set
/// - Pricing parameters in range
pub fn validate_product_costing(draft: &ProductCostingDraft) -> ValidationResult<()> {
    validate_name("product name", &draft.name)?;

    if draft.ingredients.is_empty() {
        return Err(ValidationError::AtLeastOne {
            item: "ingredient".to_string(),
        });
    }
    draft.ingredients.iter().try_for_each(validate_ingredient_line)?;
    draft.packaging.iter().try_for_each(validate_packaging_line)?;

    if let Some(hours) = draft.labor.hours {
        validate_labor_hours(hours)?;
    }
    if let Some(rate) = draft.labor.rate_ugx_per_hour {
        validate_amount_ugx("labor rate", rate)?;
    }

    validate_amount_ugx("overhead", draft.overhead.value)?;
    validate_optional_count("yield units", draft.yield_units)?;
    validate_pricing_input(&draft.pricing)
}

pub fn validate_wedding_tier(tier: &WeddingTier) -> ValidationResult<()> {
    validate_name("tier name", &tier.name)?;
    validate_optional_count("servings", tier.servings)?;
    if let Some(cost) = tier.manual_tier_cost_ugx {
        validate_amount_ugx("tier cost", cost)?;
    }
    Ok(())
}

pub fn validate_wedding_extra(extra: &WeddingExtra) -> ValidationResult<()> {
    validate_name("extra name", &extra.name)?;
    validate_amount_ugx("extra cost", extra.cost_ugx)
}

/// Validates a wedding cake: at least one tier, every tier and extra valid.
pub fn validate_wedding_cake(draft: &WeddingCakeDraft) -> ValidationResult<()> {
    if draft.tiers.is_empty() {
        return Err(ValidationError::AtLeastOne {
            item: "tier".to_string(),
        });
    }
    draft.tiers.iter().try_for_each(validate_wedding_tier)?;
    draft.extras.iter().try_for_each(validate_wedding_extra)?;
    validate_pricing_input(&draft.pricing)
}

/// Validates a sales entry before its amounts are computed.
pub fn validate_sales_entry(entry: &SalesEntry) -> ValidationResult<()> {
    validate_name("product name", &entry.product_name_snapshot)?;
    validate_units_sold(entry.line.units_sold)?;
    validate_amount_ugx("selling price", entry.line.selling_price_per_unit_ugx)?;
    validate_amount_ugx("cost per unit", entry.line.cost_per_unit_snapshot_ugx)
}

// =============================================================================
// Unit Tests
// =============================================================================
