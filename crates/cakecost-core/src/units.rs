//! # Ingredient Units
//!
//! The five quantity units an ingredient line can be entered in, and the
//! conversion to the unit its cost is priced in.
//!
//! ```text
//! entered unit   priced per   factor
//! ────────────   ──────────   ──────
//!      g             kg       ÷ 1000
//!      kg            kg       × 1
//!      ml            l        ÷ 1000
//!      l             l        × 1
//!      pcs           piece    × 1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::CoreError;

/// Number of grams in a kilogram, and of milliliters in a liter.
pub const MILLI_PER_BASE_UNIT: f64 = 1000.0;

/// Unit an ingredient quantity is entered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum IngredientUnit {
    /// Grams; priced per kilogram.
    G,
    /// Kilograms.
    Kg,
    /// Milliliters; priced per liter.
    Ml,
    /// Liters.
    L,
    /// Pieces (eggs, cake boards, toppers).
    Pcs,
}

impl IngredientUnit {
    /// All recognized units, in display order.
    pub const ALL: [IngredientUnit; 5] = [
        IngredientUnit::G,
        IngredientUnit::Kg,
        IngredientUnit::Ml,
        IngredientUnit::L,
        IngredientUnit::Pcs,
    ];

    /// True for units entered at 1/1000 of their pricing unit.
    #[inline]
    pub const fn is_milli(&self) -> bool {
        matches!(self, IngredientUnit::G | IngredientUnit::Ml)
    }

    /// The token used on the wire and in forms.
    pub const fn as_str(&self) -> &'static str {
        match self {
            IngredientUnit::G => "g",
            IngredientUnit::Kg => "kg",
            IngredientUnit::Ml => "ml",
            IngredientUnit::L => "l",
            IngredientUnit::Pcs => "pcs",
        }
    }
}

impl fmt::Display for IngredientUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IngredientUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "g" => Ok(IngredientUnit::G),
            "kg" => Ok(IngredientUnit::Kg),
            "ml" => Ok(IngredientUnit::Ml),
            "l" => Ok(IngredientUnit::L),
            "pcs" => Ok(IngredientUnit::Pcs),
            other => Err(CoreError::UnknownUnit(other.to_string())),
        }
    }
}

/// Expresses `qty` in the ingredient's pricing unit (kg, l or piece).
///
/// The line-cost formula folds this scaling into a single multiply-divide
/// (see [`crate::costing::ingredient_line_cost`]); this function is the
/// standalone form for display and for callers converting quantities.
///
/// ```rust
/// use cakecost_core::units::{normalize_quantity, IngredientUnit};
///
/// assert_eq!(normalize_quantity(500.0, IngredientUnit::G), 0.5);
/// assert_eq!(normalize_quantity(6.0, IngredientUnit::Pcs), 6.0);
/// ```
pub fn normalize_quantity(qty: f64, unit: IngredientUnit) -> f64 {
    if unit.is_milli() {
        qty / MILLI_PER_BASE_UNIT
    } else {
        qty
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_grams_to_kilograms() {
        assert!((normalize_quantity(500.0, IngredientUnit::G) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_milliliters_to_liters() {
        assert!((normalize_quantity(250.0, IngredientUnit::Ml) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_passes_base_units_through() {
        assert_eq!(normalize_quantity(6.0, IngredientUnit::Pcs), 6.0);
        assert_eq!(normalize_quantity(1.5, IngredientUnit::Kg), 1.5);
        assert_eq!(normalize_quantity(2.0, IngredientUnit::L), 2.0);
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("g".parse::<IngredientUnit>().unwrap(), IngredientUnit::G);
        assert_eq!("KG".parse::<IngredientUnit>().unwrap(), IngredientUnit::Kg);
        assert_eq!(" pcs ".parse::<IngredientUnit>().unwrap(), IngredientUnit::Pcs);
        assert!(matches!(
            "cups".parse::<IngredientUnit>(),
            Err(CoreError::UnknownUnit(unit)) if unit == "cups"
        ));
    }

    #[test]
    fn test_only_grams_and_milliliters_are_milli() {
        let milli: Vec<_> = IngredientUnit::ALL.iter().filter(|u| u.is_milli()).collect();
        assert_eq!(milli, vec![&IngredientUnit::G, &IngredientUnit::Ml]);
    }

    #[test]
    fn test_unit_serde_tokens() {
        assert_eq!(serde_json::to_string(&IngredientUnit::Ml).unwrap(), "\"ml\"");
        let unit: IngredientUnit = serde_json::from_str("\"pcs\"").unwrap();
        assert_eq!(unit, IngredientUnit::Pcs);
    }
}
