//! # Error Types
//!
//! Domain-specific error types for cakecost-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  Calculations (costing, pricing, margin, wedding, sales)                │
//! │  └── never fail: undefined ratios become None or 0                      │
//! │                                                                         │
//! │  Parsing and validation surfaces (this file)                            │
//! │  ├── CoreError        - unknown tokens, bad settings                    │
//! │  └── ValidationError  - input rule violations                           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller's API error → UI            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending field or token in the message
//! 3. Messages read as the form shows them

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

#[derive(Debug, Error)]
pub enum CoreError {
    /// Ingredient unit token is not one of g, kg, ml, l, pcs.
    #[error("Unknown ingredient unit: '{0}'. Valid options: g, kg, ml, l, pcs")]
    UnknownUnit(String),

    #[error("Unknown overhead mode: '{0}'. Valid options: flatUGX, percentOfSubtotal")]
    UnknownOverheadMode(String),

    #[error(
        "Unknown pricing mode: '{0}'. Valid options: MARKUP, TARGET_PROFIT, TARGET_MARGIN, AUTO_RECOMMENDED"
    )]
    UnknownPricingMode(String),

    /// Team settings TOML could not be parsed.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] toml::de::Error),

    #[error("Failed to encode settings: {0}")]
    SettingsEncoding(#[from] toml::ser::Error),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input rule violations.
///
/// The calculation functions assume inputs already passed these rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    #[error("{field} must be 0 or higher")]
    MustBeNonNegative { field: String },

    /// NaN or infinite quantity.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// A list that needs at least one line is empty.
    #[error("Add at least one {item}")]
    AtLeastOne { item: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
