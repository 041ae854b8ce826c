//! # Team Settings
//!
//! Per-team defaults that seed a new costing draft.
//!
//! ## Configuration Format
//! ```toml
//! bakery_name = "Kampala Crumbs"
//! currency = "UGX"
//! default_markup_bps = 3000
//!
//! [default_overhead]
//! mode = "percentOfSubtotal"
//! value = 1000
//! ```
//!
//! Every key is optional; a missing key takes its default (UGX, no markup,
//! no overhead). Reading the file is the caller's job; this module only
//! parses and validates text.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::costing::OverheadInput;
use crate::error::{CoreResult, ValidationError};
use crate::pricing::PricingInput;
use crate::validation::{validate_amount_ugx, ValidationResult};
use crate::DEFAULT_CURRENCY;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TeamSettings {
    /// Shown on exports.
    #[serde(default)]
    pub bakery_name: Option<String>,

    /// Currency code; amounts are always whole units.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub default_markup_bps: u32,

    #[serde(default)]
    pub default_overhead: OverheadInput,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for TeamSettings {
    fn default() -> Self {
        TeamSettings {
            bakery_name: None,
            currency: default_currency(),
            default_markup_bps: 0,
            default_overhead: OverheadInput::default(),
        }
    }
}

impl TeamSettings {
    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(contents: &str) -> CoreResult<Self> {
        let settings: TeamSettings = toml::from_str(contents)?;
        settings.validate()?;
        debug!(
            currency = %settings.currency,
            markup_bps = settings.default_markup_bps,
            overhead_mode = %settings.default_overhead.mode,
            "Loaded team settings"
        );
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> CoreResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ValidationResult<()> {
        if self.currency.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "currency".to_string(),
            });
        }
        validate_amount_ugx("default overhead", self.default_overhead.value)
    }

    /// Overhead a new draft starts with.
    pub fn default_overhead(&self) -> OverheadInput {
        self.default_overhead
    }

    /// Pricing a new draft starts with: the team markup, nothing else.
    pub fn default_pricing(&self) -> PricingInput {
        PricingInput {
            markup_bps: Some(self.default_markup_bps),
            ..PricingInput::default()
        }
    }
}
