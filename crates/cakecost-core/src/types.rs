//! # Shared Types
//!
//! Small value types shared by the costing, pricing and sales modules.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::BPS_SCALE;

// =============================================================================
// Basis Points
// =============================================================================

/// A ratio represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 2500 bps = 25% markup, 3000 bps = 30% target margin
///
/// Markup and overhead have no upper bound (a 150% markup is 15000 bps);
/// only a target margin is meaningless at or above 10000.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bps(u32);

impl Bps {
    /// Creates a ratio from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Bps(bps)
    }

    /// Returns the ratio in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero ratio.
    #[inline]
    pub const fn zero() -> Self {
        Bps(0)
    }

    /// True for 100% or more.
    #[inline]
    pub const fn is_whole_or_more(&self) -> bool {
        self.0 as i64 >= BPS_SCALE
    }
}

impl Default for Bps {
    fn default() -> Self {
        Bps::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bps_from_bps() {
        assert_eq!(Bps::from_bps(2500).bps(), 2500);
    }

    #[test]
    fn test_bps_whole_or_more() {
        assert!(!Bps::from_bps(9_999).is_whole_or_more());
        assert!(Bps::from_bps(10_000).is_whole_or_more());
        assert!(Bps::from_bps(25_000).is_whole_or_more());
    }

    #[test]
    fn test_bps_default() {
        assert_eq!(Bps::default(), Bps::zero());
    }
}
