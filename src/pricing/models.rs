//! Domain models for the pricing engine.
//!
//! The rate card is loaded once at startup and passed explicitly into the
//! calculation functions, which keeps them pure and independently testable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Maximum number of points a single curve request may produce.
pub const MAX_CURVE_POINTS: usize = 1_000;

/// Tiered rate configuration for exhibition floor space.
///
/// Crossing each complete `discount_step` of area lowers the per-m² rate by
/// `discount_rate_per_step`, never below `min_rate`.
#[derive(Debug, Clone)]
pub struct RateCard {
    /// Undiscounted rate per m².
    pub base_rate: Decimal,
    /// Floor for the per-m² rate regardless of discount depth.
    pub min_rate: Decimal,
    /// Area quantum that unlocks one discount tier, in m².
    pub discount_step: Decimal,
    /// Rate reduction per completed tier, as a fraction of `base_rate`.
    pub discount_rate_per_step: Decimal,
    /// Display currency code.
    pub currency: String,
}

impl RateCard {
    /// The standard published rate card.
    pub fn standard() -> Self {
        Self {
            base_rate: dec!(1000),
            min_rate: dec!(700),
            discount_step: dec!(50),
            discount_rate_per_step: dec!(0.05),
            currency: "SAR".to_string(),
        }
    }
}

/// Full pricing breakdown for one area value.
///
/// Derived entirely from the area and a [`RateCard`]; recomputed on every
/// request, never mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub area: Decimal,
    /// Rate actually paid per m² after discount and clamping.
    pub effective_rate: Decimal,
    pub total_cost: Decimal,
    pub discount_percentage: Decimal,
    pub savings: Decimal,
}

/// One sampled point of the investment-scaling chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    pub area: Decimal,
    pub total_cost: Decimal,
}

/// Sampling window for the chart curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveRange {
    pub from: Decimal,
    pub to: Decimal,
    pub step: Decimal,
}

impl Default for CurveRange {
    fn default() -> Self {
        Self {
            from: dec!(5),
            to: dec!(300),
            step: dec!(5),
        }
    }
}

impl CurveRange {
    /// Number of samples this range yields (inclusive bounds).
    pub fn point_count(&self) -> usize {
        use rust_decimal::prelude::ToPrimitive;

        if self.step <= Decimal::ZERO || self.to < self.from {
            return 0;
        }
        ((self.to - self.from) / self.step)
            .floor()
            .to_usize()
            .map(|n| n + 1)
            .unwrap_or(usize::MAX)
    }
}
