//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no I/O, no shared state. Used by the
//! quote endpoint, the chart sampler and the server-rendered initial page,
//! so this module is the single source of truth for pricing.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{CurvePoint, CurveRange, Quote, RateCard, MAX_CURVE_POINTS};

/// Distance to the preceding sample used by the tier-boundary guard, in m².
const STEP_GUARD_EPSILON: Decimal = dec!(0.1);

/// Largest area accepted at the `f64` ingress boundary, in m².
///
/// Keeps `area * rate` comfortably inside `Decimal` range.
const MAX_AREA: Decimal = dec!(1000000000);

/// Pricing calculation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("area must be a finite, non-negative number")]
    InvalidArea,

    #[error("invalid curve range: {0}")]
    InvalidRange(String),
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Banker's rounding rounds to the nearest even number when the value is exactly
/// halfway between two possibilities. This reduces cumulative rounding bias.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use exhibiprice_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Convert an area received as `f64` (JSON/query ingress) into a `Decimal`.
///
/// Rejects NaN, infinities, negative values and values past [`MAX_AREA`],
/// so the calculation functions below only ever see well-formed areas.
pub fn area_from_f64(value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::InvalidArea);
    }
    let area = Decimal::from_f64(value).ok_or(PricingError::InvalidArea)?;
    if area > MAX_AREA {
        return Err(PricingError::InvalidArea);
    }
    Ok(area)
}

/// Total cost before the tier-boundary guard.
///
/// `floor(area / step)` completed tiers each shave `discount_rate_per_step`
/// off the base rate; the per-m² rate never drops below `min_rate`.
pub fn raw_total_cost(area: Decimal, card: &RateCard) -> Decimal {
    // The quantum is validated at load; a non-positive quantum means no tiers.
    let steps = if card.discount_step > Decimal::ZERO {
        (area / card.discount_step).floor()
    } else {
        Decimal::ZERO
    };
    let raw_discount = steps * card.discount_rate_per_step;
    let mut rate = card.base_rate * (Decimal::ONE - raw_discount);
    if rate < card.min_rate {
        rate = card.min_rate;
    }
    area * rate
}

/// Compute the full pricing breakdown for one area value.
///
/// Fails only on negative input; zero area yields a zero-cost quote at the
/// base rate without dividing.
///
/// Because the discount is a step function of area, the raw total can drop
/// as the area crosses a tier boundary. The guard below compares against the
/// sample 0.1 m² earlier and keeps whichever total is higher. This is a
/// local, single-step correction: it does not establish monotonicity across
/// arbitrary pairs of areas, and for deep tiers the clamped value itself
/// carries across the boundary.
pub fn compute_quote(area: Decimal, card: &RateCard) -> Result<Quote, PricingError> {
    if area < Decimal::ZERO {
        return Err(PricingError::InvalidArea);
    }
    if area.is_zero() {
        return Ok(Quote {
            area,
            effective_rate: card.base_rate,
            total_cost: Decimal::ZERO,
            discount_percentage: Decimal::ZERO,
            savings: Decimal::ZERO,
        });
    }

    let mut total_cost = raw_total_cost(area, card);
    if area > Decimal::ONE {
        let prev_step_total = raw_total_cost(area - STEP_GUARD_EPSILON, card);
        if total_cost < prev_step_total {
            total_cost = prev_step_total;
        }
    }

    let base_total = area * card.base_rate;
    let savings = (base_total - total_cost).max(Decimal::ZERO);
    let effective_rate = total_cost / area;
    let discount_percentage =
        (card.base_rate - effective_rate) / card.base_rate * Decimal::ONE_HUNDRED;

    Ok(Quote {
        area,
        effective_rate,
        total_cost,
        discount_percentage,
        savings,
    })
}

/// Sample the uncorrected total over a range for the investment-scaling chart.
///
/// Applies a running clamp across the sampled sequence itself: each total is
/// raised to at least the previous one. This is a second, coarser
/// monotonicity layer on top of the per-call guard in [`compute_quote`]; the
/// chart never shows a dip regardless of the rate card. Totals are rounded
/// to whole currency units.
pub fn sample_curve(card: &RateCard, range: &CurveRange) -> Result<Vec<CurvePoint>, PricingError> {
    validate_range(range)?;

    let mut points = Vec::with_capacity(range.point_count());
    let mut last_cost = Decimal::ZERO;
    let mut area = range.from;
    while area <= range.to {
        let mut cost = raw_total_cost(area, card);
        if cost < last_cost {
            cost = last_cost;
        }
        last_cost = cost;
        points.push(CurvePoint {
            area,
            total_cost: round_money(cost, 0),
        });
        area += range.step;
    }
    Ok(points)
}

fn validate_range(range: &CurveRange) -> Result<(), PricingError> {
    if range.from < Decimal::ZERO {
        return Err(PricingError::InvalidRange(
            "lower bound must be non-negative".to_string(),
        ));
    }
    if range.step <= Decimal::ZERO {
        return Err(PricingError::InvalidRange(
            "step must be positive".to_string(),
        ));
    }
    if range.to < range.from {
        return Err(PricingError::InvalidRange(
            "upper bound must not be below the lower bound".to_string(),
        ));
    }
    if range.point_count() > MAX_CURVE_POINTS {
        return Err(PricingError::InvalidRange(format!(
            "range yields more than {} points",
            MAX_CURVE_POINTS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2)); // rounds down to even
        assert_eq!(round_money(dec!(3.5), 0), dec!(4)); // rounds up to even
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
        assert_eq!(round_money(dec!(2.45), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
        assert_eq!(round_money(dec!(123456.789), 2), dec!(123456.79));
    }

    // ==================== area_from_f64 tests ====================

    #[test]
    fn test_area_from_f64_accepts_normal_values() {
        assert_eq!(area_from_f64(0.0).unwrap(), Decimal::ZERO);
        assert_eq!(area_from_f64(42.5).unwrap(), dec!(42.5));
        assert_eq!(area_from_f64(300.0).unwrap(), dec!(300));
    }

    #[test]
    fn test_area_from_f64_rejects_bad_values() {
        assert_eq!(area_from_f64(-1.0), Err(PricingError::InvalidArea));
        assert_eq!(area_from_f64(f64::NAN), Err(PricingError::InvalidArea));
        assert_eq!(area_from_f64(f64::INFINITY), Err(PricingError::InvalidArea));
        assert_eq!(
            area_from_f64(f64::NEG_INFINITY),
            Err(PricingError::InvalidArea)
        );
        assert_eq!(area_from_f64(1.0e12), Err(PricingError::InvalidArea));
    }

    // ==================== raw_total_cost tests ====================

    #[test]
    fn test_raw_total_below_first_tier_uses_base_rate() {
        let card = RateCard::standard();
        assert_eq!(raw_total_cost(dec!(25), &card), dec!(25000));
        assert_eq!(raw_total_cost(dec!(49.9), &card), dec!(49900));
    }

    #[test]
    fn test_raw_total_applies_one_discount_per_completed_tier() {
        let card = RateCard::standard();
        // 2 tiers -> rate 900, 4 tiers -> rate 800
        assert_eq!(raw_total_cost(dec!(100), &card), dec!(90000));
        assert_eq!(raw_total_cost(dec!(200), &card), dec!(160000));
        // 1 tier -> rate 950 just past the boundary
        assert_eq!(raw_total_cost(dec!(50), &card), dec!(47500));
    }

    #[test]
    fn test_raw_total_rate_is_floored_at_min_rate() {
        let card = RateCard::standard();
        // 8 tiers would give rate 600; the floor holds it at 700
        assert_eq!(raw_total_cost(dec!(400), &card), dec!(280000));
        // deep enough that the raw rate goes negative
        assert_eq!(raw_total_cost(dec!(2000), &card), dec!(1400000));
    }

    #[test]
    fn test_raw_total_with_degenerate_quantum_has_no_tiers() {
        let mut card = RateCard::standard();
        card.discount_step = Decimal::ZERO;
        assert_eq!(raw_total_cost(dec!(100), &card), dec!(100000));
    }

    // ==================== compute_quote tests ====================

    #[test]
    fn test_quote_rejects_negative_area() {
        let card = RateCard::standard();
        assert_eq!(
            compute_quote(dec!(-0.1), &card),
            Err(PricingError::InvalidArea)
        );
    }

    #[test]
    fn test_quote_zero_area_is_free_at_base_rate() {
        let card = RateCard::standard();
        let quote = compute_quote(Decimal::ZERO, &card).unwrap();
        assert_eq!(quote.total_cost, Decimal::ZERO);
        assert_eq!(quote.effective_rate, dec!(1000));
        assert_eq!(quote.discount_percentage, Decimal::ZERO);
        assert_eq!(quote.savings, Decimal::ZERO);
    }

    #[test]
    fn test_quote_below_first_tier_has_no_discount() {
        let card = RateCard::standard();
        let quote = compute_quote(dec!(25), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(25000));
        assert_eq!(quote.effective_rate, dec!(1000));
        assert_eq!(quote.discount_percentage, Decimal::ZERO);
        assert_eq!(quote.savings, Decimal::ZERO);
    }

    #[test]
    fn test_quote_mid_tier_uses_discounted_rate() {
        let card = RateCard::standard();
        // 75 m² sits inside tier 1; the preceding sample is in the same tier,
        // so the guard does not fire.
        let quote = compute_quote(dec!(75), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(71250));
        assert_eq!(quote.effective_rate, dec!(950));
        assert_eq!(quote.discount_percentage, dec!(5));
        assert_eq!(quote.savings, dec!(3750));
    }

    #[test]
    fn test_quote_guard_clamps_at_tier_boundary() {
        let card = RateCard::standard();
        // raw(50) = 47500 but raw(49.9) = 49900; the guard keeps the higher
        // preceding total.
        let quote = compute_quote(dec!(50), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(49900));
        assert_eq!(quote.effective_rate, dec!(998));
        assert_eq!(quote.discount_percentage, dec!(0.2));
        assert_eq!(quote.savings, dec!(100));
    }

    #[test]
    fn test_quote_guard_clamps_at_deeper_boundaries() {
        let card = RateCard::standard();
        // raw(100) = 90000, raw(99.9) = 94905
        let quote = compute_quote(dec!(100), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(94905));
        assert_eq!(quote.effective_rate, dec!(949.05));

        // raw(200) = 160000, raw(199.9) = 169915
        let quote = compute_quote(dec!(200), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(169915));
        assert_eq!(quote.savings, dec!(30085));
    }

    #[test]
    fn test_quote_tiny_areas_skip_the_guard() {
        let card = RateCard::standard();
        let quote = compute_quote(dec!(0.5), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(500));
        assert_eq!(quote.effective_rate, dec!(1000));
    }

    #[test]
    fn test_quote_invariants_hold_across_a_sweep() {
        let card = RateCard::standard();
        let mut area = Decimal::ZERO;
        while area <= dec!(300) {
            let quote = compute_quote(area, &card).unwrap();
            assert!(quote.total_cost >= Decimal::ZERO);
            assert!(quote.total_cost <= area * card.base_rate);
            assert!(quote.total_cost >= raw_total_cost(area, &card));
            assert!(quote.savings >= Decimal::ZERO);
            assert!(quote.discount_percentage >= Decimal::ZERO);
            if area > Decimal::ZERO {
                assert!(quote.effective_rate >= card.min_rate);
                assert!(quote.effective_rate <= card.base_rate);
            }
            if area > Decimal::ONE {
                // the single-step guarantee the guard provides
                assert!(quote.total_cost >= raw_total_cost(area - dec!(0.1), &card));
            }
            area += dec!(0.25);
        }
    }

    #[test]
    fn test_quote_guard_holds_under_adversarial_card() {
        let card = RateCard {
            base_rate: dec!(1000),
            min_rate: dec!(100),
            discount_step: dec!(10),
            discount_rate_per_step: dec!(0.5),
            currency: "SAR".to_string(),
        };
        // raw(10) = 5000, raw(9.9) = 9900 - the guard must keep 9900
        let quote = compute_quote(dec!(10), &card).unwrap();
        assert_eq!(quote.total_cost, dec!(9900));

        let mut area = dec!(1.1);
        while area <= dec!(100) {
            let quote = compute_quote(area, &card).unwrap();
            assert!(quote.total_cost >= raw_total_cost(area - dec!(0.1), &card));
            area += dec!(0.1);
        }
    }

    // ==================== sample_curve tests ====================

    #[test]
    fn test_curve_default_range_shape() {
        let card = RateCard::standard();
        let points = sample_curve(&card, &CurveRange::default()).unwrap();
        assert_eq!(points.len(), 60);
        assert_eq!(points[0].area, dec!(5));
        assert_eq!(points[0].total_cost, dec!(5000));
        assert_eq!(points.last().unwrap().area, dec!(300));
    }

    #[test]
    fn test_curve_never_decreases() {
        let card = RateCard::standard();
        let points = sample_curve(&card, &CurveRange::default()).unwrap();
        for pair in points.windows(2) {
            assert!(
                pair[1].total_cost >= pair[0].total_cost,
                "dip between {} and {}",
                pair[0].area,
                pair[1].area
            );
        }
    }

    #[test]
    fn test_curve_running_clamp_carries_previous_total() {
        let card = RateCard::standard();
        let points = sample_curve(&card, &CurveRange::default()).unwrap();
        // raw(95) = 90250 but raw(100) = 90000; the sampled total at 100
        // must carry the 95 m² value forward.
        let at_100 = points.iter().find(|p| p.area == dec!(100)).unwrap();
        assert_eq!(at_100.total_cost, dec!(90250));
    }

    #[test]
    fn test_curve_never_decreases_under_adversarial_card() {
        let card = RateCard {
            base_rate: dec!(1000),
            min_rate: dec!(0),
            discount_step: dec!(7),
            discount_rate_per_step: dec!(0.31),
            currency: "SAR".to_string(),
        };
        let points = sample_curve(&card, &CurveRange::default()).unwrap();
        for pair in points.windows(2) {
            assert!(pair[1].total_cost >= pair[0].total_cost);
        }
    }

    #[test]
    fn test_curve_totals_are_whole_units() {
        let mut card = RateCard::standard();
        card.base_rate = dec!(999.99);
        let range = CurveRange {
            from: dec!(0.5),
            to: dec!(10),
            step: dec!(0.5),
        };
        for point in sample_curve(&card, &range).unwrap() {
            assert_eq!(point.total_cost, point.total_cost.trunc());
        }
    }

    #[test]
    fn test_curve_rejects_invalid_ranges() {
        let card = RateCard::standard();
        let bad = |from, to, step| {
            sample_curve(
                &card,
                &CurveRange {
                    from,
                    to,
                    step,
                },
            )
            .unwrap_err()
        };

        assert!(matches!(
            bad(dec!(-5), dec!(300), dec!(5)),
            PricingError::InvalidRange(_)
        ));
        assert!(matches!(
            bad(dec!(5), dec!(300), Decimal::ZERO),
            PricingError::InvalidRange(_)
        ));
        assert!(matches!(
            bad(dec!(300), dec!(5), dec!(5)),
            PricingError::InvalidRange(_)
        ));
        // 0..=101 by 0.1 would be 1011 points
        assert!(matches!(
            bad(Decimal::ZERO, dec!(101), dec!(0.1)),
            PricingError::InvalidRange(_)
        ));
    }

    #[test]
    fn test_curve_accepts_a_range_at_the_point_cap() {
        let card = RateCard::standard();
        let range = CurveRange {
            from: Decimal::ZERO,
            to: dec!(99.9),
            step: dec!(0.1),
        };
        assert_eq!(sample_curve(&card, &range).unwrap().len(), 1000);
    }
}
