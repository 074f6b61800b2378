//! Request DTOs for pricing API endpoints.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::pricing::calculators::PricingError;
use crate::pricing::models::CurveRange;

/// Query for a single pricing quote
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub area: f64,
}

/// Query for the investment-scaling curve; all bounds optional
#[derive(Debug, Default, Deserialize)]
pub struct CurveQuery {
    #[serde(default)]
    pub from: Option<f64>,
    #[serde(default)]
    pub to: Option<f64>,
    #[serde(default)]
    pub step: Option<f64>,
}

impl CurveQuery {
    /// Resolve the query against the default chart window.
    pub fn into_range(self) -> Result<CurveRange, PricingError> {
        let defaults = CurveRange::default();
        Ok(CurveRange {
            from: resolve_bound(self.from, defaults.from, "from")?,
            to: resolve_bound(self.to, defaults.to, "to")?,
            step: resolve_bound(self.step, defaults.step, "step")?,
        })
    }
}

fn resolve_bound(
    value: Option<f64>,
    default: Decimal,
    name: &str,
) -> Result<Decimal, PricingError> {
    match value {
        None => Ok(default),
        Some(v) if v.is_finite() => Decimal::from_f64(v)
            .ok_or_else(|| PricingError::InvalidRange(format!("{} is out of range", name))),
        Some(_) => Err(PricingError::InvalidRange(format!(
            "{} must be finite",
            name
        ))),
    }
}
