//! Pricing engine module for the exhibition estimator.
//!
//! Pure tiered-discount calculations plus the JSON API that exposes them.
//! Both the interactive calculator and the chart sampler go through this
//! module, so it is the single source of truth for pricing.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;

// Re-export commonly used items
pub use calculators::{
    area_from_f64, compute_quote, raw_total_cost, round_money, sample_curve, PricingError,
};
pub use models::{CurvePoint, CurveRange, Quote, RateCard};
pub use routes::router;
