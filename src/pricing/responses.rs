//! Response DTOs for pricing API endpoints.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::pricing::calculators::round_money;
use crate::pricing::models::{CurvePoint, Quote, RateCard};

/// Pricing breakdown for JSON responses
///
/// Amounts are rounded for display here; the underlying [`Quote`] keeps full
/// precision.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub effective_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discount_percentage: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub savings: Decimal,
    pub currency: String,
}

impl QuoteResponse {
    pub fn from_quote(quote: Quote, card: &RateCard) -> Self {
        Self {
            area: quote.area,
            effective_rate: round_money(quote.effective_rate, 2),
            total_cost: round_money(quote.total_cost, 2),
            discount_percentage: round_money(quote.discount_percentage, 2),
            savings: round_money(quote.savings, 2),
            currency: card.currency.clone(),
        }
    }
}

/// One chart point for JSON responses
#[derive(Debug, Serialize)]
pub struct CurvePointResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub area: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_cost: Decimal,
}

impl From<CurvePoint> for CurvePointResponse {
    fn from(point: CurvePoint) -> Self {
        Self {
            area: point.area,
            total_cost: point.total_cost,
        }
    }
}

/// Sampled investment-scaling curve
#[derive(Debug, Serialize)]
pub struct CurveResponse {
    pub currency: String,
    pub points: Vec<CurvePointResponse>,
}

/// Generic pricing error response
#[derive(Debug, Serialize)]
pub struct PricingErrorResponse {
    pub error_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
