//! Pricing API route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};

use crate::pricing::calculators::{self, PricingError};
use crate::pricing::requests::{CurveQuery, QuoteQuery};
use crate::pricing::responses::{
    CurvePointResponse, CurveResponse, PricingErrorResponse, QuoteResponse,
};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/quote", get(quote))
        .route("/curve", get(curve))
}

/// Quote for a single area value
async fn quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<QuoteResponse>, PricingError> {
    let card = &state.config.rate_card;
    let area = calculators::area_from_f64(query.area)?;
    let quote = calculators::compute_quote(area, card)?;
    Ok(Json(QuoteResponse::from_quote(quote, card)))
}

/// Sampled investment-scaling curve
async fn curve(
    State(state): State<AppState>,
    Query(query): Query<CurveQuery>,
) -> Result<Json<CurveResponse>, PricingError> {
    let card = &state.config.rate_card;
    let range = query.into_range()?;
    let points = calculators::sample_curve(card, &range)?;
    Ok(Json(CurveResponse {
        currency: card.currency.clone(),
        points: points.into_iter().map(CurvePointResponse::from).collect(),
    }))
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            PricingError::InvalidArea => (StatusCode::BAD_REQUEST, "invalid_area"),
            PricingError::InvalidRange(_) => (StatusCode::BAD_REQUEST, "invalid_range"),
        };
        let body = PricingErrorResponse {
            error_type: error_type.to_string(),
            message: self.to_string(),
            details: None,
        };
        (status, Json(body)).into_response()
    }
}
