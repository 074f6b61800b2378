//! Calculator page route handlers

use askama::Template;
use axum::{extract::State, response::Html};
use rust_decimal::Decimal;

use crate::error::{AppError, Result};
use crate::pricing::{compute_quote, round_money};
use crate::AppState;

/// Slider bounds for the interactive calculator, in m².
const MIN_AREA: u32 = 25;
const MAX_AREA: u32 = 200;

/// Calculator page template
#[derive(Template)]
#[template(path = "index.html")]
struct CalculatorPageTemplate {
    currency: String,
    min_area: u32,
    max_area: u32,
    initial_area: u32,
    initial_total: String,
    initial_rate: String,
    initial_discount: String,
    initial_savings: String,
}

/// Estimator page with the initial quote rendered server-side
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let card = &state.config.rate_card;
    let quote = compute_quote(Decimal::from(MIN_AREA), card)
        .map_err(|err| AppError::Internal(err.to_string()))?;

    let template = CalculatorPageTemplate {
        currency: card.currency.clone(),
        min_area: MIN_AREA,
        max_area: MAX_AREA,
        initial_area: MIN_AREA,
        initial_total: round_money(quote.total_cost, 0).to_string(),
        initial_rate: round_money(quote.effective_rate, 2).to_string(),
        initial_discount: round_money(quote.discount_percentage, 2).to_string(),
        initial_savings: round_money(quote.savings, 0).to_string(),
    };

    Ok(Html(template.render()?))
}

/// Fallback handler for unknown paths
pub async fn not_found() -> AppError {
    AppError::NotFound
}
