//! ExhibiPrice web frontend.
//!
//! Axum application serving the exhibition-space estimator: the calculator
//! page, the pricing JSON API and the AI advisor chat.

use std::sync::Arc;

pub mod advisor;
pub mod config;
pub mod error;
pub mod pricing;
pub mod routes;

use advisor::{GeminiClient, SessionService};
use config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub advisor: Arc<SessionService<GeminiClient>>,
}
