//! ExhibiPrice server binary

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use exhibiprice_web::advisor::{self, GeminiClient, SessionService};
use exhibiprice_web::config::AppConfig;
use exhibiprice_web::routes::home;
use exhibiprice_web::{pricing, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("exhibiprice_web=info,tower_http=info")),
        )
        .init();

    let config = Arc::new(AppConfig::from_env().context("failed to load configuration")?);
    if config.advisor.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; the advisor will answer with the fallback message");
    }

    let model = GeminiClient::new(&config.advisor, reqwest::Client::new());
    let bind_addr = config.bind_addr;
    let state = AppState {
        config,
        advisor: Arc::new(SessionService::new(model)),
    };

    let app = Router::new()
        .route("/", get(home::index))
        .nest("/api/pricing", pricing::router())
        .nest("/api/advisor", advisor::router())
        .nest_service("/static", ServeDir::new("static"))
        .fallback(home::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("listening on {}", bind_addr);
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
