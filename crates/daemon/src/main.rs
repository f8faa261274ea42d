use axum::{response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod content;
mod error;
mod keywords;
mod llm;
mod pipeline;
mod providers;
mod render;
mod script;
#[cfg(test)]
mod test_support;

use config::Config;
use pipeline::Pipeline;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    config.ensure_directories()?;
    info!(
        "Output to {:?}, scratch in {:?}, renderer {:?}",
        config.output_dir, config.temp_dir, config.renderer_command
    );

    let pipeline = Arc::new(Pipeline::from_config(&config)?);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_credentials(false);

    let app = Router::new()
        .route("/health", get(health))
        .nest("/api", api::router(pipeline))
        .layer(cors);

    info!("Starting server on {}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
