use tracing_subscriber::EnvFilter;

use courtside::api;
use courtside::config::Config;
use courtside::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; real deployments set the environment directly.
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    config.validate()?;
    tracing::info!("Sports data API: {}", config.sports.base_url);
    tracing::info!(
        "Embedding provider: {} ({}, {})",
        config.embedding.provider,
        config.embedding.base_url,
        config.embedding.model
    );
    tracing::info!("Vector index provider: {}", config.index.provider);

    let state = AppState::from_config(&config)?;
    let app = api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
