use std::sync::Arc;

use anyhow::Context;

use pantry_api::app::{build_app, services::AppServices};
use pantry_infra::PantryConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pantry_observability::init();

    let config = PantryConfig::from_env().context("invalid configuration")?;
    let backend = pantry_infra::backend::init(&config).context("failed to initialize backend")?;
    tracing::info!(backend = backend.kind().as_str(), collection = %config.collection, "backend ready");

    let app = build_app(Arc::new(AppServices::new(backend)));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
