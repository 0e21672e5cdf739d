use std::sync::Arc;

use anyhow::Context;

use arena_api::{app, config::ApiConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    arena_observability::init();

    let config = ApiConfig::from_env().context("reading configuration")?;
    let services = Arc::new(app::services::AppServices::from_config(&config)?);

    let _refresh = services.catalog.clone().spawn_refresh(config.refresh_every);

    let app = app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
