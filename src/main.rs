use std::sync::Arc;
use std::time::Duration;

use ai_shop_backend::{
    config::Config,
    routes,
    services::completion::HttpCompletionClient,
    state::{AppState, SharedState},
};
use anyhow::Context;
use tower_http::{cors::CorsLayer, services::ServeDir};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env();

    let completion = Arc::new(HttpCompletionClient::from_config(&config));
    let state: SharedState = Arc::new(AppState::new(config.session_ttl, completion));

    spawn_session_reaper(state.clone());

    let cors = CorsLayer::very_permissive();

    let app = routes::create_router()
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, model = %config.completion_model, "AI shop backend listening");
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

fn spawn_session_reaper(state: SharedState) {
    let period = state.sessions.ttl().max(Duration::from_secs(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = state.sessions.purge_expired().await;
            if removed > 0 {
                info!(removed, "purged idle sessions");
            }
        }
    });
}
