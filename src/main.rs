use std::sync::Arc;

use anyhow::Context;
use poke_chat::{
    config::Config,
    routes,
    services::{completion::OpenAiClient, dispatcher::Dispatcher, persona::POKE_PERSONA},
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("failed to load configuration")?;

    let client = OpenAiClient::new(
        &config.api_base,
        config.model.clone(),
        config.credential.as_str().unwrap_or_default(),
    );
    if config.credential.is_present() {
        tracing::info!(model = %client.model(), "completion service configured");
    } else {
        tracing::warn!("OPENAI_API_KEY not set, replies will come from demo mode");
    }

    let dispatcher = Dispatcher::new(client, config.credential.clone(), POKE_PERSONA);
    let state = Arc::new(AppState::new(dispatcher));

    let app = routes::create_router().with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("🧠 Poke running at http://localhost:{}", config.port);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
