// src/routes/mod.rs
pub mod chat;

use crate::{services::completion::CompletionClient, state::SharedState};
use axum::{
    Router,
    routing::{get, post},
};
use chat::{chat_handler, health_handler};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router<C>() -> Router<SharedState<C>>
where
    C: CompletionClient + Send + Sync + 'static,
{
    Router::new()
        .route("/chat", post(chat_handler::<C>))
        .route("/health", get(health_handler::<C>))
        .fallback_service(ServeDir::new("public"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::very_permissive())
}
