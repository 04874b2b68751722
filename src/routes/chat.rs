use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::RequestError,
    message::{ChatRequest, ChatResponse, HealthResponse},
    services::completion::CompletionClient,
    state::SharedState,
};

pub async fn chat_handler<C>(
    State(state): State<SharedState<C>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RequestError>
where
    C: CompletionClient + Send + Sync + 'static,
{
    let Json(payload) = payload.map_err(|rejection| RequestError::InvalidBody {
        status: rejection.status(),
        detail: rejection.body_text(),
    })?;
    let response = state.dispatcher.handle(payload).await?;
    Ok(Json(response))
}

pub async fn health_handler<C>(State(state): State<SharedState<C>>) -> Json<HealthResponse>
where
    C: CompletionClient + Send + Sync + 'static,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "Poke".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        credential_present: state.dispatcher.credential_present(),
    })
}
