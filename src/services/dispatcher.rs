// src/services/dispatcher.rs
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    config::Credential,
    error::RequestError,
    message::{ChatRequest, ChatResponse},
    services::{
        chatbot::{detect_intent, generate_reply},
        completion::{CompletionClient, CompletionOutcome, FailureKind},
    },
};

/// Routes one chat message to the completion service, or to the local demo
/// replies when no usable credential is configured.
pub struct Dispatcher<C> {
    client: Arc<C>,
    credential: Credential,
    persona: Arc<str>,
}

impl<C> Clone for Dispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            credential: self.credential.clone(),
            persona: Arc::clone(&self.persona),
        }
    }
}

impl<C> Dispatcher<C>
where
    C: CompletionClient + Send + Sync + 'static,
{
    pub fn new(client: C, credential: Credential, persona: impl Into<Arc<str>>) -> Self {
        Self {
            client: Arc::new(client),
            credential,
            persona: persona.into(),
        }
    }

    pub fn credential_present(&self) -> bool {
        self.credential.is_present()
    }

    /// Handle one request. A panic anywhere below is reported as
    /// `RequestError::Internal` rather than tearing down the caller.
    pub async fn handle(&self, request: ChatRequest) -> Result<ChatResponse, RequestError> {
        let this = self.clone();
        // Detached: a dropped caller does not cancel the completion call.
        match tokio::spawn(async move { this.dispatch(request).await }).await {
            Ok(result) => result,
            Err(e) => Err(RequestError::Internal(e.to_string())),
        }
    }

    async fn dispatch(&self, request: ChatRequest) -> Result<ChatResponse, RequestError> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(RequestError::EmptyMessage);
        }

        let session_id = match request.session_id {
            Some(s) if !s.trim().is_empty() => s,
            _ => Uuid::new_v4().to_string(),
        };

        let response = if self.credential.is_present() {
            let outcome = self.client.complete(message, &self.persona).await;
            reply_for_outcome(outcome, message)
        } else {
            let intent = detect_intent(message);
            info!(%session_id, ?intent, "no credential configured, answering in demo mode");
            generate_reply(intent, message)
        };

        Ok(ChatResponse {
            session_id,
            response,
            timestamp: Uuid::new_v4().to_string(),
        })
    }
}

fn reply_for_outcome(outcome: CompletionOutcome, message: &str) -> String {
    match outcome {
        CompletionOutcome::Success { text } => text,
        CompletionOutcome::Failure { kind, detail } => {
            warn!(?kind, %detail, "completion failed, sending fallback reply");
            match kind {
                FailureKind::AuthInvalid => format!(
                    "Hey! I'm Poke from The Interaction Company! 👋\n\n\
                    I received your message: \"{message}\"\n\n\
                    Unfortunately the API key I'm configured with was rejected, so I can't reach \
                    my language model right now. Please check that OPENAI_API_KEY is valid.\n\n\
                    Error details: {detail}"
                ),
                FailureKind::RateLimited => format!(
                    "Whoa, I'm getting a lot of requests right now! 🐢\n\n\
                    The language model service is rate limiting me. Please wait a moment \
                    and try again later.\n\n\
                    Error details: {detail}"
                ),
                FailureKind::Other => format!(
                    "Sorry, something went wrong while I was thinking about that. 😕\n\n\
                    I couldn't get a response from the language model service. Please try again \
                    in a bit.\n\n\
                    Error details: {detail}"
                ),
            }
        }
    }
}
