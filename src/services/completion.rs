// src/services/completion.rs
//
// One-shot chat completion against an OpenAI-compatible endpoint. Every failure
// is folded into `CompletionOutcome::Failure`; nothing here retries.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const MAX_OUTPUT_TOKENS: u32 = 500;
pub const TEMPERATURE: f32 = 0.7;

const MAX_DETAIL_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    AuthInvalid,
    RateLimited,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Success { text: String },
    Failure { kind: FailureKind, detail: String },
}

impl CompletionOutcome {
    pub fn failure(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self::Failure {
            kind,
            detail: detail.into(),
        }
    }
}

/// Anything able to answer a single user message under a system persona.
pub trait CompletionClient {
    fn complete(
        &self,
        message: &str,
        persona: &str,
    ) -> impl Future<Output = CompletionOutcome> + Send;
}

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiClient {
    /// `api_base` is the URL prefix up to (not including) `/chat/completions`.
    pub fn new(api_base: &str, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send(&self, message: &str, persona: &str) -> CompletionOutcome {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                WireMessage {
                    role: "system",
                    content: persona,
                },
                WireMessage {
                    role: "user",
                    content: message,
                },
            ],
            max_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, content_len = message.len(), "sending completion request");

        let response = match self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, timeout = e.is_timeout(), "completion request failed (transport)");
                return CompletionOutcome::failure(FailureKind::Other, sanitize_detail(&e.to_string()));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read error body>".to_string());
            let (kind, detail) = classify_error(status, &body);
            warn!(%status, ?kind, "completion service returned an error");
            return CompletionOutcome::failure(kind, detail);
        }

        let parsed = match response.json::<ChatCompletionResponse>().await {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(error = %e, "failed to parse completion response");
                return CompletionOutcome::failure(
                    FailureKind::Other,
                    format!("failed to parse response body: {e}"),
                );
            }
        };

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        match text {
            Some(text) => CompletionOutcome::Success { text },
            None => CompletionOutcome::failure(
                FailureKind::Other,
                "empty or missing content in response",
            ),
        }
    }
}

impl CompletionClient for OpenAiClient {
    async fn complete(&self, message: &str, persona: &str) -> CompletionOutcome {
        self.send(message, persona).await
    }
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Map a non-success status and its body to a failure kind plus display text.
pub fn classify_error(status: StatusCode, body: &str) -> (FailureKind, String) {
    let envelope = serde_json::from_str::<ErrorEnvelope>(body).ok();

    let code = envelope
        .as_ref()
        .and_then(|env| match &env.error.code {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => env.error.kind.clone(),
        })
        .unwrap_or_default();

    let kind = if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || code == "invalid_api_key"
    {
        FailureKind::AuthInvalid
    } else if status == StatusCode::TOO_MANY_REQUESTS || code == "rate_limit_exceeded" {
        FailureKind::RateLimited
    } else {
        FailureKind::Other
    };

    let detail = match envelope {
        Some(env) if !code.is_empty() => format!("HTTP {status} [{code}]: {}", env.error.message),
        Some(env) => format!("HTTP {status}: {}", env.error.message),
        None => format!("HTTP {status}: {body}"),
    };

    (kind, sanitize_detail(&detail))
}

/// Redact `sk-` style keys and cap the length of provider diagnostics.
pub fn sanitize_detail(input: &str) -> String {
    let mut scrubbed = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("sk-") {
        let glued = rest[..start]
            .chars()
            .next_back()
            .is_some_and(|c| c.is_ascii_alphanumeric());
        scrubbed.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let end = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
            .unwrap_or(after.len());
        if glued || end == 0 {
            scrubbed.push_str("sk-");
            rest = after;
        } else {
            scrubbed.push_str("[REDACTED]");
            rest = &after[end..];
        }
    }
    scrubbed.push_str(rest);

    if scrubbed.chars().count() <= MAX_DETAIL_CHARS {
        return scrubbed;
    }
    let truncated: String = scrubbed.chars().take(MAX_DETAIL_CHARS).collect();
    format!("{truncated}...")
}
