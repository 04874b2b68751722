// src/config.rs
use std::fmt;

use thiserror::Error;

/// Value shipped in sample environments; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "sk-proj-demo-key";

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {reason}")]
    InvalidPort { value: String, reason: String },
}

/// The completion service secret. Read once at startup, never mutated.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Self(None)
        } else {
            Self(Some(trimmed.to_string()))
        }
    }

    pub fn absent() -> Self {
        Self(None)
    }

    /// True when a real key is configured (not empty, not the placeholder).
    pub fn is_present(&self) -> bool {
        matches!(&self.0, Some(key) if key != PLACEHOLDER_API_KEY)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

// Never print the key itself.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.0 {
            None => "absent",
            Some(key) if key == PLACEHOLDER_API_KEY => "placeholder",
            Some(_) => "present",
        };
        f.debug_tuple("Credential").field(&state).finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub port: u16,
    pub model: String,
    pub api_base: String,
}

impl Config {
    /// Load from the process environment (after `.env`, if any).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credential = Credential::new(
            lookup("OPENAI_API_KEY").unwrap_or_else(|| PLACEHOLDER_API_KEY.to_string()),
        );

        let port = match lookup("PORT") {
            Some(raw) if !raw.trim().is_empty() => {
                raw.trim()
                    .parse::<u16>()
                    .map_err(|e| ConfigError::InvalidPort {
                        value: raw.clone(),
                        reason: e.to_string(),
                    })?
            }
            _ => DEFAULT_PORT,
        };

        let model = non_blank(lookup("OPENAI_MODEL")).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_base =
            non_blank(lookup("OPENAI_API_BASE")).unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Ok(Self {
            credential,
            port,
            model,
            api_base,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
