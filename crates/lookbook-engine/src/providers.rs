use std::env;

use lookbook_contracts::prompts::PromptKind;
use lookbook_contracts::providers::{NamedProvider, ProviderRegistry};
use reqwest::blocking::Client as HttpClient;
use serde_json::{json, Value};
use thiserror::Error;

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const GENERATION_TEMPERATURE: f64 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 800;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("GEMINI_API_KEY or GOOGLE_API_KEY not set")]
    MissingApiKey,
    #[error("API request failed with status {status}")]
    RequestFailed { status: u16 },
    #[error("unexpected API response format")]
    UnexpectedResponseShape,
    #[error("model request failed ({endpoint})")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("model response is not valid JSON")]
    Decode(#[source] serde_json::Error),
}

/// A text-completion backend. One call per prompt; implementations do not
/// retry.
pub trait TextProvider: Send + Sync {
    fn name(&self) -> &str;
    fn generate(&self, kind: PromptKind, prompt: &str) -> Result<String, ModelError>;
}

impl NamedProvider for Box<dyn TextProvider> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }
}

pub type TextProviderRegistry = ProviderRegistry<Box<dyn TextProvider>>;

pub fn default_provider_registry(model: Option<&str>) -> TextProviderRegistry {
    let gemini = GeminiProvider::from_env(model.unwrap_or(DEFAULT_GEMINI_MODEL));
    let providers: Vec<Box<dyn TextProvider>> = if gemini.has_api_key() {
        vec![Box::new(gemini), Box::new(DryrunProvider)]
    } else {
        vec![Box::new(DryrunProvider), Box::new(gemini)]
    };
    ProviderRegistry::new(providers)
}

pub struct DryrunProvider;

impl TextProvider for DryrunProvider {
    fn name(&self) -> &str {
        "dryrun"
    }

    fn generate(&self, kind: PromptKind, _prompt: &str) -> Result<String, ModelError> {
        Ok(match kind {
            PromptKind::Chat => "Dryrun stylist here! Tell me your style, plus a season or an \
                                 occasion, and I'll put a lookbook together."
                .to_string(),
            PromptKind::Outfits => {
                "Dryrun mode has no live outfit ideas; showing catalog looks instead.".to_string()
            }
        })
    }
}

pub struct GeminiProvider {
    api_base: String,
    api_key: Option<String>,
    model: String,
    http: HttpClient,
}

impl GeminiProvider {
    pub fn new(api_base: &str, api_key: Option<String>, model: &str) -> Self {
        Self {
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            api_key: api_key
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty()),
            model: model.trim().to_string(),
            http: HttpClient::new(),
        }
    }

    pub fn from_env(model: &str) -> Self {
        let api_base = non_empty_env("GEMINI_API_BASE")
            .map(|value| value.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        let api_key = non_empty_env("GEMINI_API_KEY").or_else(|| non_empty_env("GOOGLE_API_KEY"));
        Self::new(&api_base, api_key, model)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> String {
        let model_path = if self.model.starts_with("models/") {
            self.model.clone()
        } else {
            format!("models/{}", self.model)
        };
        format!("{}/{}:generateContent", self.api_base, model_path)
    }
}

impl TextProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn generate(&self, kind: PromptKind, prompt: &str) -> Result<String, ModelError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ModelError::MissingApiKey);
        };
        let endpoint = self.endpoint();
        log::debug!(
            "gemini {} request to {endpoint} ({} prompt chars)",
            kind.as_str(),
            prompt.chars().count()
        );

        let transport = |source| ModelError::Transport {
            endpoint: endpoint.clone(),
            source,
        };
        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(&build_request_body(prompt))
            .send()
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ModelError::RequestFailed {
                status: status.as_u16(),
            });
        }
        let body = response.text().map_err(transport)?;
        let payload: Value = serde_json::from_str(&body).map_err(ModelError::Decode)?;
        extract_completion_text(&payload)
    }
}

pub fn build_request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "role": "user",
                "parts": [{ "text": prompt }],
            }
        ],
        "generationConfig": {
            "temperature": GENERATION_TEMPERATURE,
            "maxOutputTokens": MAX_OUTPUT_TOKENS,
        },
    })
}

/// First candidate's first text part.
pub fn extract_completion_text(payload: &Value) -> Result<String, ModelError> {
    payload
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"))
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .and_then(|parts| parts.first())
        .and_then(|part| part.get("text"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(ModelError::UnexpectedResponseShape)
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
