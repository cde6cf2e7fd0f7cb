//! OpenRouter adapter for the [`ModelInvoker`] port

use super::wire::{ChatRequest, ChatResponse, Message};
use async_trait::async_trait;
use council_application::ports::model_invoker::{InvocationError, ModelAnswer, ModelInvoker};
use council_domain::{Attachment, ModelId};
use reqwest::Client;
use tracing::{debug, warn};

/// Chat completions endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable read for the API key
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Longest error-body excerpt kept in error messages
const MAX_SNIPPET: usize = 200;

/// [`ModelInvoker`] backed by the OpenRouter chat completions API.
///
/// Call deadlines are enforced by the caller, so the underlying client
/// carries no timeout of its own.
pub struct OpenRouterInvoker {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterInvoker {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: OPENROUTER_API_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build an invoker reading the API key from the given env var
    pub fn from_env(var: &str) -> Result<Self, InvocationError> {
        let api_key =
            std::env::var(var).map_err(|_| InvocationError::MissingApiKey(var.to_string()))?;
        Ok(Self::new(api_key))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ModelInvoker for OpenRouterInvoker {
    async fn invoke(
        &self,
        model: &ModelId,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<ModelAnswer, InvocationError> {
        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![Message::user(prompt, attachments)],
        };

        debug!("Calling {} ({} bytes of prompt)", model, prompt.len());

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| InvocationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Model {} returned HTTP {}", model, status.as_u16());
            return Err(InvocationError::Transport(format!(
                "HTTP {}: {}",
                status.as_u16(),
                snippet(&body)
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| InvocationError::MalformedResponse(e.to_string()))?;

        let text = match parsed.content() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => return Err(InvocationError::EmptyResponse),
        };

        let usage = parsed.usage.map(|u| u.into_usage());
        Ok(ModelAnswer::new(text, usage))
    }
}

/// First line of an error body, capped for error messages
fn snippet(body: &str) -> String {
    let line = body.lines().next().unwrap_or("").trim();
    if line.chars().count() > MAX_SNIPPET {
        let capped: String = line.chars().take(MAX_SNIPPET).collect();
        format!("{}...", capped)
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippet_takes_first_line() {
        let body = "{\"error\": \"bad model\"}\nsecond line";
        assert_eq!(snippet(body), "{\"error\": \"bad model\"}");
    }

    #[test]
    fn test_snippet_caps_long_bodies() {
        let body = "x".repeat(500);
        let s = snippet(&body);
        assert_eq!(s.chars().count(), MAX_SNIPPET + 3);
        assert!(s.ends_with("..."));
    }

    #[test]
    fn test_snippet_empty_body() {
        assert_eq!(snippet(""), "");
    }
}
