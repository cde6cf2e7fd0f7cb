//! Generate Title use case
//!
//! Names a conversation after its first question with one cheap model
//! call. A title is cosmetic: any failure falls back to the stock title
//! and never disturbs the council run.

use crate::config::params::DEFAULT_TITLE_TIMEOUT;
use crate::ports::model_invoker::ModelInvoker;
use council_domain::{ModelId, PromptTemplate, UNTITLED};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default model for title generation; fast and cheap is the point
pub const DEFAULT_TITLE_MODEL: &str = "google/gemini-2.5-flash";

/// Longest title kept as-is; anything longer is cut and ellipsized
const MAX_TITLE_LEN: usize = 50;

/// Use case for naming a conversation after its first question
pub struct GenerateTitleUseCase<I: ModelInvoker + 'static> {
    invoker: Arc<I>,
    model: ModelId,
    timeout: Duration,
}

impl<I: ModelInvoker + 'static> GenerateTitleUseCase<I> {
    pub fn new(invoker: Arc<I>) -> Self {
        Self {
            invoker,
            model: ModelId::from(DEFAULT_TITLE_MODEL),
            timeout: DEFAULT_TITLE_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model: ModelId) -> Self {
        self.model = model;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce a short title for `question`.
    ///
    /// Falls back to [`UNTITLED`] on any failure or timeout.
    pub async fn execute(&self, question: &str) -> String {
        let prompt = PromptTemplate::title_prompt(question);
        let call = self.invoker.invoke(&self.model, &prompt, &[]);
        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(answer)) => clean_title(&answer.text),
            Ok(Err(e)) => {
                debug!("Title generation failed: {}", e);
                UNTITLED.to_string()
            }
            Err(_) => {
                debug!("Title generation timed out after {:?}", self.timeout);
                UNTITLED.to_string()
            }
        }
    }
}

/// Normalize a raw title reply: quotes stripped, length capped.
fn clean_title(raw: &str) -> String {
    let title = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();
    if title.is_empty() {
        return UNTITLED.to_string();
    }
    if title.chars().count() > MAX_TITLE_LEN {
        let cut: String = title.chars().take(MAX_TITLE_LEN - 3).collect();
        format!("{}...", cut)
    } else {
        title.to_string()
    }
}
