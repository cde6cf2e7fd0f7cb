//! Invoker settings from TOML (`[invoker]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [invoker]
//! base_url = "https://openrouter.ai/api/v1/chat/completions"
//! api_key_env = "OPENROUTER_API_KEY"
//! timeout_secs = 120
//! title_model = "google/gemini-2.5-flash"
//! ```

use crate::openrouter::{API_KEY_ENV, OPENROUTER_API_URL};
use council_application::config::DEFAULT_CALL_TIMEOUT;
use serde::{Deserialize, Serialize};

/// OpenRouter endpoint and call settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInvokerConfig {
    /// Chat completions endpoint
    pub base_url: String,
    /// Environment variable read for the API key
    pub api_key_env: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Model used for conversation titles; absent means the built-in default
    pub title_model: Option<String>,
}

impl Default for FileInvokerConfig {
    fn default() -> Self {
        Self {
            base_url: OPENROUTER_API_URL.to_string(),
            api_key_env: API_KEY_ENV.to_string(),
            timeout_secs: DEFAULT_CALL_TIMEOUT.as_secs(),
            title_model: None,
        }
    }
}
