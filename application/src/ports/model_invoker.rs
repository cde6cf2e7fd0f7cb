//! Model invocation port
//!
//! The pipeline talks to providers through this single seam: one prompt in,
//! one reply out. Adapters in the infrastructure layer decide what the wire
//! looks like; the use cases only see [`ModelAnswer`] or a classified
//! [`InvocationError`].

use async_trait::async_trait;
use thiserror::Error;

use council_domain::{Attachment, ModelId, TokenUsage};

/// Why a model call produced nothing usable
#[derive(Error, Debug)]
pub enum InvocationError {
    #[error("Call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model returned an empty response")]
    EmptyResponse,

    #[error("API key not found in environment variable {0}")]
    MissingApiKey(String),
}

/// One successful model reply
#[derive(Debug, Clone)]
pub struct ModelAnswer {
    /// The reply text
    pub text: String,
    /// Token usage as reported by the provider; absent when unreported
    pub usage: Option<TokenUsage>,
}

impl ModelAnswer {
    pub fn new(text: impl Into<String>, usage: Option<TokenUsage>) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }
}

/// Port for invoking a single model once
///
/// Implementations must be safe to share across concurrently spawned calls;
/// the pipeline fans one invoker out to the whole roster.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Send `prompt` (plus any image attachments) to `model` and wait for
    /// the complete reply.
    async fn invoke(
        &self,
        model: &ModelId,
        prompt: &str,
        attachments: &[Attachment],
    ) -> Result<ModelAnswer, InvocationError>;
}
