//! OpenRouter API client
//!
//! Implements the application's [`ModelInvoker`] port against the
//! OpenRouter chat completions endpoint:
//!
//! - [`invoker`] - the HTTP adapter
//! - [`wire`] - request/response serde types
//!
//! [`ModelInvoker`]: council_application::ports::model_invoker::ModelInvoker

pub mod invoker;
pub mod wire;

pub use invoker::{API_KEY_ENV, OPENROUTER_API_URL, OpenRouterInvoker};
