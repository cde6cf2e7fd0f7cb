//! Prompt domain
//!
//! Templates for generating the ranking, synthesis, and title prompts.

mod template;

pub use template::PromptTemplate;
