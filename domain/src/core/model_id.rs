//! Model identifier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a language model as routed by the provider (Value Object)
///
/// Council members are addressed by their full provider identifier, e.g.
/// `openai/gpt-5.1` or `google/gemini-3-pro-preview`. The id is opaque to
/// the domain: any non-empty string the provider accepts is valid here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(String);

impl ModelId {
    /// Create a model id from a provider identifier string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The provider prefix, when the id carries one (`openai/gpt-5.1` -> `openai`)
    pub fn provider(&self) -> Option<&str> {
        self.0.split_once('/').map(|(provider, _)| provider)
    }

    /// The bare model name without the provider prefix
    pub fn short_name(&self) -> &str {
        self.0
            .split_once('/')
            .map(|(_, name)| name)
            .unwrap_or(&self.0)
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        ModelId::new(s)
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        ModelId::new(s)
    }
}

impl Serialize for ModelId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(ModelId::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_id_display() {
        let model = ModelId::new("openai/gpt-5.1");
        assert_eq!(model.to_string(), "openai/gpt-5.1");
        assert_eq!(model.as_str(), "openai/gpt-5.1");
    }

    #[test]
    fn test_provider_split() {
        let model = ModelId::new("google/gemini-3-pro-preview");
        assert_eq!(model.provider(), Some("google"));
        assert_eq!(model.short_name(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_bare_id_has_no_provider() {
        let model = ModelId::new("local-model");
        assert_eq!(model.provider(), None);
        assert_eq!(model.short_name(), "local-model");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let model = ModelId::new("x-ai/grok-4-fast");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, "\"x-ai/grok-4-fast\"");
        let back: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }
}
