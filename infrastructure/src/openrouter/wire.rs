//! Wire types for the OpenRouter chat completions API.
//!
//! Requests carry either a plain text message or a mixed text/image parts
//! array; images travel inline as `data:` URLs. Responses are reduced to
//! the first choice's content plus the provider's token counts.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use council_domain::{Attachment, TokenUsage};
use serde::{Deserialize, Serialize};

/// A chat completion request
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

/// One chat message
#[derive(Debug, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: MessageContent,
}

impl Message {
    /// User message: plain text, or text plus inline images when present.
    ///
    /// Only image attachments become parts; textual documents are already
    /// inlined into the prompt and binary documents are not sent at all.
    pub fn user(text: impl Into<String>, attachments: &[Attachment]) -> Self {
        let images: Vec<ContentPart> = attachments
            .iter()
            .filter(|a| a.is_image())
            .map(|a| ContentPart::ImageUrl {
                image_url: ImageUrl { url: data_url(a) },
            })
            .collect();

        let content = if images.is_empty() {
            MessageContent::Text(text.into())
        } else {
            let mut parts = vec![ContentPart::Text { text: text.into() }];
            parts.extend(images);
            MessageContent::Parts(parts)
        };

        Self {
            role: "user",
            content,
        }
    }
}

/// Message content: a bare string or an array of typed parts
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

/// Inline an image attachment as a `data:` URL
pub fn data_url(attachment: &Attachment) -> String {
    format!(
        "data:{};base64,{}",
        attachment.media_type,
        STANDARD.encode(&attachment.data)
    )
}

/// A chat completion response, reduced to what the council consumes
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Usage block as reported by the provider
#[derive(Debug, Deserialize)]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl WireUsage {
    /// Token counts with the total derived locally, not read off the wire
    pub fn into_usage(self) -> TokenUsage {
        TokenUsage::new(self.prompt_tokens, self.completion_tokens)
    }
}

impl ChatResponse {
    /// First choice's text, if any arrived
    pub fn content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_only_message_serializes_flat() {
        let request = ChatRequest {
            model: "vendor/model".to_string(),
            messages: vec![Message::user("hello", &[])],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "vendor/model");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_image_attachment_becomes_data_url_part() {
        let attachment = Attachment::new("pic.png", "image/png", vec![1, 2, 3]);
        let message = Message::user("what is this?", std::slice::from_ref(&attachment));
        let json = serde_json::to_value(&message).unwrap();

        let parts = json["content"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "what is this?");
        assert_eq!(parts[1]["type"], "image_url");
        let url = parts[1]["image_url"]["url"].as_str().unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn test_non_image_attachments_are_not_sent() {
        let attachment = Attachment::new("notes.txt", "text/plain", b"inline me".to_vec());
        let message = Message::user("question", std::slice::from_ref(&attachment));
        let json = serde_json::to_value(&message).unwrap();
        // Stays a flat string message
        assert_eq!(json["content"], "question");
    }

    #[test]
    fn test_response_content_and_usage() {
        let body = r#"{
            "choices": [{"message": {"content": "an answer"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 7, "total_tokens": 999}
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.content(), Some("an answer"));

        // The reported total is ignored; ours is derived
        let usage = response.usage.unwrap().into_usage();
        assert_eq!(usage.total_tokens, 19);
    }

    #[test]
    fn test_response_without_usage_or_choices() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(response.content().is_none());
        assert!(response.usage.is_none());
    }
}
