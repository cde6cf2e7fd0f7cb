//! Council query value objects
//!
//! A [`CouncilQuery`] is one user turn as the pipeline sees it: the prompt
//! text, any file attachments, and the roster that will answer it. It is
//! constructed once per turn and never mutated while the stages run.

use serde::{Deserialize, Serialize};

use crate::core::error::DomainError;
use crate::core::roster::CouncilRoster;

/// Document formats we never try to inline as text. Images are handled
/// separately (vision-capable transports attach them as image parts).
const BINARY_DOCUMENT_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// A file attached to a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Original file name, used in inlined document headers
    pub name: String,
    /// MIME type (e.g. `text/plain`, `image/png`)
    pub media_type: String,
    /// Raw file bytes
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            data,
        }
    }

    /// Whether this attachment is an image to be passed through to the model
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    /// Whether this is a binary document format we cannot inline as text
    pub fn is_binary_document(&self) -> bool {
        BINARY_DOCUMENT_TYPES.contains(&self.media_type.as_str())
    }

    /// The attachment content as UTF-8 text, when it is a readable text file.
    ///
    /// Images, known binary document formats, and byte sequences that are
    /// not valid UTF-8 all yield `None`.
    pub fn as_text(&self) -> Option<&str> {
        if self.is_image() || self.is_binary_document() {
            return None;
        }
        std::str::from_utf8(&self.data).ok()
    }
}

/// One user turn put before the council (Value Object)
///
/// Immutable once constructed. The prompt must be non-empty; attachments
/// and roster are captured with it so every stage of one run sees the same
/// input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouncilQuery {
    prompt: String,
    attachments: Vec<Attachment>,
    roster: CouncilRoster,
}

impl CouncilQuery {
    /// Create a query, rejecting empty or whitespace-only prompts
    pub fn try_new(
        prompt: impl Into<String>,
        roster: CouncilRoster,
    ) -> Result<Self, DomainError> {
        let prompt = prompt.into();
        if prompt.trim().is_empty() {
            return Err(DomainError::EmptyPrompt);
        }
        Ok(Self {
            prompt,
            attachments: Vec::new(),
            roster,
        })
    }

    /// Attach files to the query
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn roster(&self) -> &CouncilRoster {
        &self.roster
    }

    /// Image attachments that the transport should forward to the model
    pub fn image_attachments(&self) -> impl Iterator<Item = &Attachment> {
        self.attachments.iter().filter(|a| a.is_image())
    }

    /// The prompt with readable text attachments inlined as framed blocks.
    ///
    /// Each text file becomes a `--- File: name --- ... --- End of name ---`
    /// section appended after the prompt. Images and binary documents are
    /// skipped; they travel as attachments, not text.
    pub fn prompt_with_documents(&self) -> String {
        let blocks: Vec<String> = self
            .attachments
            .iter()
            .filter_map(|file| {
                file.as_text().map(|text| {
                    format!(
                        "--- File: {} ---\n{}\n--- End of {} ---",
                        file.name, text, file.name
                    )
                })
            })
            .collect();

        if blocks.is_empty() {
            self.prompt.clone()
        } else {
            format!("{}\n\n{}", self.prompt, blocks.join("\n\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> CouncilRoster {
        CouncilRoster::new(
            vec!["a/alpha".into(), "b/beta".into()],
            "c/chairman".into(),
        )
    }

    #[test]
    fn test_empty_prompt_rejected() {
        assert_eq!(
            CouncilQuery::try_new("   ", roster()).unwrap_err(),
            DomainError::EmptyPrompt
        );
    }

    #[test]
    fn test_text_attachment_inlined() {
        let query = CouncilQuery::try_new("Summarize this.", roster())
            .unwrap()
            .with_attachments(vec![Attachment::new(
                "notes.txt",
                "text/plain",
                b"line one\nline two".to_vec(),
            )]);

        let prompt = query.prompt_with_documents();
        assert!(prompt.starts_with("Summarize this."));
        assert!(prompt.contains("--- File: notes.txt ---"));
        assert!(prompt.contains("line one\nline two"));
        assert!(prompt.contains("--- End of notes.txt ---"));
    }

    #[test]
    fn test_images_and_binaries_not_inlined() {
        let query = CouncilQuery::try_new("Look at these.", roster())
            .unwrap()
            .with_attachments(vec![
                Attachment::new("photo.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]),
                Attachment::new("paper.pdf", "application/pdf", b"%PDF-1.7".to_vec()),
            ]);

        assert_eq!(query.prompt_with_documents(), "Look at these.");
        assert_eq!(query.image_attachments().count(), 1);
    }

    #[test]
    fn test_non_utf8_text_file_skipped() {
        let attachment = Attachment::new("data.bin", "application/octet-stream", vec![0xff, 0xfe]);
        assert!(attachment.as_text().is_none());
    }

    #[test]
    fn test_no_attachments_returns_prompt_unchanged() {
        let query = CouncilQuery::try_new("Just a question", roster()).unwrap();
        assert_eq!(query.prompt_with_documents(), "Just a question");
    }
}
