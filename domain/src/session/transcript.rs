//! Conversation transcript entities

use serde::{Deserialize, Serialize};

/// Role of a message in the transcript
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A message in the transcript (Entity)
///
/// Assistant messages may carry a reference to the produced PDF.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            pdf_url: None,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            pdf_url: None,
        }
    }

    pub fn assistant_with_pdf(text: impl Into<String>, pdf_url: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            pdf_url: Some(pdf_url.into()),
        }
    }
}

/// Append-only conversation transcript.
///
/// Cleared only by an explicit clear or by sign-out.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_append_and_clear() {
        let mut transcript = Transcript::new();
        transcript.push(Message::user("**Title:** Report"));
        transcript.push(Message::assistant_with_pdf(
            "PDF generated successfully!",
            "http://localhost:5000/api/download-pdf/abc.pdf",
        ));

        assert_eq!(transcript.messages().len(), 2);
        assert_eq!(transcript.messages()[1].role, Role::Assistant);
        assert!(transcript.messages()[1].pdf_url.is_some());

        transcript.clear();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }
}
