//! Per-user generation history

use crate::session::transcript::Message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries returned by a history listing.
pub const HISTORY_LIMIT: usize = 20;

/// A persisted record of one completed generation (Entity)
///
/// Immutable after creation; deleted individually by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub description: String,
    pub latex: String,
    pub pdf_url: String,
    pub created_at: DateTime<Utc>,
    pub messages: Vec<Message>,
}

/// A history entry before the store has assigned it an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryDraft {
    pub title: String,
    pub description: String,
    pub latex: String,
    pub pdf_url: String,
    pub messages: Vec<Message>,
}

impl HistoryDraft {
    /// Build the draft for a completed generation, including the
    /// two-message transcript snapshot shown when the entry is reopened.
    pub fn for_generation(
        title: impl Into<String>,
        description: impl Into<String>,
        latex: impl Into<String>,
        pdf_url: impl Into<String>,
    ) -> Self {
        let title = title.into();
        let description = description.into();
        let pdf_url = pdf_url.into();
        let messages = vec![
            Message::user(format!(
                "**Title:** {}\n\n**Description:** {}",
                title, description
            )),
            Message::assistant_with_pdf("PDF generated successfully!", pdf_url.clone()),
        ];
        Self {
            title,
            description,
            latex: latex.into(),
            pdf_url,
            messages,
        }
    }
}

/// Result of listing a session's history.
#[derive(Debug, Clone)]
pub enum HistoryView {
    /// Entries for an authenticated session, newest first.
    Entries(Vec<HistoryEntry>),
    /// History is not available for this session kind (guest mode).
    Unavailable,
}

impl HistoryView {
    pub fn entries(&self) -> &[HistoryEntry] {
        match self {
            Self::Entries(entries) => entries,
            Self::Unavailable => &[],
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::transcript::Role;

    #[test]
    fn test_draft_transcript_snapshot() {
        let draft = HistoryDraft::for_generation(
            "Report",
            "Quarterly results",
            "\\documentclass{article}",
            "/api/download-pdf/abc.pdf",
        );

        assert_eq!(draft.messages.len(), 2);
        assert_eq!(draft.messages[0].role, Role::User);
        assert!(draft.messages[0].text.contains("**Title:** Report"));
        assert_eq!(
            draft.messages[1].pdf_url.as_deref(),
            Some("/api/download-pdf/abc.pdf")
        );
    }

    #[test]
    fn test_unavailable_view_is_empty() {
        let view = HistoryView::Unavailable;
        assert!(view.is_unavailable());
        assert!(view.entries().is_empty());
    }
}
