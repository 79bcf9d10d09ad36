//! Validated generation request

use crate::core::error::ValidationError;
use crate::generation::cost::MIN_CREDITS;

/// A document generation request (Value Object)
///
/// Title and description are stored trimmed; construction does not
/// validate, [`DocumentRequest::validate`] does.
#[derive(Debug, Clone)]
pub struct DocumentRequest {
    title: String,
    description: String,
}

impl DocumentRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into().trim().to_string(),
            description: description.into().trim().to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Check the request against the current balance.
    ///
    /// Both fields must be non-empty and the balance must cover
    /// [`MIN_CREDITS`]. Runs before any remote call.
    pub fn validate(&self, credits: u64) -> Result<(), ValidationError> {
        if self.title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        if credits < MIN_CREDITS {
            return Err(ValidationError::InsufficientCredits {
                available: credits,
                required: MIN_CREDITS,
            });
        }
        Ok(())
    }

    /// The user-facing transcript text for this request.
    pub fn transcript_text(&self) -> String {
        format!(
            "**Title:** {}\n\n**Description:** {}",
            self.title, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_title_rejected() {
        let request = DocumentRequest::new("   ", "A description");
        assert_eq!(request.validate(1_000), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn test_empty_description_rejected() {
        let request = DocumentRequest::new("A title", "");
        assert_eq!(
            request.validate(1_000),
            Err(ValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_insufficient_credits_rejected() {
        let request = DocumentRequest::new("A title", "A description");
        assert_eq!(
            request.validate(99),
            Err(ValidationError::InsufficientCredits {
                available: 99,
                required: 100,
            })
        );
    }

    #[test]
    fn test_valid_request_at_threshold() {
        let request = DocumentRequest::new("A title", "A description");
        assert!(request.validate(100).is_ok());
    }

    #[test]
    fn test_inputs_are_trimmed() {
        let request = DocumentRequest::new("  Report  ", "\tQuarterly results\n");
        assert_eq!(request.title(), "Report");
        assert_eq!(request.description(), "Quarterly results");
    }
}
