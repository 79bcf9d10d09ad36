//! LaTeX prompt construction

use crate::generation::request::DocumentRequest;
use crate::settings::Settings;

/// Build the structured instruction sent to the markup-generation endpoint.
///
/// The template asks for a complete, compilable LaTeX document and forbids
/// explanations or markdown fencing in the response.
pub fn latex_prompt(request: &DocumentRequest, settings: &Settings) -> String {
    format!(
        r#"Generate a professional LaTeX document with the following specifications:

Title: {title}
Description: {description}

Document Settings:
- Font: {font_style}
- Font Size: {font_size}
- Language: {language}
- Document Type: {document_type}

Requirements:
1. Create a complete, compilable LaTeX document
2. Include proper document structure with sections and subsections
3. Use professional formatting appropriate for {document_type}
4. Include mathematical equations, tables, and figures where relevant
5. Ensure proper bibliography and citations if needed
6. Make the document comprehensive and well-structured
7. Use appropriate packages for the document type
8. Include proper headers, footers, and page numbering

Please generate only the LaTeX code without any explanations or markdown formatting."#,
        title = request.title(),
        description = request.description(),
        font_style = settings.font_style,
        font_size = settings.font_size,
        language = settings.language,
        document_type = settings.document_type,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_request_and_settings() {
        let request = DocumentRequest::new("Report", "Quarterly results");
        let settings = Settings::default();
        let prompt = latex_prompt(&request, &settings);

        assert!(prompt.contains("Title: Report"));
        assert!(prompt.contains("Description: Quarterly results"));
        assert!(prompt.contains("- Font: times"));
        assert!(prompt.contains("- Document Type: research-paper"));
        assert!(prompt.contains("only the LaTeX code"));
    }
}
