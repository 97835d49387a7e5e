//! Document format detection

use crate::error::{Result, SummarizerError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Txt,
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Parse a format hint (file extension or declared type).
    ///
    /// Hints outside the supported set are rejected with a typed error
    /// rather than silently producing an empty document.
    pub fn from_hint(hint: &str) -> Result<Self> {
        match hint.trim().trim_start_matches('.').to_lowercase().as_str() {
            "txt" => Ok(DocumentFormat::Txt),
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            other => Err(SummarizerError::UnsupportedFormat(other.to_string())),
        }
    }

    /// MIME type sent alongside the raw bytes on the summarization call.
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "application/pdf",
            DocumentFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentFormat::Txt => "text/plain",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFormat::Txt => write!(f, "txt"),
            DocumentFormat::Pdf => write!(f, "pdf"),
            DocumentFormat::Docx => write!(f, "docx"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hint_known_formats() {
        assert_eq!(DocumentFormat::from_hint("txt").unwrap(), DocumentFormat::Txt);
        assert_eq!(DocumentFormat::from_hint("PDF").unwrap(), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_hint(".docx").unwrap(), DocumentFormat::Docx);
    }

    #[test]
    fn test_from_hint_unknown_format() {
        let err = DocumentFormat::from_hint("odt").unwrap_err();
        assert!(matches!(err, SummarizerError::UnsupportedFormat(_)));
    }
}
