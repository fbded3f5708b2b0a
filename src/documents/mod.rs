//! Document text extraction
//!
//! Turns uploaded bytes into plain text, dispatching on the file extension:
//! - `.pdf`  - text layer of every page, in page order
//! - `.docx` - paragraph texts joined with newlines
//! - `.txt`  - UTF-8 decoded as-is

pub mod docx;
pub mod pdf;
pub mod text;

use std::fmt;

use crate::models::UploadedDocument;
use crate::types::{AppError, AppResult};
use tracing::{info, warn};

pub const UNSUPPORTED_TYPE_MESSAGE: &str =
    "Unsupported file type. Please upload PDF, DOCX, or TXT files.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Text,
}

impl DocumentKind {
    /// Resolve the kind from the extension after the last `.` (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, extension) = filename.rsplit_once('.')?;
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "txt" => Some(DocumentKind::Text),
            _ => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Pdf => write!(f, "pdf"),
            DocumentKind::Docx => write!(f, "docx"),
            DocumentKind::Text => write!(f, "txt"),
        }
    }
}

pub struct DocumentProcessor;

impl DocumentProcessor {
    /// Check the extension without touching the content.
    pub fn detect_kind(filename: &str) -> AppResult<DocumentKind> {
        DocumentKind::from_filename(filename).ok_or_else(|| {
            warn!(filename, "Unsupported file type");
            AppError::UnsupportedType(UNSUPPORTED_TYPE_MESSAGE.to_string())
        })
    }

    pub fn extract_text(document: &UploadedDocument) -> AppResult<String> {
        let kind = Self::detect_kind(&document.filename)?;
        Self::extract_as(kind, &document.content)
    }

    pub fn extract_as(kind: DocumentKind, content: &[u8]) -> AppResult<String> {
        let text = match kind {
            DocumentKind::Pdf => pdf::extract_text(content)?,
            DocumentKind::Docx => docx::extract_text(content)?,
            DocumentKind::Text => text::extract_text(content)?,
        };

        info!(kind = %kind, chars = text.chars().count(), "Extracted document text");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(DocumentKind::from_filename("paper.pdf"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_filename("Notes.DOCX"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_filename("a.b.txt"), Some(DocumentKind::Text));
        assert_eq!(DocumentKind::from_filename("data.csv"), None);
        assert_eq!(DocumentKind::from_filename("README"), None);
        assert_eq!(DocumentKind::from_filename("archive.pdf.zip"), None);
    }

    #[test]
    fn test_unsupported_type_fails_before_reading() {
        let doc = UploadedDocument::new("table.csv", None, Bytes::from_static(b"a,b\n1,2"));
        let err = DocumentProcessor::extract_text(&doc).unwrap_err();

        assert!(matches!(err, AppError::UnsupportedType(_)));
        assert_eq!(err.to_string(), UNSUPPORTED_TYPE_MESSAGE);
    }

    #[test]
    fn test_dispatches_text() {
        let doc = UploadedDocument::new("notes.txt", None, Bytes::from_static(b"Cell biology"));
        assert_eq!(DocumentProcessor::extract_text(&doc).unwrap(), "Cell biology");
    }

    #[test]
    fn test_dispatches_pdf() {
        let bytes = pdf::tests::sample_pdf(&["Photosynthesis", "Chlorophyll"]);
        let doc = UploadedDocument::new("bio.pdf", None, Bytes::from(bytes));
        let text = DocumentProcessor::extract_text(&doc).unwrap();

        assert!(text.contains("Photosynthesis"));
        assert!(text.contains("Chlorophyll"));
    }

    #[test]
    fn test_dispatches_docx() {
        let bytes = docx::tests::sample_docx(&["Mitosis", "Meiosis"]);
        let doc = UploadedDocument::new("bio.docx", None, Bytes::from(bytes));
        assert_eq!(DocumentProcessor::extract_text(&doc).unwrap(), "Mitosis\nMeiosis");
    }
}
