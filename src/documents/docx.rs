use std::io::Cursor;

use docx_rust::document::BodyContent;
use docx_rust::DocxFile;
use tracing::{error, info};

use crate::types::{AppError, AppResult};

/// Join the text of every top-level paragraph with newlines.
pub fn extract_text(content: &[u8]) -> AppResult<String> {
    info!("Starting DOCX text extraction");

    let file = DocxFile::from_reader(Cursor::new(content)).map_err(docx_error)?;
    let docx = file.parse().map_err(docx_error)?;

    let paragraphs: Vec<String> = docx
        .document
        .body
        .content
        .iter()
        .filter_map(|item| match item {
            BodyContent::Paragraph(paragraph) => Some(
                paragraph
                    .iter_text()
                    .map(|run| run.to_string())
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    let text = paragraphs.join("\n");
    info!(
        chars = text.chars().count(),
        paragraphs = paragraphs.len(),
        "Successfully extracted DOCX text"
    );
    Ok(text)
}

fn docx_error(e: docx_rust::DocxError) -> AppError {
    error!(error = %e, "Error processing DOCX");
    AppError::Extraction(format!("Error processing DOCX: {}", e))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use docx_rust::document::Paragraph;
    use docx_rust::Docx;

    pub(crate) fn sample_docx(paragraphs: &[&str]) -> Vec<u8> {
        let mut docx = Docx::default();
        for text in paragraphs {
            docx.document.push(Paragraph::default().push_text(*text));
        }
        docx.write(Cursor::new(Vec::new())).unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_joined_with_newlines() {
        let bytes = sample_docx(&["Genetics", "", "Heredity"]);
        assert_eq!(extract_text(&bytes).unwrap(), "Genetics\n\nHeredity");
    }

    #[test]
    fn test_invalid_docx_is_extraction_error() {
        let err = extract_text(b"PK but not really a zip").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        assert!(err.to_string().starts_with("Error processing DOCX"));
    }
}
