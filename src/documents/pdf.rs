use lopdf::Document;
use tracing::{debug, error, info};

use crate::types::{AppError, AppResult};

/// Concatenate the text layer of every page in page order.
pub fn extract_text(content: &[u8]) -> AppResult<String> {
    info!("Starting PDF text extraction");

    let doc = Document::load_mem(content).map_err(|e| {
        error!(error = %e, "Error processing PDF");
        AppError::Extraction(format!("Error processing PDF: {}", e))
    })?;

    let pages = doc.get_pages();
    let mut text = String::new();
    for page_num in pages.keys() {
        let page_text = doc.extract_text(&[*page_num]).map_err(|e| {
            error!(page = page_num, error = %e, "Error processing PDF page");
            AppError::Extraction(format!("Error processing PDF: page {}: {}", page_num, e))
        })?;
        text.push_str(&page_text);
        debug!(page = page_num, "Extracted text from page");
    }

    info!(
        chars = text.chars().count(),
        pages = pages.len(),
        "Successfully extracted PDF text"
    );
    Ok(text)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Build a PDF with one Courier text line per page.
    pub(crate) fn sample_pdf(pages: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in pages {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![72.into(), 700.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_pages_concatenated_in_order() {
        let bytes = sample_pdf(&["Enzymes", "Substrates", "Inhibitors"]);
        let text = extract_text(&bytes).unwrap();

        let first = text.find("Enzymes").unwrap();
        let second = text.find("Substrates").unwrap();
        let third = text.find("Inhibitors").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_invalid_pdf_is_extraction_error() {
        let err = extract_text(b"definitely not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        assert!(err.to_string().starts_with("Error processing PDF"));
    }
}
