use crate::types::{AppError, AppResult};

pub fn extract_text(content: &[u8]) -> AppResult<String> {
    String::from_utf8(content.to_vec())
        .map_err(|e| AppError::Extraction(format!("Error processing TXT: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_decoded_verbatim() {
        let text = extract_text("Zellbiologie\n  über Mitochondrien ".as_bytes()).unwrap();
        assert_eq!(text, "Zellbiologie\n  über Mitochondrien ");
    }

    #[test]
    fn test_invalid_utf8_is_extraction_error() {
        let err = extract_text(&[0x66, 0x6f, 0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
        assert!(err.to_string().starts_with("Error processing TXT"));
    }
}
