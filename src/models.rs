use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::llm::LLMAdapter;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub llm: Arc<dyn LLMAdapter>,
}

impl AppState {
    pub fn new(config: Config, llm: Arc<dyn LLMAdapter>) -> Self {
        Self { config, llm }
    }
}

/// A file read from the multipart body. Lives only until its text is extracted.
#[derive(Debug, Clone)]
pub struct UploadedDocument {
    pub filename: String,
    pub content_type: String,
    pub content: Bytes,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, content_type: Option<&str>, content: Bytes) -> Self {
        let filename = filename.into();
        let content_type = match content_type {
            Some(declared) if !declared.is_empty() => declared.to_string(),
            _ => mime_guess::from_path(&filename)
                .first_or_octet_stream()
                .essence_str()
                .to_string(),
        };

        Self {
            filename,
            content_type,
            content,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Validated model output: a JSON object holding at least `root` and `branches`.
///
/// Nested nodes are `{ "name": ..., "branches": [...] }` but are passed
/// through exactly as the model produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MindMap(serde_json::Map<String, serde_json::Value>);

impl MindMap {
    pub(crate) fn from_validated(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }

    /// The root label, when the model returned it as a string.
    pub fn root(&self) -> Option<&str> {
        self.0.get("root").and_then(|v| v.as_str())
    }

    /// Number of top-level branches, zero when `branches` is not a list.
    pub fn branch_count(&self) -> usize {
        self.0
            .get("branches")
            .and_then(|v| v.as_array())
            .map_or(0, |branches| branches.len())
    }

    pub fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MindMapResponse {
    pub mind_map: MindMap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_type_guessed_when_missing() {
        let doc = UploadedDocument::new("notes.pdf", None, Bytes::from_static(b"%PDF"));
        assert_eq!(doc.content_type, "application/pdf");

        let doc = UploadedDocument::new("notes.txt", Some(""), Bytes::new());
        assert_eq!(doc.content_type, "text/plain");

        let doc = UploadedDocument::new("notes", None, Bytes::new());
        assert_eq!(doc.content_type, "application/octet-stream");
    }

    #[test]
    fn test_declared_content_type_kept() {
        let doc = UploadedDocument::new("notes.txt", Some("text/markdown"), Bytes::from_static(b"hi"));
        assert_eq!(doc.content_type, "text/markdown");
        assert_eq!(doc.size(), 2);
    }

    #[test]
    fn test_mind_map_serializes_transparently() {
        let value = json!({"root": "A", "branches": [{"name": "B"}]});
        let map = value.as_object().unwrap().clone();
        let mind_map = MindMap::from_validated(map);

        assert_eq!(mind_map.root(), Some("A"));
        assert_eq!(mind_map.branch_count(), 1);

        let response = MindMapResponse { mind_map };
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"mind_map": {"root": "A", "branches": [{"name": "B"}]}})
        );
    }

    #[test]
    fn test_branch_count_tolerates_non_list() {
        let map = json!({"root": "A", "branches": "none"})
            .as_object()
            .unwrap()
            .clone();
        assert_eq!(MindMap::from_validated(map).branch_count(), 0);
    }
}
