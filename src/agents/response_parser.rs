//! Pulls the mind map JSON out of a free-form model reply.
//!
//! This is string splitting, not Markdown parsing. The first `` ```json ``
//! fence anywhere in the reply wins; failing that, the first untagged fence
//! pair; failing that, the whole reply. Only the first block is looked at,
//! anything after its closing fence is dropped, and an unclosed fence runs to
//! the end of the reply. Nested nodes are not validated.

use serde_json::Value;
use tracing::{debug, error};

use crate::models::MindMap;
use crate::types::{AppError, AppResult};
use crate::utils::truncate_for_log;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    JsonFence,
    Fence,
    Raw,
}

/// Locate the candidate JSON text inside `reply`.
pub fn extract_candidate(reply: &str) -> (&str, CandidateSource) {
    if let Some(start) = reply.find(JSON_FENCE) {
        let body = &reply[start + JSON_FENCE.len()..];
        return (until_fence(body), CandidateSource::JsonFence);
    }

    if let Some(start) = reply.find(FENCE) {
        let body = &reply[start + FENCE.len()..];
        return (until_fence(body), CandidateSource::Fence);
    }

    (reply, CandidateSource::Raw)
}

fn until_fence(body: &str) -> &str {
    body.find(FENCE).map_or(body, |end| &body[..end])
}

/// Parse and shape-check the model reply.
pub fn parse_mind_map(reply: &str) -> AppResult<MindMap> {
    let (candidate, source) = extract_candidate(reply);
    debug!(source = ?source, "Located JSON candidate in model reply");

    let candidate = candidate.trim();
    let value: Value = serde_json::from_str(candidate).map_err(|e| {
        error!(error = %e, "Failed to parse AI response as JSON");
        debug!(candidate = truncate_for_log(candidate), "Failed JSON string");
        AppError::MalformedResponse {
            message: e.to_string(),
            raw: candidate.to_string(),
        }
    })?;

    validate(value)
}

fn validate(value: Value) -> AppResult<MindMap> {
    let map = match value {
        Value::Object(map) => map,
        other => {
            error!("Invalid mind map structure received");
            return Err(AppError::InvalidStructure(format!(
                "expected a JSON object, got {}",
                json_type_name(&other)
            )));
        }
    };

    for key in ["root", "branches"] {
        if !map.contains_key(key) {
            error!(missing = key, "Invalid mind map structure received");
            return Err(AppError::InvalidStructure(format!("missing `{}` key", key)));
        }
    }

    Ok(MindMap::from_validated(map))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
