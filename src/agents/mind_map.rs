//! Mind Map Agent
//!
//! Turns extracted document text into a validated mind map:
//! blank-text guard, prompt, one model call, block check, parse.

use crate::agents::prompt::build_prompt;
use crate::agents::response_parser::parse_mind_map;
use crate::config::LLMConfig;
use crate::llm::LLMAdapter;
use crate::models::MindMap;
use crate::types::{AppError, AppResult, GenerationOutcome, LLMRequest};
use crate::utils::truncate_for_log;
use tracing::{debug, error, info, warn};

pub struct MindMapAgent;

impl MindMapAgent {
    pub async fn generate(
        text: &str,
        llm: &dyn LLMAdapter,
        config: &LLMConfig,
    ) -> AppResult<MindMap> {
        if text.trim().is_empty() {
            warn!("Empty text provided to mind map generation");
            return Err(AppError::EmptyInput);
        }

        info!(text_len = text.len(), "Starting mind map generation");
        debug!(sample = truncate_for_log(text), "Using prompt template with text sample");

        let request = LLMRequest::new(&config.model, build_prompt(text));

        let reply = match llm.generate_content(&request).await? {
            GenerationOutcome::Blocked { reason } => {
                error!(reason = %reason, "Content blocked by model service");
                return Err(AppError::ContentBlocked(reason));
            }
            GenerationOutcome::Completed(reply) => reply,
        };
        debug!(reply = truncate_for_log(&reply.content), "Raw model reply");

        let mind_map = parse_mind_map(&reply.content)?;
        info!(
            root = mind_map.root().unwrap_or("<non-string>"),
            branches = mind_map.branch_count(),
            "Successfully generated mind map"
        );

        Ok(mind_map)
    }
}
