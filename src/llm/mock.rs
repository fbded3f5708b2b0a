use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LLMAdapter;
use crate::types::{AppError, AppResult, GenerationOutcome, LLMRequest, LLMResponse, TokenUsage};

/// Canned adapter that records every prompt it receives.
pub(crate) struct MockAdapter {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

#[derive(Clone)]
pub(crate) enum MockReply {
    Text(String),
    Blocked(String),
    Failure(String),
}

impl MockAdapter {
    pub(crate) fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self::new(MockReply::Text(text.to_string()))
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl LLMAdapter for MockAdapter {
    async fn generate_content(&self, request: &LLMRequest) -> AppResult<GenerationOutcome> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());

        match &self.reply {
            MockReply::Text(text) => Ok(GenerationOutcome::Completed(LLMResponse {
                content: text.clone(),
                finish_reason: "STOP".to_string(),
                usage: TokenUsage::default(),
            })),
            MockReply::Blocked(reason) => Ok(GenerationOutcome::Blocked {
                reason: reason.clone(),
            }),
            MockReply::Failure(message) => Err(AppError::Service(message.clone())),
        }
    }
}
