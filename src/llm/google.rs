// Google Gemini adapter
// API Reference: https://ai.google.dev/api/generate-content

use crate::config::LLMConfig;
use crate::llm::provider::LLMAdapter;
use crate::types::{
    AppError, AppResult, GenerationConfig, GenerationOutcome, LLMRequest, LLMResponse,
    SafetySetting, TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct GoogleAdapter {
    client: Client,
    api_key: Option<String>,
    api_base: String,
}

// Request types for the generateContent API
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    contents: Vec<GeminiRequestContent<'a>>,
    generation_config: GeminiGenerationConfig,
    safety_settings: &'a [SafetySetting],
}

#[derive(Serialize)]
struct GeminiRequestContent<'a> {
    role: &'static str,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

impl From<&GenerationConfig> for GeminiGenerationConfig {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

// Response types
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    prompt_feedback: Option<GeminiPromptFeedback>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    block_reason: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct GeminiUsage {
    prompt_token_count: u32,
    candidates_token_count: u32,
    total_token_count: u32,
}

#[derive(Deserialize)]
struct GeminiErrorResponse {
    error: GeminiError,
}

#[derive(Deserialize)]
struct GeminiError {
    message: String,
    status: Option<String>,
}

#[derive(Deserialize)]
struct GeminiModelList {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Deserialize)]
struct GeminiModel {
    name: String,
}

impl GoogleAdapter {
    /// Adapter with the configured endpoint and request timeout.
    pub fn from_config(config: &LLMConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config.google_api_key.clone(),
            api_base: config.api_base.clone(),
        })
    }

    fn api_key(&self) -> AppResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| AppError::Service("GOOGLE_API_KEY is not configured".to_string()))
    }

    fn build_request_body(request: &LLMRequest) -> GeminiRequest<'_> {
        GeminiRequest {
            contents: vec![GeminiRequestContent {
                role: "user",
                parts: vec![GeminiRequestPart {
                    text: &request.prompt,
                }],
            }],
            generation_config: GeminiGenerationConfig::from(&request.generation),
            safety_settings: &request.safety_settings,
        }
    }

    /// Map a decoded reply onto text, a block, or a service error.
    fn interpret_response(response: GeminiResponse) -> AppResult<GenerationOutcome> {
        if let Some(reason) = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Ok(GenerationOutcome::Blocked { reason });
        }

        let candidate = match response.candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => {
                return Ok(GenerationOutcome::Blocked {
                    reason: "SAFETY".to_string(),
                })
            }
        };

        let finish_reason = candidate
            .finish_reason
            .unwrap_or_else(|| "STOP".to_string());
        let content: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if content.is_empty() {
            if finish_reason == "SAFETY" {
                return Ok(GenerationOutcome::Blocked {
                    reason: finish_reason,
                });
            }
            return Err(AppError::Service(format!(
                "Gemini returned no text (finish reason: {})",
                finish_reason
            )));
        }

        let usage = response.usage_metadata.unwrap_or_default();
        Ok(GenerationOutcome::Completed(LLMResponse {
            content,
            finish_reason,
            usage: TokenUsage {
                prompt_tokens: usage.prompt_token_count,
                completion_tokens: usage.candidates_token_count,
                total_tokens: usage.total_token_count,
            },
        }))
    }

    async fn error_from_response(response: reqwest::Response) -> AppError {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();

        if let Ok(error_response) = serde_json::from_str::<GeminiErrorResponse>(&error_text) {
            return AppError::Service(format!(
                "Gemini API error ({}): {} (status: {})",
                status,
                error_response.error.message,
                error_response.error.status.as_deref().unwrap_or("unknown")
            ));
        }

        AppError::Service(format!("Gemini API error ({}): {}", status, error_text))
    }

    fn transport_error(e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            AppError::Service(format!("Gemini request timed out: {}", e))
        } else {
            AppError::Service(format!("Gemini request failed: {}", e))
        }
    }

    // The client timeout also covers reading the body.
    fn decode_error(what: &str, e: reqwest::Error) -> AppError {
        if e.is_timeout() {
            Self::transport_error(e)
        } else {
            AppError::Service(format!("Failed to parse Gemini {}: {}", what, e))
        }
    }
}

#[async_trait]
impl LLMAdapter for GoogleAdapter {
    async fn generate_content(&self, request: &LLMRequest) -> AppResult<GenerationOutcome> {
        let url = format!("{}/models/{}:generateContent", self.api_base, request.model);
        let body = Self::build_request_body(request);

        info!(model = %request.model, prompt_chars = request.prompt.len(), "Sending Gemini request");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                Self::transport_error(e)
            })?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| Self::decode_error("response", e))?;

        info!("Received response from Gemini API");
        let outcome = Self::interpret_response(gemini_response)?;
        if let GenerationOutcome::Completed(reply) = &outcome {
            debug!(
                finish_reason = %reply.finish_reason,
                total_tokens = reply.usage.total_tokens,
                "Gemini reply decoded"
            );
        }
        Ok(outcome)
    }

    /// Names of the models visible to this API key (first page only).
    async fn list_models(&self) -> AppResult<Vec<String>> {
        let url = format!("{}/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .header(API_KEY_HEADER, self.api_key()?)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let list: GeminiModelList = response
            .json()
            .await
            .map_err(|e| Self::decode_error("model list", e))?;

        Ok(list.models.into_iter().map(|m| m.name).collect())
    }
}
