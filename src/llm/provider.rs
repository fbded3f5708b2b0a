use std::sync::Arc;

use async_trait::async_trait;

use crate::config::LLMConfig;
use crate::types::{AppError, AppResult, GenerationOutcome, LLMRequest};

#[async_trait]
pub trait LLMAdapter: Send + Sync {
    /// Send one prompt to the model service. A refusal is `Ok(Blocked)`;
    /// transport and API failures are `Err(AppError::Service)`.
    async fn generate_content(&self, request: &LLMRequest) -> AppResult<GenerationOutcome>;

    /// Model names the service offers to this credential.
    async fn list_models(&self) -> AppResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Build the adapter named by `LLM_PROVIDER`.
pub fn create_adapter(config: &LLMConfig) -> AppResult<Arc<dyn LLMAdapter>> {
    let adapter: Arc<dyn LLMAdapter> = match config.provider.as_str() {
        "google" | "gemini" => Arc::new(crate::llm::google::GoogleAdapter::from_config(config)?),
        other => {
            return Err(AppError::Internal(format!(
                "Unsupported LLM provider: {}",
                other
            )))
        }
    };

    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::collections::HashMap;

    fn llm_config(pairs: &[(&str, &str)]) -> LLMConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| vars.get(key).cloned()).unwrap().llm
    }

    #[tokio::test]
    async fn test_default_provider_is_gemini() {
        let adapter = create_adapter(&llm_config(&[])).unwrap();

        // No key configured, so the Gemini adapter refuses before any request.
        let err = adapter
            .generate_content(&LLMRequest::new("gemini-1.5-pro", "hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Service(msg) if msg.contains("GOOGLE_API_KEY")));
    }

    #[test]
    fn test_gemini_alias() {
        assert!(create_adapter(&llm_config(&[("LLM_PROVIDER", "gemini")])).is_ok());
    }

    #[test]
    fn test_unknown_provider_is_error() {
        let err = create_adapter(&llm_config(&[("LLM_PROVIDER", "openai")])).err().unwrap();
        assert!(err.to_string().contains("Unsupported LLM provider: openai"));
    }
}
