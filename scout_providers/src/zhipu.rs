use async_trait::async_trait;
use reqwest::Client;
use scout_core::{ChatMessage, LLMProvider, LLMResponse, Usage};
use serde_json::{Value, json};
use tracing::info;

use crate::retry::retry_with_backoff;

pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";
pub const DEFAULT_MODEL: &str = "glm-4-flash";

/// Seconds to wait after each failed attempt; kept short so retries fit in
/// the delegate timeout.
const RETRY_DELAYS: [u64; 2] = [1, 2];

/// Chat-completions client for Zhipu and other OpenAI-compatible endpoints.
pub struct ZhipuProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl ZhipuProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating ZhipuProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    /// Helper method to send a single request
    async fn try_send(&self, request: &Value) -> anyhow::Result<LLMResponse> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        parse_response(&response)
    }
}

fn parse_response(response: &Value) -> anyhow::Result<LLMResponse> {
    let content = response["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
        .to_string();

    let count = |u: &serde_json::Map<String, Value>, key: &str| {
        u32::try_from(u.get(key).and_then(Value::as_u64).unwrap_or(0)).unwrap_or(0)
    };
    let usage = response["usage"].as_object().map(|u| Usage {
        prompt_tokens: count(u, "prompt_tokens"),
        completion_tokens: count(u, "completion_tokens"),
        total_tokens: count(u, "total_tokens"),
    });

    Ok(LLMResponse { content, usage })
}

#[async_trait]
impl LLMProvider for ZhipuProvider {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse> {
        let request = json!({
            "model": model,
            "messages": messages,
        });

        info!("Sending request to chat API: model={}", model);

        let response = retry_with_backoff(|| self.try_send(&request), &RETRY_DELAYS).await?;

        info!("Received response from chat API");
        Ok(response)
    }

    fn get_default_model(&self) -> &str {
        &self.model
    }
}
