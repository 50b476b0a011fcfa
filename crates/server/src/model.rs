//! Model backends for the serving adapter

use crate::error::ServerError;
use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

/// A summarization model reachable from the serving adapter.
#[async_trait]
pub trait SummaryModel: Send + Sync {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ServerError>;
}

/// Client for an OpenAI-compatible chat-completions endpoint, the surface
/// most local inference servers expose.
pub struct OpenAiCompatModel {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model_id: String,
    temperature: f32,
}

impl OpenAiCompatModel {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        model_id: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            model_id: model_id.into(),
            temperature,
        }
    }
}

#[async_trait]
impl SummaryModel for OpenAiCompatModel {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String, ServerError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        debug!("Requesting completion from {}", url);

        let body = json!({
            "model": self.model_id,
            "temperature": self.temperature,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServerError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServerError::Backend(format!(
                "upstream returned {}",
                status
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ServerError::Backend(e.to_string()))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ServerError::Backend("missing completion content".to_string()))
    }
}

/// Backend that returns a canned completion; used in tests and dry runs.
pub struct StaticModel(pub String);

#[async_trait]
impl SummaryModel for StaticModel {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, ServerError> {
        Ok(self.0.clone())
    }
}
