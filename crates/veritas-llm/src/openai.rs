use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::instrument;

use veritas_core::errors::ServiceError;
use veritas_core::provider::{CompletionRequest, GenerationService};
use veritas_core::security::ApiKey;

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o-mini";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Non-streaming chat-completion client.
pub struct ChatCompleter {
    client: Client,
    api_key: ApiKey,
    model: String,
}

impl ChatCompleter {
    pub fn new(api_key: ApiKey, model: Option<&str>) -> Self {
        Self {
            client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            api_key,
            model: model.unwrap_or(DEFAULT_MODEL).to_string(),
        }
    }
}

#[async_trait]
impl GenerationService for ChatCompleter {
    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ServiceError> {
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": request.system },
                { "role": "user", "content": request.user },
            ],
            "temperature": request.temperature,
            "max_tokens": request.max_tokens,
        });

        let resp = self
            .client
            .post(API_URL)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.0.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| ServiceError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(ServiceError::from_status(status, body));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ServiceError::MalformedResponse(e.to_string()))?;

        payload["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| {
                ServiceError::MalformedResponse("missing choices[0].message.content".into())
            })
    }
}
