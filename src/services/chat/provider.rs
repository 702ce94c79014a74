//! Text-generation backends for the assistant.

use crate::services::config::ChatConfig;
use crate::types::errors::ClosetError;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Sampling settings for one generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl From<&ChatConfig> for GenerationOptions {
    fn from(config: &ChatConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait ChatProvider: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ClosetError>;

    /// Cheap reachability and credentials check.
    async fn ping(&self) -> Result<(), ClosetError>;
}

/// Gemini `generateContent` over HTTPS.
pub struct HttpChatProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl HttpChatProvider {
    pub fn new(
        api_key: String,
        base_url: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, ClosetError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClosetError::Chat(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ClosetError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ClosetError::Config("chat API key is not configured".into()))?;
        Self::new(
            api_key,
            config.base_url.clone(),
            config.model.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn model_url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Text of the first part of the first candidate, if any.
pub(crate) fn extract_text(response: GenerateResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
}

async fn error_for_status(res: reqwest::Response) -> Result<reqwest::Response, ClosetError> {
    if res.status().is_success() {
        return Ok(res);
    }
    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    Err(ClosetError::Chat(format!("API error {status}: {text}")))
}

impl ChatProvider for HttpChatProvider {
    async fn generate(
        &self,
        prompt: &str,
        options: GenerationOptions,
    ) -> Result<String, ClosetError> {
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        };

        let res = self
            .client
            .post(format!("{}:generateContent", self.model_url()))
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ClosetError::Chat(format!("HTTP request failed: {e}")))?;

        let body: GenerateResponse = error_for_status(res)
            .await?
            .json()
            .await
            .map_err(|e| ClosetError::Chat(format!("Failed to parse JSON response: {e}")))?;

        extract_text(body).ok_or_else(|| ClosetError::Chat("No candidates in response".into()))
    }

    async fn ping(&self) -> Result<(), ClosetError> {
        let res = self
            .client
            .get(self.model_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| ClosetError::Chat(format!("HTTP request failed: {e}")))?;
        error_for_status(res).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
