//! Gemini client behind a trait so handlers can be exercised with a canned fake.

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error};

use crate::config::GeminiConfig;

#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Sends an image plus an instruction prompt, returns the raw model text.
    async fn generate_from_image(
        &self,
        prompt: &str,
        image: Bytes,
        mime: &str,
    ) -> anyhow::Result<String>;

    /// Sends a text-only prompt, returns the raw model text.
    async fn generate_from_text(&self, prompt: &str) -> anyhow::Result<String>;
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        )
    }

    async fn generate(&self, parts: serde_json::Value) -> anyhow::Result<String> {
        let body = json!({
            "contents": [{ "parts": parts }],
            "generationConfig": {
                "temperature": 0,
                "topK": 10,
                "topP": 0.3,
                "maxOutputTokens": 512
            }
        });

        debug!(model = %self.config.model, "calling gemini");
        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            error!(%status, body = %text, "gemini returned an error");
            anyhow::bail!("gemini returned {status}");
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)?;
        let reply = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        Ok(reply)
    }
}

#[async_trait]
impl AssistantClient for GeminiClient {
    async fn generate_from_image(
        &self,
        prompt: &str,
        image: Bytes,
        mime: &str,
    ) -> anyhow::Result<String> {
        let encoded = base64::engine::general_purpose::STANDARD.encode(&image);
        let parts = json!([
            { "inline_data": { "mime_type": mime, "data": encoded } },
            { "text": prompt }
        ]);
        self.generate(parts).await
    }

    async fn generate_from_text(&self, prompt: &str) -> anyhow::Result<String> {
        self.generate(json!([{ "text": prompt }])).await
    }
}

/// Test double returning a fixed reply.
pub struct FakeAssistant {
    pub reply: String,
}

impl FakeAssistant {
    pub fn new(reply: impl Into<String>) -> Self {
        Self { reply: reply.into() }
    }
}

#[async_trait]
impl AssistantClient for FakeAssistant {
    async fn generate_from_image(
        &self,
        _prompt: &str,
        _image: Bytes,
        _mime: &str,
    ) -> anyhow::Result<String> {
        Ok(self.reply.clone())
    }

    async fn generate_from_text(&self, _prompt: &str) -> anyhow::Result<String> {
        Ok(self.reply.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parsing_takes_first_candidate_text() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "[{\"category\":\"Food\"}]"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        assert!(text.starts_with("[{"));
    }

    #[test]
    fn response_parsing_tolerates_empty_candidates() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.candidates.is_empty());
    }

    #[tokio::test]
    async fn fake_assistant_returns_canned_reply() {
        let fake = FakeAssistant::new("hello");
        assert_eq!(fake.generate_from_text("anything").await.unwrap(), "hello");
        assert_eq!(
            fake.generate_from_image("p", Bytes::from_static(b"img"), "image/png")
                .await
                .unwrap(),
            "hello"
        );
    }
}
