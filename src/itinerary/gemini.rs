//! Gemini `generateContent` client

use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use super::{GenerationError, TextGenerator};
use crate::config::GenerativeConfig;

pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize, Debug)]
struct PartResponse {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
        (!text.is_empty()).then_some(text)
    }
}

impl GeminiClient {
    /// Fails when the configuration carries no API key
    pub fn new(config: &GenerativeConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| anyhow!("Generative-text API key missing"))?;

        let client = Client::builder()
            .user_agent(concat!("itinerary-planner/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create generative HTTP client")?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(&self.api_key)
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    #[instrument(skip_all, fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        info!("Generating a personalized itinerary");
        let start_time = Instant::now();

        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Generative API returned {}", status);
            return Err(match status.as_u16() {
                code @ (401 | 403) => GenerationError::Unauthorized { status: code },
                429 => GenerationError::RateLimited,
                code => GenerationError::Status { status: code, body },
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerationError::Transport(e.without_url().to_string()))?;
        let payload: GenerateContentResponse = serde_json::from_slice(&bytes)
            .map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;

        let text = payload.into_text().ok_or(GenerationError::EmptyResponse)?;

        debug!(
            "Itinerary of {} bytes generated in {:.3}s",
            text.len(),
            start_time.elapsed().as_secs_f64()
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-2.5-flash-preview-05-20:generateContent";

    fn client_for(server_uri: &str) -> GeminiClient {
        let config = GenerativeConfig {
            api_key: Some("gemini-key".to_string()),
            base_url: server_uri.to_string(),
            ..GenerativeConfig::default()
        };
        GeminiClient::new(&config).expect("client")
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(GeminiClient::new(&GenerativeConfig::default()).is_err());
    }

    #[tokio::test]
    async fn test_generate_concatenates_parts() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(query_param("key", "gemini-key"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{"parts": [{"text": "plan my trip"}]}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "# Day 1\n"}, {"text": "## Morning"}]
                    },
                    "finishReason": "STOP"
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let text = client.generate("plan my trip").await.unwrap();

        assert_eq!(text, "# Day 1\n## Morning");
    }

    #[tokio::test]
    async fn test_no_candidates_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "promptFeedback": {"blockReason": "SAFETY"}
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client.generate("plan my trip").await;

        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_status_codes_are_classified() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client.generate("plan my trip").await;
        assert!(matches!(result, Err(GenerationError::RateLimited)));
    }

    #[tokio::test]
    async fn test_forbidden_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(403))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client.generate("plan my trip").await;
        assert!(matches!(result, Err(GenerationError::Unauthorized { status: 403 })));
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let result = client.generate("plan my trip").await;
        assert!(matches!(result, Err(GenerationError::MalformedResponse(_))));
    }
}
