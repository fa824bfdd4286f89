//! OpenAI embedding provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};
use crate::providers::embedding::EmbeddingProvider;

/// OpenAI-compatible embeddings client, one input per request
#[derive(Debug)]
pub struct OpenAiEmbedder {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    max_input_chars: usize,
    dimensions: usize,
}

impl OpenAiEmbedder {
    /// Create a new embedder from configuration
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::config("embedding API key is not set"));
        }

        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: format!("{}/embeddings", config.api_base.trim_end_matches('/')),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_input_chars: config.max_input_chars,
            dimensions: config.dimensions,
        })
    }

    /// Normalize newlines to spaces and silently truncate to the configured
    /// input ceiling. Truncation is policy, not an error.
    fn prepare_input(&self, text: &str) -> String {
        let normalized = text.replace(['\n', '\r'], " ");
        match normalized.char_indices().nth(self.max_input_chars) {
            Some((cut, _)) => normalized[..cut].to_string(),
            None => normalized,
        }
    }
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingProvider for OpenAiEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(Error::invalid_input("embedding input is empty"));
        }

        let input = self.prepare_input(text);
        let request = EmbeddingRequest {
            model: &self.model,
            input: &input,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::EmbeddingHttp { status, body });
        }

        let parsed: EmbeddingResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => return Err(Error::malformed_response(e.to_string())),
        };

        let vector = parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| Error::malformed_response("response contains no embedding data"))?;

        if vector.is_empty() {
            return Err(Error::malformed_response("embedding vector is empty"));
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn embedder_for(server: &MockServer) -> OpenAiEmbedder {
        OpenAiEmbedder::new(&EmbeddingConfig {
            api_base: server.uri(),
            api_key: "sk-test".to_string(),
            ..EmbeddingConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_successful_embedding() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [0.25, -0.5, 1.0], "index": 0 }],
                "model": "text-embedding-ada-002",
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let vector = embedder.embed("some chunk text").await.unwrap();
        assert_eq!(vector, vec![0.25, -0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_input_truncated_and_newline_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{ "embedding": [0.0], "index": 0 }],
            })))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        // 10,000 chars with newlines; must be submitted as <= 8,191 chars
        // with every newline replaced by a space
        let long_input = "a\n".repeat(5000);
        embedder.embed(&long_input).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let submitted = body["input"].as_str().unwrap();
        assert!(submitted.chars().count() <= 8191);
        assert!(!submitted.contains('\n'));
        assert_eq!(body["model"], "text-embedding-ada-002");
    }

    #[tokio::test]
    async fn test_provider_error_carries_status_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.embed("text").await.unwrap_err();
        match err {
            Error::EmbeddingHttp { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "upstream exploded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_data_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "object": "list" })),
            )
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.embed("text").await.unwrap_err();
        assert!(matches!(err, Error::MalformedEmbeddingResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_data_is_malformed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embeddings"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })),
            )
            .mount(&server)
            .await;

        let embedder = embedder_for(&server);
        let err = embedder.embed("text").await.unwrap_err();
        assert!(matches!(err, Error::MalformedEmbeddingResponse(_)));
    }

    #[tokio::test]
    async fn test_empty_input_rejected_before_any_call() {
        let server = MockServer::start().await;
        let embedder = embedder_for(&server);

        let err = embedder.embed("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidEmbeddingInput(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let err = OpenAiEmbedder::new(&EmbeddingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
