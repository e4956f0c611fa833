//! Embedding provider boundary.
//!
//! Providers convert text into dense vector representations for similarity
//! search. The only production implementation is [`OllamaProvider`], which
//! talks to a local Ollama-compatible HTTP API; [`MockProvider`] serves
//! tests with deterministic vectors and scripted failures.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ProviderError;

// ─────────────────────────────────────────────────────────────────────────────
// EmbeddingProvider Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Trait for generating text embeddings.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Lightweight liveness probe. An unreachable provider is an expected
    /// condition, not an error.
    async fn is_available(&self) -> bool;

    /// Generate an embedding for a non-empty text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError>;

    /// Model identifier used for embedding requests.
    fn model(&self) -> &str;
}

/// A shared provider handle that can be used across tasks.
pub type SharedProvider = Arc<dyn EmbeddingProvider>;

// ─────────────────────────────────────────────────────────────────────────────
// Ollama Provider
// ─────────────────────────────────────────────────────────────────────────────

/// Configuration for the Ollama provider.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the API.
    pub base_url: String,
    /// Model to use for embeddings.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "nomic-embed-text".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl OllamaConfig {
    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Ollama embeddings API client.
pub struct OllamaProvider {
    client: Client,
    config: OllamaConfig,
}

impl OllamaProvider {
    /// Create a new Ollama provider.
    pub fn new(config: OllamaConfig) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.config.base_url)
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.config.base_url)
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaProvider {
    async fn is_available(&self) -> bool {
        match self.client.get(self.tags_url()).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Embedding provider probe failed: {}", e);
                false
            }
        }
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if text.is_empty() {
            return Err(ProviderError::EmptyInput);
        }

        let request = EmbedRequest {
            model: self.config.model.clone(),
            prompt: text.to_string(),
        };

        let response = self
            .client
            .post(self.embeddings_url())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Backend { status, body });
        }

        let result: EmbedResponse = response.json().await?;

        if result.embedding.is_empty() {
            return Err(ProviderError::EmptyEmbedding);
        }

        Ok(result.embedding)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, serde::Serialize)]
struct EmbedRequest {
    model: String,
    prompt: String,
}

#[derive(Debug, serde::Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Mock Provider
// ─────────────────────────────────────────────────────────────────────────────

/// A mock provider for testing purposes.
///
/// Generates deterministic unit vectors from a text hash, so the same text
/// always produces the same embedding. Specific responses and failures can
/// be scripted per text, and the whole provider can be taken offline.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    dimensions: usize,
    offline: bool,
    canned: HashMap<String, Vec<f32>>,
    fail_on: Vec<String>,
}

impl MockProvider {
    /// Create a new mock provider with the specified dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    /// Create a mock provider whose liveness probe always fails.
    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    /// Return a fixed vector for a specific text.
    pub fn with_response(mut self, text: impl Into<String>, embedding: Vec<f32>) -> Self {
        self.canned.insert(text.into(), embedding);
        self
    }

    /// Fail embed calls for a specific text.
    pub fn failing_on(mut self, text: impl Into<String>) -> Self {
        self.fail_on.push(text.into());
        self
    }
}

#[async_trait]
impl EmbeddingProvider for MockProvider {
    async fn is_available(&self) -> bool {
        !self.offline
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        if text.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        if self.fail_on.iter().any(|t| t == text) {
            return Err(ProviderError::Backend {
                status: 500,
                body: "scripted mock failure".to_string(),
            });
        }
        if let Some(canned) = self.canned.get(text) {
            return Ok(canned.clone());
        }

        // Deterministic pseudo-random unit vector seeded by the text hash.
        let mut state = simple_hash(text);
        let mut embedding = vec![0.0f32; self.dimensions];
        for value in &mut embedding {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            *value = ((state >> 16) as f32 / 32768.0) - 1.0;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for x in &mut embedding {
                *x /= norm;
            }
        }

        Ok(embedding)
    }

    fn model(&self) -> &str {
        "mock"
    }
}

/// Simple hash function for deterministic embedding generation.
fn simple_hash(s: &str) -> u64 {
    let mut hash: u64 = 5381;
    for byte in s.bytes() {
        hash = hash.wrapping_mul(33).wrapping_add(byte as u64);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_provider_deterministic() {
        let provider = MockProvider::new(16);

        let e1 = provider.embed("test text").await.unwrap();
        let e2 = provider.embed("test text").await.unwrap();
        assert_eq!(e1, e2);
        assert_eq!(e1.len(), 16);

        // Unit length after normalization.
        let norm: f32 = e1.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 0.001);
    }

    #[tokio::test]
    async fn test_mock_provider_different_texts() {
        let provider = MockProvider::new(16);

        let e1 = provider.embed("hello").await.unwrap();
        let e2 = provider.embed("world").await.unwrap();
        assert_ne!(e1, e2);
    }

    #[tokio::test]
    async fn test_mock_provider_scripting() {
        let provider = MockProvider::new(4)
            .with_response("query", vec![1.0, 0.0])
            .failing_on("bad");

        assert_eq!(provider.embed("query").await.unwrap(), vec![1.0, 0.0]);
        assert!(matches!(
            provider.embed("bad").await,
            Err(ProviderError::Backend { .. })
        ));
        assert!(provider.is_available().await);
        assert!(!MockProvider::offline().is_available().await);
    }

    #[tokio::test]
    async fn test_empty_input_rejected() {
        let provider = MockProvider::new(4);
        assert!(matches!(
            provider.embed("").await,
            Err(ProviderError::EmptyInput)
        ));
    }

    #[test]
    fn test_ollama_config_builder() {
        let config = OllamaConfig::default()
            .with_base_url("http://custom:11434")
            .with_model("all-minilm")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://custom:11434");
        assert_eq!(config.model, "all-minilm");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_ollama_config_defaults() {
        let config = OllamaConfig::default();
        assert_eq!(config.base_url, "http://localhost:11434");
        assert_eq!(config.model, "nomic-embed-text");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
