use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::EmbeddingConfig;

/// Maximum characters to send to the embedding API. Queries are short; the
/// cap only guards against pathological input in the `message` parameter.
const MAX_EMBED_CHARS: usize = 8_000;

/// Truncate `text` to at most `MAX_EMBED_CHARS`, splitting on a UTF-8 char boundary.
fn truncate_for_embedding(text: &str) -> &str {
    if text.len() <= MAX_EMBED_CHARS {
        return text;
    }
    // Find the last char boundary at or before the limit
    let mut end = MAX_EMBED_CHARS;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Turns query text into a fixed-length vector.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

/// Embedding client for Ollama or OpenAI-compatible APIs.
pub struct HttpEmbedder {
    client: reqwest::Client,
    config: EmbeddingConfig,
}

impl HttpEmbedder {
    pub fn new(client: reqwest::Client, config: EmbeddingConfig) -> Self {
        Self { client, config }
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = truncate_for_embedding(text).to_string();

        let embedding = match self.config.provider.as_str() {
            "ollama" => embed_ollama(&self.client, &self.config, input).await?,
            "openai" => embed_openai(&self.client, &self.config, input).await?,
            other => anyhow::bail!("Unknown embedding provider: {other}"),
        };

        if embedding.len() != self.config.dimension {
            anyhow::bail!(
                "Embedding has {} dimensions, expected {}",
                embedding.len(),
                self.config.dimension
            );
        }
        Ok(embedding)
    }
}

// ─── Ollama ──────────────────────────────────────────────

#[derive(Serialize)]
struct OllamaEmbedRequest {
    model: String,
    input: Vec<String>,
    truncate: bool,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

async fn embed_ollama(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    text: String,
) -> Result<Vec<f32>> {
    let url = format!("{}/api/embed", config.base_url);
    let req = OllamaEmbedRequest {
        model: config.model.clone(),
        input: vec![text],
        truncate: true,
    };

    let resp = client
        .post(&url)
        .json(&req)
        .send()
        .await
        .context("Failed to call Ollama embed API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("Ollama embed API returned {status}: {body}");
    }

    let body: OllamaEmbedResponse = resp
        .json()
        .await
        .context("Failed to parse Ollama embed response")?;

    body.embeddings
        .into_iter()
        .next()
        .context("No embedding returned")
}

// ─── OpenAI-compatible ───────────────────────────────────

#[derive(Serialize)]
struct OpenAiEmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct OpenAiEmbedResponse {
    data: Vec<OpenAiEmbedData>,
}

#[derive(Deserialize)]
struct OpenAiEmbedData {
    embedding: Vec<f32>,
}

async fn embed_openai(
    client: &reqwest::Client,
    config: &EmbeddingConfig,
    text: String,
) -> Result<Vec<f32>> {
    let url = format!("{}/v1/embeddings", config.base_url);
    let api_key = config.api_key.as_deref().unwrap_or_default();
    let req = OpenAiEmbedRequest {
        model: config.model.clone(),
        input: vec![text],
    };

    let resp = client
        .post(&url)
        .header("Authorization", format!("Bearer {api_key}"))
        .json(&req)
        .send()
        .await
        .context("Failed to call OpenAI embed API")?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("OpenAI embed API returned {status}: {body}");
    }

    let body: OpenAiEmbedResponse = resp
        .json()
        .await
        .context("Failed to parse OpenAI embed response")?;

    body.data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .context("No embedding returned")
}
