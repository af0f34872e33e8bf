//! Hosted vector index client (Pinecone data-plane API).

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::IndexConfig;
use crate::models::SearchMatch;
use crate::search::index::{DeleteSelector, IndexVector, MetadataFilter, VectorIndex};

pub struct PineconeIndex {
    client: reqwest::Client,
    host: String,
    api_key: String,
    namespace: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    vector: &'a [f32],
    top_k: usize,
    include_metadata: bool,
    include_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<SearchMatch>,
}

#[derive(Serialize)]
struct UpsertRequest<'a> {
    vectors: &'a [IndexVector],
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpsertResponse {
    upserted_count: usize,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<&'a [String]>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    delete_all: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<&'a str>,
}

impl PineconeIndex {
    pub fn new(client: reqwest::Client, host: String, api_key: String, namespace: Option<String>) -> Self {
        Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            api_key,
            namespace,
        }
    }

    pub fn from_config(client: reqwest::Client, config: &IndexConfig) -> Result<Self> {
        let host = config
            .host
            .clone()
            .context("Vector index host is not configured")?;
        Ok(Self::new(
            client,
            host,
            config.api_key.clone().unwrap_or_default(),
            config.namespace.clone(),
        ))
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<reqwest::Response> {
        let url = format!("{}{path}", self.host);
        tracing::debug!("POST vector index {path}");

        let resp = self
            .client
            .post(&url)
            .header("Api-Key", &self.api_key)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to call vector index {path}"))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Vector index {path} returned {status}: {body}");
        }
        Ok(resp)
    }
}

#[async_trait]
impl VectorIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchMatch>> {
        let req = QueryRequest {
            vector,
            top_k,
            include_metadata: true,
            include_values: false,
            filter: filter.filter(|f| !f.is_empty()).map(MetadataFilter::to_json),
            namespace: self.namespace.as_deref(),
        };

        let body: QueryResponse = self
            .post("/query", &req)
            .await?
            .json()
            .await
            .context("Failed to parse vector index query response")?;

        Ok(body.matches)
    }

    async fn upsert(&self, vectors: Vec<IndexVector>) -> Result<usize> {
        if vectors.is_empty() {
            return Ok(0);
        }
        let req = UpsertRequest {
            vectors: &vectors,
            namespace: self.namespace.as_deref(),
        };

        let body: UpsertResponse = self
            .post("/vectors/upsert", &req)
            .await?
            .json()
            .await
            .context("Failed to parse vector index upsert response")?;

        Ok(body.upserted_count)
    }

    async fn delete(&self, selector: DeleteSelector) -> Result<()> {
        let mut req = DeleteRequest {
            namespace: self.namespace.as_deref(),
            ..Default::default()
        };
        match &selector {
            DeleteSelector::Ids(ids) => req.ids = Some(ids.as_slice()),
            DeleteSelector::Filter(filter) => req.filter = Some(filter.to_json()),
            DeleteSelector::All => req.delete_all = true,
        }

        self.post("/vectors/delete", &req).await?;
        Ok(())
    }
}
