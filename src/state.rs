use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::llm::embeddings::{Embedder, HttpEmbedder};
use crate::search::enrich::SemanticEnricher;
use crate::search::index::VectorIndex;
use crate::search::pinecone::PineconeIndex;
use crate::search::vector::LocalIndex;
use crate::upstream::{SportsData, SportsDataClient};

/// Shared application state. Every outbound collaborator is injected here at
/// startup; handlers never reach for globals.
#[derive(Clone)]
pub struct AppState {
    pub bearer_token: Arc<str>,
    pub sports: Arc<dyn SportsData>,
    pub enricher: SemanticEnricher,
}

impl AppState {
    pub fn new(
        bearer_token: impl Into<Arc<str>>,
        sports: Arc<dyn SportsData>,
        embedder: Arc<dyn Embedder>,
        index: Arc<dyn VectorIndex>,
    ) -> Self {
        Self {
            bearer_token: bearer_token.into(),
            sports,
            enricher: SemanticEnricher::new(embedder, index),
        }
    }

    /// Build the production collaborators described by `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let http_client = http_client(config)?;

        let sports = Arc::new(SportsDataClient::new(
            http_client.clone(),
            config.sports.clone(),
        ));
        let embedder = Arc::new(HttpEmbedder::new(
            http_client.clone(),
            config.embedding.clone(),
        ));
        let index: Arc<dyn VectorIndex> = match config.index.provider.as_str() {
            "local" => {
                let local = LocalIndex::open_or_create(&config.local_index_path())?;
                tracing::info!("Local vector index loaded with {} entries", local.entry_count());
                Arc::new(local)
            }
            _ => Arc::new(PineconeIndex::from_config(http_client, &config.index)?),
        };

        Ok(Self::new(
            config.bearer_token.as_str(),
            sports,
            embedder,
            index,
        ))
    }
}

/// One outbound client shared by every provider, bounded by the configured
/// connect and total timeouts.
fn http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .timeout(Duration::from_secs(config.outbound_timeout_secs))
        .build()?;
    Ok(client)
}
