use anyhow::bail;
use std::path::PathBuf;

/// Upper bound for any outbound request timeout, in seconds.
const MAX_OUTBOUND_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address
    pub bind_addr: String,
    /// Static token every inbound request must present as `Authorization: Bearer ...`
    pub bearer_token: String,
    /// Where the local vector index keeps its data
    pub data_dir: PathBuf,
    /// Sports-data REST provider
    pub sports: SportsConfig,
    /// Embedding provider
    pub embedding: EmbeddingConfig,
    /// Vector-index provider
    pub index: IndexConfig,
    /// Total timeout applied to every outbound call
    pub outbound_timeout_secs: u64,
    /// Connect timeout applied to every outbound call
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SportsConfig {
    /// Base URL, including the league prefix (e.g. ".../v3/nba")
    pub base_url: String,
    /// Subscription key, sent as the `key` query parameter
    pub api_key: String,
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    /// "openai" or "ollama"
    pub provider: String,
    /// Base URL for the embedding API
    pub base_url: String,
    /// Embedding model name
    pub model: String,
    /// API key (only needed for cloud providers)
    pub api_key: Option<String>,
    /// Expected embedding vector dimension
    pub dimension: usize,
}

#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// "pinecone" or "local"
    pub provider: String,
    /// Index host, e.g. "https://games-abc123.svc.us-east1-gcp.pinecone.io"
    pub host: Option<String>,
    pub api_key: Option<String>,
    pub namespace: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8000".to_string(),
            bearer_token: String::new(),
            data_dir: PathBuf::from("./data"),
            sports: SportsConfig::default(),
            embedding: EmbeddingConfig::default(),
            index: IndexConfig::default(),
            outbound_timeout_secs: 15,
            connect_timeout_secs: 5,
        }
    }
}

impl Default for SportsConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.sportsdata.io/v3/nba".to_string(),
            api_key: String::new(),
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com".to_string(),
            model: "text-embedding-ada-002".to_string(),
            api_key: None,
            dimension: 1536,
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            provider: "pinecone".to_string(),
            host: None,
            api_key: None,
            namespace: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source. `from_env` is the
    /// production entry point; tests pass a map.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = lookup("COURTSIDE_BIND_ADDR") {
            config.bind_addr = addr;
        }
        if let Some(token) = lookup("BEARER_TOKEN") {
            config.bearer_token = token;
        }
        if let Some(dir) = lookup("COURTSIDE_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("SPORTSDATA_BASE_URL") {
            config.sports.base_url = url;
        }
        if let Some(key) = lookup("SPORTSDATA_API_KEY") {
            config.sports.api_key = key;
        }

        if let Some(provider) = lookup("EMBEDDING_PROVIDER") {
            config.embedding.provider = provider;
        }
        if let Some(url) = lookup("EMBEDDING_BASE_URL") {
            config.embedding.base_url = url;
        }
        if let Some(model) = lookup("EMBEDDING_MODEL") {
            config.embedding.model = model;
        }
        if let Some(key) = lookup("EMBEDDING_API_KEY") {
            config.embedding.api_key = Some(key);
        }
        if let Some(dim) = lookup("EMBEDDING_DIM") {
            if let Ok(d) = dim.parse() {
                config.embedding.dimension = d;
            }
        }

        if let Some(provider) = lookup("VECTOR_INDEX_PROVIDER") {
            config.index.provider = provider;
        }
        if let Some(host) = lookup("VECTOR_INDEX_HOST") {
            config.index.host = Some(host);
        }
        if let Some(key) = lookup("VECTOR_INDEX_API_KEY") {
            config.index.api_key = Some(key);
        }
        if let Some(ns) = lookup("VECTOR_INDEX_NAMESPACE") {
            config.index.namespace = Some(ns);
        }

        if let Some(val) = lookup("OUTBOUND_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.outbound_timeout_secs = v.min(MAX_OUTBOUND_TIMEOUT_SECS);
            }
        }
        if let Some(val) = lookup("OUTBOUND_CONNECT_TIMEOUT_SECS") {
            if let Ok(v) = val.parse::<u64>() {
                config.connect_timeout_secs = v.min(MAX_OUTBOUND_TIMEOUT_SECS);
            }
        }

        config
    }

    /// Check that every value the service cannot run without is present.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bearer_token.is_empty() {
            bail!("BEARER_TOKEN must be set");
        }
        if self.sports.api_key.is_empty() {
            bail!("SPORTSDATA_API_KEY must be set");
        }
        match self.index.provider.as_str() {
            "pinecone" if self.index.host.is_none() => {
                bail!("VECTOR_INDEX_HOST must be set when VECTOR_INDEX_PROVIDER=pinecone")
            }
            "pinecone" | "local" => {}
            other => bail!("Unknown vector index provider: {other}"),
        }
        match self.embedding.provider.as_str() {
            "openai" | "ollama" => Ok(()),
            other => bail!("Unknown embedding provider: {other}"),
        }
    }

    pub fn local_index_path(&self) -> PathBuf {
        self.data_dir.join("vectors.json")
    }
}
