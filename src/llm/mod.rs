//! Embedding provider clients.

pub mod embeddings;
