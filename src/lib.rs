//! # courtside
//!
//! An authenticated HTTP service that proxies a sports-statistics REST API
//! and, when the caller supplies free text, enriches the answer with a
//! semantic search over a vector index.
//!
//! ## Request flow
//!
//! ```text
//!        GET /games?day=..&message=..   (Authorization: Bearer ..)
//!                        │
//!                 ┌──────┴──────┐
//!                 │ bearer check│──── 401, no outbound call
//!                 └──────┬──────┘
//!            ┌───────────┴───────────┐
//!            ▼                       ▼
//!   ┌─────────────────┐     ┌──────────────────┐
//!   │ Upstream fetch  │     │ Embed message    │  (skipped when no message)
//!   │ sports data API │     │ → top-10 query   │
//!   └────────┬────────┘     │   vector index   │
//!            │              └────────┬─────────┘
//!            ▼                       │
//!   ┌─────────────────┐              │
//!   │ Field projection│              │
//!   └────────┬────────┘              │
//!            └───────────┬───────────┘
//!                        ▼
//!          { "game_data": [..], "search_results": [..] | null }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for providers, credentials and timeouts
//! - [`error`] - `ApiError` and its HTTP mapping
//! - [`models`] - Query parameters, `SearchMatch`, `SearchResults`, `CombinedResult`
//! - [`upstream`] - Sports-data REST client
//! - [`projection`] - Allow-list views over upstream records
//! - [`lookup`] - Player lookup within a day's box scores
//! - [`llm::embeddings`] - Query embedding via OpenAI-compatible APIs or Ollama
//! - [`search::index`] - Vector-index contract and metadata filters
//! - [`search::pinecone`] - Hosted vector-index client
//! - [`search::vector`] - In-process cosine-similarity index with disk persistence
//! - [`search::enrich`] - Embedding + top-K query, or an explicit skip
//! - [`api`] - Axum router, bearer-token middleware and route handlers
//! - [`state`] - Injected collaborators shared by handlers

pub mod api;
pub mod config;
pub mod error;
pub mod llm;
pub mod lookup;
pub mod models;
pub mod projection;
pub mod search;
pub mod state;
pub mod upstream;
