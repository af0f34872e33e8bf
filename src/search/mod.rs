//! Semantic search: the vector-index contract, its providers, and the
//! enricher that ties embedding and querying together.

pub mod enrich;
pub mod index;
pub mod pinecone;
pub mod vector;
