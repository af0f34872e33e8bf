use chrono::{Datelike, NaiveDate};
use std::sync::Arc;

use crate::error::ApiError;
use crate::llm::embeddings::Embedder;
use crate::models::SearchResults;
use crate::search::index::{MetadataFilter, VectorIndex};

/// Number of matches requested from the index per query.
pub const TOP_K: usize = 10;

/// Embeds free text and runs a top-K similarity query against the index.
#[derive(Clone)]
pub struct SemanticEnricher {
    embedder: Arc<dyn Embedder>,
    index: Arc<dyn VectorIndex>,
}

impl SemanticEnricher {
    pub fn new(embedder: Arc<dyn Embedder>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Search for `message`, or report that no search ran when it is absent
    /// or blank.
    pub async fn enrich(
        &self,
        message: Option<&str>,
        filter: Option<MetadataFilter>,
    ) -> Result<SearchResults, ApiError> {
        let Some(text) = message.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(SearchResults::NotPerformed);
        };

        let vector = self.embedder.embed(text).await.map_err(ApiError::Embedding)?;
        let matches = self
            .index
            .query(&vector, TOP_K, filter.as_ref())
            .await
            .map_err(ApiError::IndexQuery)?;

        tracing::debug!("Semantic search returned {} matches", matches.len());
        Ok(SearchResults::Matches(matches))
    }
}

/// `{Year, Month, Day}` filter for a provider date such as `2023-FEB-12` or
/// `2023-02-12`. Unparseable input yields no filter.
pub fn date_filter(day: &str) -> Option<MetadataFilter> {
    let day = day.trim();
    let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(day, "%Y-%b-%d"))
        .ok()?;

    Some(
        MetadataFilter::new()
            .field_eq("Year", date.year())
            .field_eq("Month", date.month())
            .field_eq("Day", date.day()),
    )
}

/// `{Year}` filter for a season year. Unparseable input yields no filter.
pub fn year_filter(year: &str) -> Option<MetadataFilter> {
    let year: i32 = year.trim().parse().ok()?;
    Some(MetadataFilter::new().field_eq("Year", year))
}
