//! The vector-index provider surface: ranked similarity queries with
//! metadata filtering, plus the write path used to populate the index.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::SearchMatch;

/// Equality constraints on match metadata. Every entry must hold.
///
/// Serializes to the index filter syntax: `{"Year": {"$eq": 2023}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataFilter {
    conditions: Vec<(String, Value)>,
}

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn to_json(&self) -> Value {
        let clauses: Map<String, Value> = self
            .conditions
            .iter()
            .map(|(field, value)| (field.clone(), serde_json::json!({ "$eq": value })))
            .collect();
        Value::Object(clauses)
    }

    /// Whether `metadata` satisfies every condition.
    pub fn matches(&self, metadata: Option<&Map<String, Value>>) -> bool {
        self.conditions.iter().all(|(field, expected)| {
            metadata
                .and_then(|m| m.get(field))
                .is_some_and(|actual| values_equal(actual, expected))
        })
    }
}

/// Numbers compare by value so `2023` matches `2023.0`.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

/// One vector to store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexVector {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// What to remove from the index.
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteSelector {
    Ids(Vec<String>),
    Filter(MetadataFilter),
    All,
}

#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Up to `top_k` matches ranked by descending similarity.
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchMatch>>;

    /// Insert or replace vectors by id. Returns the number written.
    async fn upsert(&self, vectors: Vec<IndexVector>) -> Result<usize>;

    async fn delete(&self, selector: DeleteSelector) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_json_syntax() {
        let filter = MetadataFilter::new().field_eq("Year", 2023).field_eq("Month", 2);
        assert_eq!(
            filter.to_json(),
            json!({"Year": {"$eq": 2023}, "Month": {"$eq": 2}})
        );
    }

    #[test]
    fn test_filter_matches_all_conditions() {
        let filter = MetadataFilter::new().field_eq("Year", 2023).field_eq("Day", 12);
        let meta = json!({"Year": 2023, "Day": 12.0, "text": "recap"});
        assert!(filter.matches(meta.as_object()));

        let meta = json!({"Year": 2023, "Day": 13});
        assert!(!filter.matches(meta.as_object()));
    }

    #[test]
    fn test_filter_requires_field_presence() {
        let filter = MetadataFilter::new().field_eq("Year", 2023);
        assert!(!filter.matches(json!({"Month": 2}).as_object()));
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_empty_filter_matches_anything() {
        let filter = MetadataFilter::new();
        assert!(filter.is_empty());
        assert!(filter.matches(None));
    }

    #[test]
    fn test_string_values_compare_exactly() {
        let filter = MetadataFilter::new().field_eq("Team", "BOS");
        assert!(filter.matches(json!({"Team": "BOS"}).as_object()));
        assert!(!filter.matches(json!({"Team": "bos"}).as_object()));
    }
}
