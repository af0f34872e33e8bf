use anyhow::{Context, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};

use crate::models::SearchMatch;
use crate::search::index::{DeleteSelector, IndexVector, MetadataFilter, VectorIndex};

/// In-memory vector index with disk persistence and cosine similarity search.
pub struct LocalIndex {
    entries: RwLock<Vec<IndexVector>>,
    persist_path: PathBuf,
}

impl LocalIndex {
    pub fn open_or_create(persist_path: &Path) -> Result<Self> {
        if let Some(dir) = persist_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let entries = if persist_path.exists() {
            let data = std::fs::read_to_string(persist_path)
                .context("Failed to read local vector index")?;
            serde_json::from_str(&data).context("Local vector index file is corrupt")?
        } else {
            Vec::new()
        };

        Ok(Self {
            entries: RwLock::new(entries),
            persist_path: persist_path.to_path_buf(),
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Atomic write via temp file + rename.
    fn persist(&self, entries: &[IndexVector]) -> Result<()> {
        let data = serde_json::to_string(entries)?;
        let tmp_path = self.persist_path.with_extension("json.tmp");
        std::fs::write(&tmp_path, data)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.persist_path)
            .context("Failed to replace local vector index")?;
        Ok(())
    }

    fn search(
        &self,
        query: &[f32],
        limit: usize,
        filter: Option<&MetadataFilter>,
    ) -> Vec<SearchMatch> {
        let entries = self.entries.read();

        let mut scored: Vec<(f32, &IndexVector)> = entries
            .iter()
            .filter(|e| filter.map_or(true, |f| f.matches(e.metadata.as_ref())))
            .map(|e| (cosine_similarity(query, &e.values), e))
            .collect();

        // Sort descending by score
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(limit);

        scored
            .into_iter()
            .map(|(score, e)| SearchMatch {
                id: e.id.clone(),
                score: f64::from(score),
                metadata: e.metadata.clone(),
            })
            .collect()
    }
}

#[async_trait]
impl VectorIndex for LocalIndex {
    async fn query(
        &self,
        vector: &[f32],
        top_k: usize,
        filter: Option<&MetadataFilter>,
    ) -> Result<Vec<SearchMatch>> {
        Ok(self.search(vector, top_k, filter))
    }

    async fn upsert(&self, vectors: Vec<IndexVector>) -> Result<usize> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        let count = vectors.len();

        for vector in vectors {
            match next.iter_mut().find(|e| e.id == vector.id) {
                Some(existing) => *existing = vector,
                None => next.push(vector),
            }
        }

        // Memory only changes once the file does.
        self.persist(&next)?;
        *entries = next;
        Ok(count)
    }

    async fn delete(&self, selector: DeleteSelector) -> Result<()> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        match selector {
            DeleteSelector::Ids(ids) => next.retain(|e| !ids.contains(&e.id)),
            DeleteSelector::Filter(filter) => next.retain(|e| !filter.matches(e.metadata.as_ref())),
            DeleteSelector::All => next.clear(),
        }

        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let denom = norm_a.sqrt() * norm_b.sqrt();
    if denom == 0.0 {
        0.0
    } else {
        dot / denom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vector(id: &str, values: Vec<f32>, year: i64) -> IndexVector {
        IndexVector {
            id: id.to_string(),
            values,
            metadata: json!({ "Year": year }).as_object().cloned(),
        }
    }

    async fn seeded(dir: &Path) -> LocalIndex {
        let index = LocalIndex::open_or_create(&dir.join("vectors.json")).unwrap();
        index
            .upsert(vec![
                vector("recap", vec![0.9, 0.1, 0.1], 2023),
                vector("trade", vec![0.1, 0.9, 0.1], 2023),
                vector("draft", vec![0.8, 0.2, 0.0], 2022),
            ])
            .await
            .unwrap();
        index
    }

    #[test]
    fn test_cosine_similarity_edges() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]), 1.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 0.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[tokio::test]
    async fn test_query_ranks_descending_and_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let index = seeded(dir.path()).await;

        let results = index.query(&[1.0, 0.0, 0.0], 2, None).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "recap");
        assert_eq!(results[1].id, "draft");
        assert!(results[0].score >= results[1].score);
    }

    #[tokio::test]
    async fn test_query_applies_metadata_filter() {
        let dir = tempfile::tempdir().unwrap();
        let index = seeded(dir.path()).await;

        let filter = MetadataFilter::new().field_eq("Year", 2022);
        let results = index.query(&[1.0, 0.0, 0.0], 10, Some(&filter)).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "draft");
        assert_eq!(results[0].metadata.as_ref().unwrap()["Year"], json!(2022));
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let index = seeded(dir.path()).await;

        index
            .upsert(vec![vector("trade", vec![1.0, 0.0, 0.0], 2024)])
            .await
            .unwrap();
        assert_eq!(index.entry_count(), 3);

        let results = index.query(&[1.0, 0.0, 0.0], 1, None).await.unwrap();
        assert_eq!(results[0].id, "trade");
    }

    #[tokio::test]
    async fn test_delete_by_ids_filter_and_all() {
        let dir = tempfile::tempdir().unwrap();
        let index = seeded(dir.path()).await;

        index
            .delete(DeleteSelector::Ids(vec!["recap".to_string()]))
            .await
            .unwrap();
        assert_eq!(index.entry_count(), 2);

        index
            .delete(DeleteSelector::Filter(MetadataFilter::new().field_eq("Year", 2022)))
            .await
            .unwrap();
        assert_eq!(index.entry_count(), 1);

        index.delete(DeleteSelector::All).await.unwrap();
        assert_eq!(index.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        drop(seeded(dir.path()).await);

        let reopened = LocalIndex::open_or_create(&dir.path().join("vectors.json")).unwrap();
        assert_eq!(reopened.entry_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_index_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let index = seeded(dir.path()).await;
        // A directory in the temp file's place makes every write fail.
        std::fs::create_dir(dir.path().join("vectors.json.tmp")).unwrap();

        let err = index
            .upsert(vec![vector("x", vec![1.0, 0.0, 0.0], 2024)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("vectors.json.tmp"));
        assert_eq!(index.entry_count(), 3);
        let ids: Vec<String> = index
            .query(&[1.0, 0.0, 0.0], 10, None)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert!(!ids.contains(&"x".to_string()));

        assert!(index.delete(DeleteSelector::All).await.is_err());
        assert_eq!(index.entry_count(), 3);

        let reopened = LocalIndex::open_or_create(&dir.path().join("vectors.json")).unwrap();
        assert_eq!(reopened.entry_count(), 3);
    }
}
