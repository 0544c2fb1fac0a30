//! Guest Embedding Index
//!
//! Answers "which guests are most textually similar to this query"
//! without exact keyword matching. Embeddings are computed once at build
//! time, index-aligned with the dataset; queries are pure reads.

use std::cmp::Ordering;
use std::sync::Arc;

use agent_core::Embedder;

use crate::error::{PlannerError, Result};
use crate::model::GuestRecord;

/// Number of guests returned per query
pub const TOP_K: usize = 3;

/// Returned when the index holds no records
pub const NO_MATCH: &str = "No matching guest information found.";

struct IndexedGuest {
    block: String,
    vector: Vec<f32>,
}

/// Build-once nearest-neighbor index over the guest list
pub struct GuestIndex {
    entries: Vec<IndexedGuest>,
    embedder: Arc<dyn Embedder>,
}

impl GuestIndex {
    /// Embed every record's profile block. Any embedding failure is
    /// propagated: the process cannot start without a complete index.
    pub async fn build(records: &[GuestRecord], embedder: Arc<dyn Embedder>) -> Result<Self> {
        let mut entries = Vec::with_capacity(records.len());

        for record in records {
            let block = record.profile_block();
            let vector = embedder
                .embed(&block)
                .await
                .map_err(|e| PlannerError::Embedding(e.to_string()))?;
            entries.push(IndexedGuest { block, vector });
        }

        tracing::info!(entries = entries.len(), "Built guest embedding index");
        Ok(Self { entries, embedder })
    }

    /// Number of indexed guests
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the profile blocks of the up-to-[`TOP_K`] most similar
    /// guests, most similar first, joined by blank lines.
    ///
    /// Ranking is by cosine similarity, descending; ties keep dataset
    /// order. The cut is purely rank-based: a weak match is still
    /// returned when fewer than K strong ones exist.
    pub async fn query(&self, text: &str) -> Result<String> {
        if self.entries.is_empty() {
            return Ok(NO_MATCH.into());
        }

        let query = self
            .embedder
            .embed(text)
            .await
            .map_err(|e| PlannerError::Embedding(e.to_string()))?;

        let similarities: Vec<f32> = self
            .entries
            .iter()
            .map(|entry| cosine_similarity(&query, &entry.vector))
            .collect();

        // Stable sort, so equal similarities preserve dataset order.
        let mut ranked: Vec<usize> = (0..self.entries.len()).collect();
        ranked.sort_by(|&a, &b| {
            similarities[b]
                .partial_cmp(&similarities[a])
                .unwrap_or(Ordering::Equal)
        });

        let blocks: Vec<&str> = ranked
            .iter()
            .take(TOP_K)
            .map(|&i| self.entries[i].block.as_str())
            .collect();

        Ok(blocks.join("\n\n"))
    }
}

/// Cosine similarity in [-1, 1]; zero-magnitude vectors compare as 0
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_core::error::{AgentError, Result as CoreResult};
    use async_trait::async_trait;

    /// Deterministic embedder: one dimension per known keyword plus a
    /// constant bias so no vector has zero magnitude.
    struct KeywordEmbedder;

    const KEYWORDS: [&str; 3] = ["lovelace", "tesla", "curie"];

    #[async_trait]
    impl Embedder for KeywordEmbedder {
        async fn embed(&self, text: &str) -> CoreResult<Vec<f32>> {
            let lower = text.to_lowercase();
            let mut vector: Vec<f32> = KEYWORDS
                .iter()
                .map(|k| if lower.contains(k) { 1.0 } else { 0.0 })
                .collect();
            vector.push(1.0);
            Ok(vector)
        }
    }

    /// Embedder that always fails, to prove the empty index never calls it
    struct FailingEmbedder;

    #[async_trait]
    impl Embedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> CoreResult<Vec<f32>> {
            Err(AgentError::Provider("down".into()))
        }
    }

    fn sample_guests() -> Vec<GuestRecord> {
        vec![
            GuestRecord::new(
                "Ada Lovelace",
                "mathematician",
                "Pioneer of computer programming.",
                "ada@example.com",
            ),
            GuestRecord::new(
                "Nikola Tesla",
                "old friend",
                "Inventor of alternating current.",
                "tesla@example.com",
            ),
            GuestRecord::new(
                "Marie Curie",
                "colleague",
                "Physicist and chemist.",
                "curie@example.com",
            ),
        ]
    }

    async fn sample_index() -> GuestIndex {
        GuestIndex::build(&sample_guests(), Arc::new(KeywordEmbedder))
            .await
            .unwrap()
    }

    #[test]
    fn test_cosine_similarity_range() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < f32::EPSILON);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < f32::EPSILON);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < f32::EPSILON);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[tokio::test]
    async fn test_named_guest_ranks_first() {
        let index = sample_index().await;

        let result = index.query("Lady Ada Lovelace").await.unwrap();
        let first_block = result.split("\n\n").next().unwrap();
        assert!(first_block.contains("Name: Ada Lovelace"));
        assert!(first_block.contains("Relation: mathematician"));
    }

    #[tokio::test]
    async fn test_at_most_k_results() {
        let mut guests = sample_guests();
        guests.push(GuestRecord::new(
            "Grace Hopper",
            "mentor",
            "Compiler pioneer.",
            "grace@example.com",
        ));
        guests.push(GuestRecord::new(
            "Alan Turing",
            "colleague",
            "Computability theorist.",
            "alan@example.com",
        ));

        let index = GuestIndex::build(&guests, Arc::new(KeywordEmbedder))
            .await
            .unwrap();
        assert_eq!(index.len(), 5);

        let result = index.query("anyone at all").await.unwrap();
        assert_eq!(result.split("\n\n").count(), TOP_K);
    }

    #[tokio::test]
    async fn test_fewer_records_than_k_returns_all() {
        let guests = sample_guests()[..2].to_vec();
        let index = GuestIndex::build(&guests, Arc::new(KeywordEmbedder))
            .await
            .unwrap();

        let result = index.query("everyone").await.unwrap();
        assert_eq!(result.split("\n\n").count(), 2);
    }

    #[tokio::test]
    async fn test_empty_index_returns_sentinel() {
        let index = GuestIndex::build(&[], Arc::new(FailingEmbedder))
            .await
            .unwrap();

        // Never errors, never touches the embedder.
        assert_eq!(index.query("Ada").await.unwrap(), NO_MATCH);
        assert_eq!(index.query("").await.unwrap(), NO_MATCH);
    }

    #[tokio::test]
    async fn test_query_is_deterministic() {
        let index = sample_index().await;

        let first = index.query("Tesla").await.unwrap();
        let second = index.query("Tesla").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ties_keep_dataset_order() {
        let index = sample_index().await;

        // "Tesla" matches the second record; the other two tie and must
        // appear in dataset order after it.
        let result = index.query("Tesla").await.unwrap();
        let blocks: Vec<&str> = result.split("\n\n").collect();
        assert!(blocks[0].contains("Nikola Tesla"));
        assert!(blocks[1].contains("Ada Lovelace"));
        assert!(blocks[2].contains("Marie Curie"));
    }
}
