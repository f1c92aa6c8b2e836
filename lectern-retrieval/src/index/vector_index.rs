//! Exact nearest-neighbour index over chunk embeddings.

use std::sync::Arc;

use lectern_core::errors::{EmbeddingError, LecternResult};
use lectern_core::models::{Chunk, VectorHit};
use lectern_core::traits::IEmbedder;
use tracing::{debug, info};

struct IndexedChunk {
    chunk: Chunk,
    vector: Vec<f32>,
}

/// Flat index answering nearest-neighbour queries by squared L2 distance.
///
/// The dimension is taken from the embedder at construction and never
/// changes. `build` needs `&mut self` and `search` only `&self`, so the borrow
/// checker keeps the two from interleaving.
pub struct VectorIndex {
    embedder: Arc<dyn IEmbedder>,
    dimensions: usize,
    entries: Vec<IndexedChunk>,
}

impl VectorIndex {
    /// Create an empty index bound to `embedder`.
    pub fn new(embedder: Arc<dyn IEmbedder>) -> Self {
        let dimensions = embedder.dimensions();
        Self {
            embedder,
            dimensions,
            entries: Vec::new(),
        }
    }

    /// Replace the index contents with `chunks` in one bulk pass.
    ///
    /// On any embedding failure the previous contents are left untouched.
    pub fn build(&mut self, chunks: &[Chunk]) -> LecternResult<usize> {
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts)?;
        if vectors.len() != chunks.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "embedder {} returned {} vectors for {} chunks",
                    self.embedder.name(),
                    vectors.len(),
                    chunks.len()
                ),
            }
            .into());
        }

        let mut entries = Vec::with_capacity(chunks.len());
        for (chunk, vector) in chunks.iter().zip(vectors) {
            self.check_dimensions(&vector)?;
            entries.push(IndexedChunk {
                chunk: chunk.clone(),
                vector,
            });
        }

        self.entries = entries;
        info!(
            chunks = self.entries.len(),
            dimensions = self.dimensions,
            embedder = self.embedder.name(),
            "vector index built"
        );
        Ok(self.entries.len())
    }

    /// Up to `k` chunks nearest to `query`, closest first.
    ///
    /// Equal distances keep insertion order. An empty index returns an empty
    /// list without calling the embedder.
    pub fn search(&self, query: &str, k: usize) -> LecternResult<Vec<VectorHit>> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let q = self.embedder.embed(query)?;
        self.check_dimensions(&q)?;

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| (i, squared_l2(&q, &e.vector)))
            .collect();
        // Stable sort: ties stay in insertion order.
        scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(k);

        debug!(k, hits = scored.len(), "vector search complete");

        Ok(scored
            .into_iter()
            .map(|(i, score)| {
                let chunk = &self.entries[i].chunk;
                VectorHit {
                    text: chunk.text.clone(),
                    source_ref: chunk.source_ref.clone(),
                    score,
                }
            })
            .collect())
    }

    fn check_dimensions(&self, vector: &[f32]) -> LecternResult<()> {
        if vector.len() != self.dimensions {
            return Err(EmbeddingError::DimensionMismatch {
                expected: self.dimensions,
                actual: vector.len(),
            }
            .into());
        }
        Ok(())
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Squared Euclidean distance. Callers guarantee equal lengths.
fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
