//! HybridRetriever: fuses the vector index with the concept graph per query.
//!
//! vector search → entity bridge → bounded-hop graph expansion → merge

use std::sync::Arc;

use lectern_core::config::RetrievalConfig;
use lectern_core::errors::LecternResult;
use lectern_core::models::{Chunk, HybridResult};
use lectern_core::traits::{IEmbedder, ITripletExtractor};
use lectern_graph::{BuildReport, ConceptGraph};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::index::VectorIndex;
use crate::search::candidate_entities;

/// Resident size of a built retriever.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrieverStats {
    pub chunks: usize,
    pub entities: usize,
    pub relations: usize,
}

/// One vector index plus one concept graph, built together and then
/// read-only. Share it behind an `Arc` to serve concurrent queries.
pub struct HybridRetriever {
    index: VectorIndex,
    graph: ConceptGraph,
    config: RetrievalConfig,
    build_report: BuildReport,
}

impl HybridRetriever {
    /// A retriever with nothing indexed. Every search returns empty results.
    pub fn empty(embedder: Arc<dyn IEmbedder>, config: RetrievalConfig) -> Self {
        Self {
            index: VectorIndex::new(embedder),
            graph: ConceptGraph::with_result_limit(config.graph_result_limit),
            config,
            build_report: BuildReport::default(),
        }
    }

    /// Embed every chunk and build the graph from a sample of them.
    ///
    /// Embedding failures abort the build. Extraction failures only cost the
    /// affected chunk its triples.
    pub fn build(
        chunks: &[Chunk],
        embedder: Arc<dyn IEmbedder>,
        extractor: &dyn ITripletExtractor,
        config: RetrievalConfig,
    ) -> LecternResult<Self> {
        let mut retriever = Self::empty(embedder, config);
        retriever.index.build(chunks)?;
        retriever.build_report =
            retriever
                .graph
                .build(chunks, extractor, retriever.config.graph_sample_rate);

        info!(
            chunks = retriever.index.len(),
            entities = retriever.graph.node_count(),
            relations = retriever.graph.edge_count(),
            "hybrid retriever built"
        );
        Ok(retriever)
    }

    /// Vector hits for `query` plus graph neighbourhoods of the entities the
    /// query or its best hit mention.
    ///
    /// At most `max_graph_entities` candidates are expanded. Their results are
    /// concatenated in candidate order and cut at `graph_result_limit`.
    pub fn hybrid_search(&self, query: &str, top_k: usize) -> LecternResult<HybridResult> {
        let _span = lectern_core::retrieval_span!(top_k).entered();

        let vector_results = self.index.search(query, top_k)?;
        let candidates = candidate_entities(&self.graph, query, &vector_results);
        debug!(
            vector_hits = vector_results.len(),
            candidates = candidates.len(),
            "entity bridge resolved"
        );

        let mut graph_results = Vec::new();
        for entity in candidates.iter().take(self.config.max_graph_entities) {
            graph_results.extend(
                self.graph
                    .neighbors_within_hops(entity, self.config.graph_max_hops),
            );
        }
        graph_results.truncate(self.config.graph_result_limit);

        Ok(HybridResult {
            vector_results,
            graph_results,
            query: query.to_string(),
        })
    }

    pub fn stats(&self) -> RetrieverStats {
        RetrieverStats {
            chunks: self.index.len(),
            entities: self.graph.node_count(),
            relations: self.graph.edge_count(),
        }
    }

    /// Counts from the graph build pass.
    pub fn build_report(&self) -> &BuildReport {
        &self.build_report
    }

    pub fn graph(&self) -> &ConceptGraph {
        &self.graph
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty() && self.graph.is_empty()
    }
}
