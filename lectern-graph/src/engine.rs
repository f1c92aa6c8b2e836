//! ConceptGraph: owns the interned graph and exposes ingestion and traversal.

use lectern_core::models::{Chunk, GraphHit, RelationEdge, Triplet};
use lectern_core::traits::ITripletExtractor;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::graph::IndexedGraph;
use crate::traversal::{self, TraversalConfig};

/// Counts from one graph build pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildReport {
    /// Chunks sent to the extractor (after sampling).
    pub chunks_processed: usize,
    /// Triples inserted, overwrites included.
    pub triplets_added: usize,
    /// Chunks whose extraction failed and contributed no edges.
    pub extraction_failures: usize,
}

/// Directed, attributed entity-relation graph.
///
/// Written only during a build; afterwards all queries take `&self` and are
/// safe to run from many threads at once.
pub struct ConceptGraph {
    graph: IndexedGraph,
    result_limit: usize,
}

impl ConceptGraph {
    /// Create an empty graph with the default result limit.
    pub fn new() -> Self {
        Self::with_result_limit(lectern_core::config::defaults::DEFAULT_GRAPH_RESULT_LIMIT)
    }

    /// Create an empty graph capping traversal results at `limit`.
    pub fn with_result_limit(limit: usize) -> Self {
        Self {
            graph: IndexedGraph::new(),
            result_limit: limit,
        }
    }

    /// Insert or overwrite the directed edge `head → tail`.
    ///
    /// Nodes are created implicitly. Re-adding an existing pair replaces its
    /// label and source.
    pub fn add_relation(&mut self, head: &str, tail: &str, label: &str, source_ref: &str) {
        self.graph.upsert_edge(
            head,
            tail,
            RelationEdge {
                label: label.to_string(),
                source_ref: source_ref.to_string(),
            },
        );
    }

    /// Run the extractor over one chunk. Failures are logged and yield no triples.
    pub fn extract_relations(extractor: &dyn ITripletExtractor, chunk: &Chunk) -> Vec<Triplet> {
        Self::try_extract(extractor, chunk).unwrap_or_default()
    }

    fn try_extract(extractor: &dyn ITripletExtractor, chunk: &Chunk) -> Option<Vec<Triplet>> {
        match extractor.extract(&chunk.text) {
            Ok(triplets) => Some(triplets),
            Err(e) => {
                warn!(
                    extractor = extractor.name(),
                    source_ref = %chunk.source_ref,
                    error = %e,
                    "triplet extraction failed, skipping chunk"
                );
                None
            }
        }
    }

    /// Extract triples from (a sample of) `chunks` and add them to the graph.
    ///
    /// `sample_rate` in `[0, 1]` selects `floor(len × rate)` evenly spaced
    /// chunks. Extraction failures never abort the build.
    pub fn build(
        &mut self,
        chunks: &[Chunk],
        extractor: &dyn ITripletExtractor,
        sample_rate: f64,
    ) -> BuildReport {
        let _span = lectern_core::graph_build_span!(chunks.len()).entered();
        let mut report = BuildReport::default();

        for chunk in sample(chunks, sample_rate) {
            report.chunks_processed += 1;
            let Some(triplets) = Self::try_extract(extractor, chunk) else {
                report.extraction_failures += 1;
                continue;
            };
            for t in &triplets {
                self.add_relation(&t.head, &t.tail, &t.relation, &chunk.source_ref);
                report.triplets_added += 1;
            }
            debug!(source_ref = %chunk.source_ref, triplets = triplets.len(), "chunk extracted");
        }

        info!(
            nodes = self.node_count(),
            edges = self.edge_count(),
            triplets = report.triplets_added,
            failures = report.extraction_failures,
            "concept graph built"
        );
        report
    }

    /// Every entity reachable from `start` within `max_hops`, with one
    /// shortest path each, hop-sorted and capped at the result limit.
    pub fn neighbors_within_hops(&self, start: &str, max_hops: usize) -> Vec<GraphHit> {
        traversal::within_hops::trace(
            &self.graph,
            start,
            &TraversalConfig {
                max_hops,
                max_results: self.result_limit,
            },
        )
    }

    /// Entity labels in insertion order.
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.graph
            .graph
            .node_indices()
            .filter_map(move |idx| self.graph.label(idx))
    }

    pub fn contains(&self, entity: &str) -> bool {
        self.graph.get_node(entity).is_some()
    }

    /// Attributes of the edge `head → tail`, if present.
    pub fn relation(&self, head: &str, tail: &str) -> Option<&RelationEdge> {
        let h = self.graph.get_node(head)?;
        let t = self.graph.get_node(tail)?;
        self.graph.edge(h, t)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

impl Default for ConceptGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Evenly spaced subset of `chunks`: `floor(len × rate)` items.
fn sample(chunks: &[Chunk], rate: f64) -> impl Iterator<Item = &Chunk> {
    let len = chunks.len();
    let rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
    let count = ((len as f64 * rate).floor() as usize).min(len);
    (0..count).filter_map(move |j| chunks.get(j * len / count))
}
