use std::sync::Arc;

use lectern_core::config::{LecternConfig, RetrievalConfig};
use lectern_core::errors::LecternError;
use lectern_core::models::{Chunk, Triplet};
use lectern_core::traits::IEmbedder;
use lectern_retrieval::{chunk_document, HybridRetriever, TfIdfEmbedder};
use test_fixtures::{cnn_course, cnn_vocabulary, FailingEmbedder, KeywordEmbedder, ScriptedExtractor};

fn cnn_retriever() -> HybridRetriever {
    let (chunks, extractor) = cnn_course();
    let embedder: Arc<dyn IEmbedder> = Arc::new(KeywordEmbedder::new(&cnn_vocabulary()));
    HybridRetriever::build(&chunks, embedder, &extractor, RetrievalConfig::default()).unwrap()
}

// ── CNN scenario ─────────────────────────────────────────────────────────

#[test]
fn cnn_query_finds_chunk_and_expands_graph() {
    let retriever = cnn_retriever();
    let result = retriever.hybrid_search("What is a CNN?", 2).unwrap();

    assert_eq!(result.query, "What is a CNN?");
    assert_eq!(result.vector_results.len(), 2);
    assert_eq!(result.vector_results[0].source_ref, "deep_learning_101.pdf#p4");
    assert_eq!(result.vector_results[1].source_ref, "deep_learning_101.pdf#p5");

    // Candidates: CNN (query and top hit), pooling (top hit).
    let entities: Vec<_> = result.graph_results.iter().map(|g| g.entity.as_str()).collect();
    assert_eq!(entities, vec!["pooling", "dimension", "dimension"]);
    assert_eq!(result.graph_results[1].path, vec!["CNN", "pooling", "dimension"]);
    assert_eq!(result.graph_results[2].path, vec!["pooling", "dimension"]);
}

#[test]
fn vector_scores_are_squared_distances_ascending() {
    let retriever = cnn_retriever();
    let result = retriever.hybrid_search("What is a CNN?", 3).unwrap();
    let scores: Vec<f32> = result.vector_results.iter().map(|h| h.score).collect();
    assert_eq!(scores, vec![2.0, 3.0, 4.0]);
}

#[test]
fn bridge_is_case_sensitive_substring() {
    let retriever = cnn_retriever();
    let result = retriever.hybrid_search("tell me about gradients", 1).unwrap();

    assert_eq!(result.vector_results[0].source_ref, "deep_learning_101.pdf#p9");
    // "Backpropagation" in the text does not match the entity "backpropagation".
    let entities: Vec<_> = result.graph_results.iter().map(|g| g.entity.as_str()).collect();
    assert_eq!(entities, vec!["chain rule"]);
}

#[test]
fn graph_paths_never_exceed_two_hops() {
    let retriever = cnn_retriever();
    for q in ["CNN", "pooling", "gradients", "backpropagation"] {
        let result = retriever.hybrid_search(q, 3).unwrap();
        assert!(result.graph_results.iter().all(|g| g.hops <= 2 && g.relations.len() == g.hops));
    }
}

#[test]
fn stats_report_resident_size() {
    let retriever = cnn_retriever();
    let stats = retriever.stats();
    assert_eq!(stats.chunks, 3);
    assert_eq!(stats.entities, 6);
    assert_eq!(stats.relations, 4);
    assert_eq!(retriever.build_report().triplets_added, 4);
}

// ── Empty and degraded inputs ────────────────────────────────────────────

#[test]
fn empty_retriever_returns_empty_result_without_embedding() {
    let embedder = Arc::new(KeywordEmbedder::new(&cnn_vocabulary()));
    let retriever = HybridRetriever::empty(embedder.clone(), RetrievalConfig::default());

    let result = retriever.hybrid_search("anything", 5).unwrap();
    assert!(result.vector_results.is_empty());
    assert!(result.graph_results.is_empty());
    assert_eq!(result.query, "anything");
    assert_eq!(embedder.calls(), 0);
    assert!(retriever.is_empty());
}

#[test]
fn building_from_no_chunks_is_empty_but_usable() {
    let embedder: Arc<dyn IEmbedder> = Arc::new(KeywordEmbedder::new(&cnn_vocabulary()));
    let retriever =
        HybridRetriever::build(&[], embedder, &ScriptedExtractor::new(), RetrievalConfig::default())
            .unwrap();
    let result = retriever.hybrid_search("CNN", 3).unwrap();
    assert!(result.vector_results.is_empty() && result.graph_results.is_empty());
}

#[test]
fn query_naming_entity_without_vector_hits_gets_no_graph_results() {
    let retriever = cnn_retriever();
    let result = retriever.hybrid_search("CNN", 0).unwrap();
    assert!(result.vector_results.is_empty());
    assert!(result.graph_results.is_empty());
}

#[test]
fn embedding_failure_during_build_is_fatal() {
    let (chunks, extractor) = cnn_course();
    let embedder: Arc<dyn IEmbedder> = Arc::new(FailingEmbedder::always(4));
    let err = HybridRetriever::build(&chunks, embedder, &extractor, RetrievalConfig::default())
        .err()
        .unwrap();
    assert!(matches!(err, LecternError::EmbeddingError(_)));
}

#[test]
fn embedding_failure_during_query_is_surfaced() {
    let (chunks, extractor) = cnn_course();
    let embedder: Arc<dyn IEmbedder> = Arc::new(FailingEmbedder::after(4, chunks.len()));
    let retriever =
        HybridRetriever::build(&chunks, embedder, &extractor, RetrievalConfig::default()).unwrap();
    assert!(retriever.hybrid_search("CNN", 3).is_err());
}

#[test]
fn extraction_failures_leave_vector_index_complete() {
    let (chunks, _) = cnn_course();
    let extractor = ScriptedExtractor::new().failing(&chunks[0].text);
    let embedder: Arc<dyn IEmbedder> = Arc::new(KeywordEmbedder::new(&cnn_vocabulary()));
    let retriever =
        HybridRetriever::build(&chunks, embedder, &extractor, RetrievalConfig::default()).unwrap();

    assert_eq!(retriever.stats().chunks, 3);
    assert_eq!(retriever.stats().relations, 0);
    assert_eq!(retriever.build_report().extraction_failures, 1);
}

#[test]
fn zero_sample_rate_skips_graph_but_indexes_everything() {
    let (chunks, extractor) = cnn_course();
    let embedder: Arc<dyn IEmbedder> = Arc::new(KeywordEmbedder::new(&cnn_vocabulary()));
    let config = RetrievalConfig {
        graph_sample_rate: 0.0,
        ..RetrievalConfig::default()
    };
    let retriever = HybridRetriever::build(&chunks, embedder, &extractor, config).unwrap();

    assert_eq!(retriever.stats().chunks, 3);
    assert!(retriever.graph().is_empty());
    assert_eq!(extractor.calls(), 0);
}

// ── Candidate and result caps ────────────────────────────────────────────

fn star_retriever(config: RetrievalConfig) -> HybridRetriever {
    // Five hubs, each with three leaves; the single chunk names every hub.
    let text = "alpha bravo charlie delta echo";
    let mut triplets = Vec::new();
    for hub in text.split(' ') {
        for leaf in 0..3 {
            triplets.push(Triplet::new(hub, "has", format!("{hub}-{leaf}")));
        }
    }
    let extractor = ScriptedExtractor::new().with(text, triplets);
    let embedder: Arc<dyn IEmbedder> = Arc::new(KeywordEmbedder::new(&["alpha"]));
    HybridRetriever::build(&[Chunk::new(text, "star")], embedder, &extractor, config).unwrap()
}

#[test]
fn at_most_three_candidates_are_expanded() {
    let retriever = star_retriever(RetrievalConfig::default());
    let result = retriever.hybrid_search("hubs", 1).unwrap();

    assert_eq!(result.graph_results.len(), 9);
    assert!(result
        .graph_results
        .iter()
        .all(|g| ["alpha", "bravo", "charlie"].contains(&g.path[0].as_str())));
}

#[test]
fn merged_graph_results_are_cut_at_limit() {
    let config = RetrievalConfig {
        max_graph_entities: 5,
        ..RetrievalConfig::default()
    };
    let retriever = star_retriever(config);
    let result = retriever.hybrid_search("hubs", 1).unwrap();

    assert_eq!(result.graph_results.len(), 10);
    assert_eq!(result.graph_results[9].path[0], "delta");
}

// ── Fallback embedder end to end ─────────────────────────────────────────

#[test]
fn tfidf_embedder_serves_chunked_chinese_course() {
    let text = "卷積神經網路使用池化層。反向傳播利用連鎖律計算梯度。";
    let chunks = chunk_document(text, "lecture.md", 13, 0);
    assert_eq!(chunks.len(), 2);

    let extractor = ScriptedExtractor::new()
        .with(&chunks[0].text, vec![Triplet::new("卷積神經網路", "使用", "池化層")]);
    let config = LecternConfig::from_toml("[embedding]\ndimensions = 256\n").unwrap();
    let embedder: Arc<dyn IEmbedder> = Arc::new(TfIdfEmbedder::from_config(&config.embedding));
    assert_eq!(embedder.dimensions(), 256);
    let retriever =
        HybridRetriever::build(&chunks, embedder, &extractor, config.retrieval).unwrap();

    let result = retriever.hybrid_search("什麼是卷積神經網路", 1).unwrap();
    assert_eq!(result.vector_results[0].text, chunks[0].text);
    assert_eq!(result.graph_results.len(), 1);
    assert_eq!(result.graph_results[0].entity, "池化層");
}
