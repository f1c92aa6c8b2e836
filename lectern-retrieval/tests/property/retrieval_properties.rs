use std::sync::Arc;

use lectern_core::config::RetrievalConfig;
use lectern_core::models::{Chunk, Triplet};
use lectern_core::traits::IEmbedder;
use lectern_retrieval::{chunk_text, HybridRetriever, TfIdfEmbedder};
use proptest::prelude::*;
use test_fixtures::ScriptedExtractor;

const WORDS: [&str; 6] = ["cnn", "pooling", "kernel", "stride", "relu", "softmax"];

fn arb_corpus() -> impl Strategy<Value = Vec<(Vec<u8>, Vec<(u8, u8)>)>> {
    prop::collection::vec(
        (
            prop::collection::vec(0u8..6, 1..6),
            prop::collection::vec((0u8..6, 0u8..6), 0..4),
        ),
        0..8,
    )
}

fn build(corpus: &[(Vec<u8>, Vec<(u8, u8)>)]) -> HybridRetriever {
    let mut chunks = Vec::new();
    let mut extractor = ScriptedExtractor::new();
    for (i, (words, edges)) in corpus.iter().enumerate() {
        let text = words.iter().map(|w| WORDS[*w as usize]).collect::<Vec<_>>().join(" ");
        let text = format!("{text} #{i}");
        let triplets = edges
            .iter()
            .map(|(h, t)| Triplet::new(WORDS[*h as usize], "rel", WORDS[*t as usize]))
            .collect();
        extractor = extractor.with(&text, triplets);
        chunks.push(Chunk::new(text, format!("c{i}")));
    }
    let embedder: Arc<dyn IEmbedder> = Arc::new(TfIdfEmbedder::new(64));
    HybridRetriever::build(&chunks, embedder, &extractor, RetrievalConfig::default()).unwrap()
}

proptest! {
    #[test]
    fn result_shape_respects_caps(corpus in arb_corpus(), q in 0u8..6, top_k in 0usize..5) {
        let retriever = build(&corpus);
        let query = WORDS[q as usize];
        let result = retriever.hybrid_search(query, top_k).unwrap();

        prop_assert_eq!(result.query.as_str(), query);
        prop_assert!(result.vector_results.len() <= top_k.min(corpus.len()));
        prop_assert!(result.graph_results.len() <= 10);
        prop_assert!(result.graph_results.iter().all(|g| g.hops >= 1 && g.hops <= 2));
        prop_assert!(result
            .vector_results
            .windows(2)
            .all(|w| w[0].score <= w[1].score));
        if result.vector_results.is_empty() {
            prop_assert!(result.graph_results.is_empty());
        }
    }
}

proptest! {
    #[test]
    fn chunks_cover_text_in_order(text in "[a-z ]{0,80}", size in 1usize..20, overlap in 0usize..25) {
        let chunks = chunk_text(&text, size, overlap);
        let step = size.saturating_sub(overlap).max(1);
        let chars: Vec<char> = text.chars().collect();

        for (i, c) in chunks.iter().enumerate() {
            prop_assert!(c.chars().count() <= size);
            let expected: String = chars[i * step..(i * step + size).min(chars.len())].iter().collect();
            prop_assert_eq!(c, &expected);
        }
        prop_assert_eq!(chunks.len(), chars.len().div_ceil(step));
    }
}
