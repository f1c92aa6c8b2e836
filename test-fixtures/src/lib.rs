//! Test fixtures for lectern: deterministic fake capabilities and golden
//! course datasets shared by the integration suites of every crate.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use lectern_core::errors::{EmbeddingError, ExtractionError, LecternResult};
use lectern_core::models::{Chunk, Triplet};
use lectern_core::traits::{IEmbedder, ITripletExtractor};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the golden fixture files.
fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("golden")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

// ── Course datasets ───────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChunkTriplets {
    source_ref: String,
    triplets: Vec<Triplet>,
}

#[derive(Debug, Deserialize)]
struct CourseFixture {
    chunks: Vec<Chunk>,
    triplets: Vec<ChunkTriplets>,
}

/// The CNN course: chunks plus an extractor scripted with their triples.
///
/// Triples: `(CNN, uses, pooling)`, `(pooling, reduces, dimension)`,
/// `(backpropagation, computes, gradients)`, `(gradients, use, chain rule)`.
pub fn cnn_course() -> (Vec<Chunk>, ScriptedExtractor) {
    let fixture: CourseFixture = load_fixture("cnn_course.json");
    let mut extractor = ScriptedExtractor::new();
    for entry in fixture.triplets {
        if let Some(chunk) = fixture.chunks.iter().find(|c| c.source_ref == entry.source_ref) {
            extractor = extractor.with(&chunk.text, entry.triplets);
        }
    }
    (fixture.chunks, extractor)
}

/// Embedder vocabulary matching the CNN course.
pub fn cnn_vocabulary() -> Vec<&'static str> {
    vec![
        "cnn",
        "pooling",
        "convolution",
        "dimension",
        "backpropagation",
        "gradients",
        "chain",
    ]
}

// ── Embedders ─────────────────────────────────────────────────────────────

/// Deterministic embedder: one dimension per vocabulary keyword, valued by the
/// number of case-insensitive occurrences of that keyword in the text.
pub struct KeywordEmbedder {
    vocabulary: Vec<String>,
    calls: AtomicUsize,
}

impl KeywordEmbedder {
    pub fn new(vocabulary: &[&str]) -> Self {
        Self {
            vocabulary: vocabulary.iter().map(|w| w.to_lowercase()).collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl IEmbedder for KeywordEmbedder {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        Ok(self
            .vocabulary
            .iter()
            .map(|w| lower.matches(w.as_str()).count() as f32)
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.vocabulary.len()
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

/// Embedder that fails every call after the first `succeed_first` calls.
pub struct FailingEmbedder {
    dimensions: usize,
    succeed_first: usize,
    calls: AtomicUsize,
}

impl FailingEmbedder {
    pub fn always(dimensions: usize) -> Self {
        Self::after(dimensions, 0)
    }

    pub fn after(dimensions: usize, succeed_first: usize) -> Self {
        Self {
            dimensions,
            succeed_first,
            calls: AtomicUsize::new(0),
        }
    }
}

impl IEmbedder for FailingEmbedder {
    fn embed(&self, _text: &str) -> LecternResult<Vec<f32>> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.succeed_first {
            return Ok(vec![0.0; self.dimensions]);
        }
        Err(EmbeddingError::InferenceFailed {
            reason: "scripted failure".to_string(),
        }
        .into())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "failing"
    }
}

// ── Extractors ────────────────────────────────────────────────────────────

/// Extractor returning fixed triples per exact chunk text.
///
/// Unknown texts yield no triples; texts registered with `failing` error.
#[derive(Default)]
pub struct ScriptedExtractor {
    script: HashMap<String, Vec<Triplet>>,
    failing: HashSet<String>,
    calls: AtomicUsize,
}

impl ScriptedExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, text: &str, triplets: Vec<Triplet>) -> Self {
        self.script.insert(text.to_string(), triplets);
        self
    }

    pub fn failing(mut self, text: &str) -> Self {
        self.failing.insert(text.to_string());
        self
    }

    /// Number of `extract` calls served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ITripletExtractor for ScriptedExtractor {
    fn extract(&self, text: &str) -> LecternResult<Vec<Triplet>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(text) {
            return Err(ExtractionError::ExtractorFailed {
                extractor: "scripted".to_string(),
                reason: "scripted failure".to_string(),
            }
            .into());
        }
        Ok(self.script.get(text).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
