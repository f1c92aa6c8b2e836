// Single source of truth for all default values.

// --- Embeddings ---
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

// --- Retrieval ---
pub const DEFAULT_TOP_K: usize = 3;
pub const DEFAULT_GRAPH_MAX_HOPS: usize = 2;
pub const DEFAULT_MAX_GRAPH_ENTITIES: usize = 3;
pub const DEFAULT_GRAPH_RESULT_LIMIT: usize = 10;
pub const DEFAULT_GRAPH_SAMPLE_RATE: f64 = 1.0;
pub const DEFAULT_CHUNK_SIZE: usize = 500;
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

// --- Memory ---
pub const DEFAULT_INITIAL_EASINESS: f64 = 2.5;
pub const DEFAULT_MIN_EASINESS: f64 = 1.3;
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.3;
pub const DEFAULT_REVIEW_LIMIT: usize = 10;
pub const DEFAULT_MASTERY_THRESHOLD: f64 = 0.8;
pub const DEFAULT_WEAK_THRESHOLD: f64 = 0.3;

// --- Session ---
pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_CLASS_WEAK_THRESHOLD: f64 = 0.4;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
