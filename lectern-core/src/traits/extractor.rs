use crate::errors::LecternResult;
use crate::models::Triplet;

/// Injected `text → triples` capability. May fail per call.
pub trait ITripletExtractor: Send + Sync {
    fn extract(&self, text: &str) -> LecternResult<Vec<Triplet>>;

    /// Human-readable extractor name.
    fn name(&self) -> &str;
}
