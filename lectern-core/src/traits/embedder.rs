use crate::errors::LecternResult;

/// Injected text-embedding capability.
pub trait IEmbedder: Send + Sync {
    /// Embed a single text, returning a vector of `dimensions()` floats.
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>>;

    /// Embed a batch of texts. The default embeds one at a time and stops at
    /// the first failure.
    fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// The dimensionality of embeddings produced by this embedder.
    fn dimensions(&self) -> usize;

    /// Human-readable embedder name.
    fn name(&self) -> &str;
}
