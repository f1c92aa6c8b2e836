use lectern_core::errors::{ExtractionError, LecternResult};
use lectern_core::models::Triplet;
use lectern_core::traits::ITripletExtractor;

use super::response_parser::parse_triplet_response;

/// Adapts a text-completion function into an `ITripletExtractor`.
///
/// The completion receives the chunk text and returns the raw model output;
/// prompt wording and transport live with the caller. The output is parsed
/// with [`parse_triplet_response`].
pub struct PromptedExtractor<F>
where
    F: Fn(&str) -> LecternResult<String> + Send + Sync,
{
    name: String,
    complete: F,
}

impl<F> PromptedExtractor<F>
where
    F: Fn(&str) -> LecternResult<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, complete: F) -> Self {
        Self {
            name: name.into(),
            complete,
        }
    }
}

impl<F> ITripletExtractor for PromptedExtractor<F>
where
    F: Fn(&str) -> LecternResult<String> + Send + Sync,
{
    fn extract(&self, text: &str) -> LecternResult<Vec<Triplet>> {
        let raw = (self.complete)(text).map_err(|e| ExtractionError::ExtractorFailed {
            extractor: self.name.clone(),
            reason: e.to_string(),
        })?;
        Ok(parse_triplet_response(&raw)?)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
