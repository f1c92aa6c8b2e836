/// Triplet extraction errors. Never fatal to a graph build.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("extractor {extractor} failed: {reason}")]
    ExtractorFailed { extractor: String, reason: String },

    #[error("malformed extractor response: {reason}")]
    MalformedResponse { reason: String },
}
