mod embedder;
mod extractor;

pub use embedder::IEmbedder;
pub use extractor::ITripletExtractor;
