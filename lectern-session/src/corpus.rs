//! Where a session's course content comes from.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use lectern_core::config::RetrievalConfig;
use lectern_core::errors::{LecternResult, PersistenceError};
use lectern_core::models::Chunk;
use lectern_retrieval::chunk_document;
use tracing::warn;

/// Course content handed to `SessionCache::start`.
#[derive(Debug, Clone)]
pub enum CorpusSource {
    /// Chunks already split by an upstream parser.
    Chunks(Vec<Chunk>),
    /// Raw text, split with the configured chunk size and overlap.
    Text { text: String, source_ref: String },
    /// A JSON array of `{text, sourceRef}` objects.
    JsonFile(PathBuf),
}

impl CorpusSource {
    /// Resolve to chunks.
    ///
    /// A missing JSON file yields no chunks, since course content may not
    /// exist yet. A file that exists but does not parse is an error.
    pub fn load(&self, config: &RetrievalConfig) -> LecternResult<Vec<Chunk>> {
        match self {
            Self::Chunks(chunks) => Ok(chunks.clone()),
            Self::Text { text, source_ref } => Ok(chunk_document(
                text,
                source_ref,
                config.chunk_size,
                config.chunk_overlap,
            )),
            Self::JsonFile(path) => {
                let raw = match fs::read_to_string(path) {
                    Ok(raw) => raw,
                    Err(e) if e.kind() == ErrorKind::NotFound => {
                        warn!(path = %path.display(), "corpus file not found, starting with an empty retriever");
                        return Ok(Vec::new());
                    }
                    Err(e) => {
                        return Err(PersistenceError::Io {
                            path: path.display().to_string(),
                            reason: e.to_string(),
                        }
                        .into())
                    }
                };
                Ok(serde_json::from_str(&raw)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_source_is_chunked_with_config() {
        let config = RetrievalConfig {
            chunk_size: 4,
            chunk_overlap: 0,
            ..RetrievalConfig::default()
        };
        let source = CorpusSource::Text {
            text: "abcdefgh".to_string(),
            source_ref: "notes".to_string(),
        };
        let chunks = source.load(&config).unwrap();
        assert_eq!(chunks, vec![Chunk::new("abcd", "notes"), Chunk::new("efgh", "notes")]);
    }

    #[test]
    fn missing_json_file_is_empty() {
        let source = CorpusSource::JsonFile(PathBuf::from("/nonexistent/lectern/corpus.json"));
        assert!(source.load(&RetrievalConfig::default()).unwrap().is_empty());
    }
}
