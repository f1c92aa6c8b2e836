use serde::{Deserialize, Serialize};

/// A unit of ingested course text with its provenance.
///
/// Immutable once ingested. `source_ref` identifies the page or url the text
/// came from and is carried through to every search hit built from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chunk {
    pub text: String,
    pub source_ref: String,
}

impl Chunk {
    pub fn new(text: impl Into<String>, source_ref: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source_ref: source_ref.into(),
        }
    }
}
