//! Fixed-width character windows with overlap.

use lectern_core::models::Chunk;

/// Split `text` into windows of `size` characters, each starting
/// `size - overlap` characters after the previous one.
///
/// An overlap of `size` or more still advances one character per window.
/// Returns nothing for empty text or a zero size.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<String> {
    if size == 0 {
        return Vec::new();
    }
    let chars: Vec<char> = text.chars().collect();
    let step = size.saturating_sub(overlap).max(1);

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = (start + size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        start += step;
    }
    chunks
}

/// Chunk a document, tagging every window with the document's `source_ref`.
pub fn chunk_document(text: &str, source_ref: &str, size: usize, overlap: usize) -> Vec<Chunk> {
    chunk_text(text, size, overlap)
        .into_iter()
        .map(|t| Chunk::new(t, source_ref))
        .collect()
}
