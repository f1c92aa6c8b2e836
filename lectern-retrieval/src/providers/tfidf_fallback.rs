//! Hashed term-frequency embedder.
//!
//! Generates fixed-dimension vectors from term frequencies hashed into
//! buckets. No model files, no network: usable as the injected embedder when
//! nothing better is configured.

use std::collections::HashMap;

use lectern_core::config::EmbeddingConfig;
use lectern_core::errors::LecternResult;
use lectern_core::traits::IEmbedder;

/// Deterministic hashing embedder.
///
/// Latin-script text is split into lowercase words; runs of CJK ideographs
/// (which carry no spaces) are split into overlapping character bigrams.
/// Vectors are L2-normalized, so squared L2 distance ranks like cosine.
pub struct TfIdfEmbedder {
    dimensions: usize,
}

impl TfIdfEmbedder {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    /// Embedder sized by `[embedding] dimensions`.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self::new(config.dimensions)
    }

    /// Hash a term into a bucket index using FNV-1a.
    fn hash_term(term: &str, dims: usize) -> usize {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in term.as_bytes() {
            h ^= *b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (h as usize) % dims
    }

    fn is_cjk(c: char) -> bool {
        matches!(c as u32,
            0x3400..=0x4DBF | 0x4E00..=0x9FFF | 0xF900..=0xFAFF | 0x20000..=0x2A6DF)
    }

    /// Tokenize into lowercase words and CJK bigrams.
    fn tokenize(text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        let mut cjk_run: Vec<char> = Vec::new();

        let flush_word = |word: &mut String, tokens: &mut Vec<String>| {
            if word.chars().count() >= 2 {
                tokens.push(word.to_lowercase());
            }
            word.clear();
        };
        let flush_cjk = |run: &mut Vec<char>, tokens: &mut Vec<String>| {
            match run.len() {
                0 => {}
                1 => tokens.push(run[0].to_string()),
                _ => tokens.extend(run.windows(2).map(|w| w.iter().collect::<String>())),
            }
            run.clear();
        };

        for c in text.chars() {
            if Self::is_cjk(c) {
                flush_word(&mut word, &mut tokens);
                cjk_run.push(c);
            } else if c.is_alphanumeric() || c == '_' {
                flush_cjk(&mut cjk_run, &mut tokens);
                word.push(c);
            } else {
                flush_word(&mut word, &mut tokens);
                flush_cjk(&mut cjk_run, &mut tokens);
            }
        }
        flush_word(&mut word, &mut tokens);
        flush_cjk(&mut cjk_run, &mut tokens);
        tokens
    }

    fn term_vector(&self, text: &str) -> Vec<f32> {
        let tokens = Self::tokenize(text);
        let mut vec = vec![0.0f32; self.dimensions];
        if tokens.is_empty() {
            return vec;
        }

        let mut tf: HashMap<&str, f32> = HashMap::new();
        for tok in &tokens {
            *tf.entry(tok.as_str()).or_default() += 1.0;
        }

        let total = tokens.len() as f32;
        for (term, count) in &tf {
            // Longer terms are rarer; weight them up.
            let idf = 1.0 + (term.chars().count() as f32).ln();
            vec[Self::hash_term(term, self.dimensions)] += (count / total) * idf;
        }

        let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > f32::EPSILON {
            for v in &mut vec {
                *v /= norm;
            }
        }
        vec
    }
}

impl IEmbedder for TfIdfEmbedder {
    fn embed(&self, text: &str) -> LecternResult<Vec<f32>> {
        Ok(self.term_vector(text))
    }

    fn embed_batch(&self, texts: &[String]) -> LecternResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.term_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "tfidf-fallback"
    }
}
