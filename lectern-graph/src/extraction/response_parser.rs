use std::sync::LazyLock;

use lectern_core::errors::ExtractionError;
use lectern_core::models::Triplet;
use regex::Regex;
use serde::Deserialize;

// Reasoning models may emit analysis text before a literal "assistantfinal" marker.
static RE_REASONING_PREAMBLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)^.*?assistantfinal").ok());
static RE_JSON_FENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"```json\s*").ok());

#[derive(Debug, Deserialize)]
struct RawTriplet {
    head: String,
    relation: String,
    tail: String,
}

/// Parse a model response holding a JSON array of `{head, relation, tail}`.
///
/// Strips any reasoning preamble up to `assistantfinal` and Markdown code
/// fences before parsing. Entries with an empty head or tail are dropped.
pub fn parse_triplet_response(raw: &str) -> Result<Vec<Triplet>, ExtractionError> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(ExtractionError::MalformedResponse {
            reason: "empty response".to_string(),
        });
    }

    let parsed: Vec<RawTriplet> =
        serde_json::from_str(&cleaned).map_err(|e| ExtractionError::MalformedResponse {
            reason: e.to_string(),
        })?;

    Ok(parsed
        .into_iter()
        .map(|t| Triplet {
            head: t.head.trim().to_string(),
            relation: t.relation.trim().to_string(),
            tail: t.tail.trim().to_string(),
        })
        .filter(|t| !t.head.is_empty() && !t.tail.is_empty())
        .collect())
}

fn clean(raw: &str) -> String {
    let mut text = raw.to_string();
    if let Some(re) = RE_REASONING_PREAMBLE.as_ref() {
        text = re.replace(&text, "").into_owned();
    }
    if let Some(re) = RE_JSON_FENCE.as_ref() {
        text = re.replace_all(&text, "").into_owned();
    }
    text.replace("```", "").trim().to_string()
}
