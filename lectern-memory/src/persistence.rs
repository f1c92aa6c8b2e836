//! One JSON file per learner under `<data_dir>/students`.
//!
//! ```json
//! {
//!   "learnerId": "s1",
//!   "createdAt": "...",
//!   "lastActivityAt": "...",
//!   "concepts": {
//!     "CNN": { "easiness": 2.6, "interval": 6, "repetitions": 2,
//!              "lastReviewAt": "...", "nextReviewAt": "...",
//!              "memoryStrength": 0.93, "history": [ ... ] }
//!   }
//! }
//! ```
//!
//! `memoryStrength` is a snapshot taken at save time for external readers.
//! Loading ignores it; strength is always recomputed.
//!
//! File names are the learner id with every byte outside `[A-Za-z0-9_-]`
//! percent-encoded (`a/b` → `a%2Fb.json`), so any non-empty id maps to one
//! plain file inside the store. The raw id is kept in `learnerId`.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use lectern_core::config::MemoryConfig;
use lectern_core::errors::{LecternResult, PersistenceError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::learner::LearnerStore;
use crate::state::{MemoryState, ReviewRecord};

const STUDENTS_DIR: &str = "students";

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LearnerFile {
    learner_id: String,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
    #[serde(default)]
    concepts: BTreeMap<String, ConceptRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptRecord {
    easiness: f64,
    interval: u32,
    repetitions: u32,
    last_review_at: Option<DateTime<Utc>>,
    next_review_at: Option<DateTime<Utc>>,
    #[serde(default)]
    memory_strength: f64,
    #[serde(default)]
    history: Vec<ReviewRecord>,
}

impl LearnerFile {
    fn from_store(store: &LearnerStore, now: DateTime<Utc>) -> Self {
        Self {
            learner_id: store.learner_id().to_string(),
            created_at: store.created_at(),
            last_activity_at: store.last_activity_at(),
            concepts: store
                .concepts()
                .map(|s| {
                    (
                        s.concept.clone(),
                        ConceptRecord {
                            easiness: s.easiness,
                            interval: s.interval_days,
                            repetitions: s.repetitions,
                            last_review_at: s.last_review_at,
                            next_review_at: s.next_review_at,
                            memory_strength: s.strength_at(now),
                            history: s.history.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    fn into_store(self, path: &Path, config: MemoryConfig) -> LecternResult<LearnerStore> {
        let mut states = Vec::with_capacity(self.concepts.len());
        for (concept, record) in self.concepts {
            if record.interval == 0 || !record.easiness.is_finite() || record.easiness <= 0.0 {
                return Err(PersistenceError::Malformed {
                    path: path.display().to_string(),
                    reason: format!(
                        "concept {concept:?} has interval {} and easiness {}",
                        record.interval, record.easiness
                    ),
                }
                .into());
            }
            states.push(MemoryState {
                concept,
                easiness: record.easiness,
                interval_days: record.interval,
                repetitions: record.repetitions,
                last_review_at: record.last_review_at,
                next_review_at: record.next_review_at,
                history: record.history,
            });
        }
        Ok(LearnerStore::from_parts(
            self.learner_id,
            self.created_at,
            self.last_activity_at,
            states,
            config,
        ))
    }
}

/// Reads and writes learner files in one directory.
pub struct LearnerFileStore {
    dir: PathBuf,
}

impl LearnerFileStore {
    /// Store rooted at `<data_dir>/students`. Nothing is created until a save.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join(STUDENTS_DIR),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a learner's file. Only the empty id is rejected.
    pub fn path_for(&self, learner_id: &str) -> LecternResult<PathBuf> {
        Ok(self.dir.join(format!("{}.json", file_stem(learner_id)?)))
    }

    pub fn exists(&self, learner_id: &str) -> LecternResult<bool> {
        Ok(self.path_for(learner_id)?.is_file())
    }

    /// Load a learner. `Ok(None)` only when no file exists.
    ///
    /// An unreadable or malformed file is an error, never a blank record.
    pub fn load(&self, learner_id: &str, config: MemoryConfig) -> LecternResult<Option<LearnerStore>> {
        let path = self.path_for(learner_id)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        let file: LearnerFile =
            serde_json::from_str(&raw).map_err(|e| PersistenceError::Malformed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        if file.learner_id != learner_id {
            return Err(PersistenceError::Malformed {
                path: path.display().to_string(),
                reason: format!("file belongs to learner {:?}", file.learner_id),
            }
            .into());
        }

        let store = file.into_store(&path, config)?;
        debug!(learner_id, concepts = store.len(), "learner loaded");
        Ok(Some(store))
    }

    /// Load a learner, or start a blank record if none was ever saved.
    pub fn load_or_create(
        &self,
        learner_id: &str,
        config: MemoryConfig,
        now: DateTime<Utc>,
    ) -> LecternResult<LearnerStore> {
        match self.load(learner_id, config.clone())? {
            Some(store) => Ok(store),
            None => {
                debug!(learner_id, "new learner");
                Ok(LearnerStore::new(learner_id, config, now))
            }
        }
    }

    /// Write a learner's file atomically: temporary sibling, then rename.
    pub fn save(&self, store: &LearnerStore, now: DateTime<Utc>) -> LecternResult<PathBuf> {
        let path = self.path_for(store.learner_id())?;
        fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let json = serde_json::to_string_pretty(&LearnerFile::from_store(store, now))?;
        // Stems never start with '.', so the temporary file cannot collide.
        let tmp = self.dir.join(format!(".{}.json.tmp", file_stem(store.learner_id())?));
        fs::write(&tmp, json).map_err(|e| io_error(&tmp, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(&path, e));
        }

        info!(learner_id = store.learner_id(), concepts = store.len(), "learner saved");
        Ok(path)
    }

    /// Ids of every learner with a saved file, sorted.
    pub fn list_learner_ids(&self) -> LecternResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error(&self.dir, e)),
        };

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error(&self.dir, e))?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if name.starts_with('.') {
                continue;
            }
            if let Some(id) = name.strip_suffix(".json").and_then(decode_stem) {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }
}

fn file_stem(id: &str) -> Result<String, PersistenceError> {
    if id.is_empty() {
        return Err(PersistenceError::InvalidLearnerId { id: id.to_string() });
    }
    let mut stem = String::with_capacity(id.len());
    for &b in id.as_bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            stem.push(char::from(b));
        } else {
            stem.push_str(&format!("%{b:02X}"));
        }
    }
    Ok(stem)
}

/// Inverse of `file_stem`; `None` for names this store did not write.
fn decode_stem(stem: &str) -> Option<String> {
    let mut bytes = Vec::with_capacity(stem.len());
    let mut rest = stem.as_bytes();
    while let Some((&b, tail)) = rest.split_first() {
        if b == b'%' {
            let hex = std::str::from_utf8(tail.get(..2)?).ok()?;
            bytes.push(u8::from_str_radix(hex, 16).ok()?);
            rest = &tail[2..];
        } else {
            bytes.push(b);
            rest = tail;
        }
    }
    if bytes.is_empty() {
        return None;
    }
    String::from_utf8(bytes).ok()
}

fn io_error(path: &Path, e: std::io::Error) -> lectern_core::errors::LecternError {
    PersistenceError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_ids_keep_their_name() {
        for id in ["s1", "student_001", "A-7"] {
            assert_eq!(file_stem(id).unwrap(), id);
        }
    }

    #[test]
    fn other_bytes_are_percent_encoded() {
        assert_eq!(file_stem("a/b").unwrap(), "a%2Fb");
        assert_eq!(file_stem("..").unwrap(), "%2E%2E");
        assert_eq!(file_stem(".x").unwrap(), "%2Ex");
        assert_eq!(file_stem("50%").unwrap(), "50%25");
        assert_eq!(file_stem("王").unwrap(), "%E7%8E%8B");
    }

    #[test]
    fn stems_decode_to_the_original_id() {
        for id in ["s1", "a/b", "../x", "a\\b", "王小明", "50%", "tab\there"] {
            assert_eq!(decode_stem(&file_stem(id).unwrap()).as_deref(), Some(id));
        }
    }

    #[test]
    fn foreign_names_do_not_decode() {
        assert_eq!(decode_stem("bad%2"), None);
        assert_eq!(decode_stem("bad%zz"), None);
        assert_eq!(decode_stem("%FF"), None);
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!(file_stem("").is_err());
    }
}
