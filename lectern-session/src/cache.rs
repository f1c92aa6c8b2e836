//! SessionCache: owns one retriever and many learner stores for one class.
//!
//! Build and query phases never overlap: the retriever is built under the
//! phase write lock and only published once complete. Afterwards queries
//! clone an `Arc` to the resident state and drop the lock, so `end()` can run
//! while they finish. Quiz results hold the read lock for their whole update,
//! which lets `end()` wait them out before persisting.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use lectern_core::config::LecternConfig;
use lectern_core::errors::{LecternError, LecternResult};
use lectern_core::models::HybridResult;
use lectern_core::traits::{IEmbedder, ITripletExtractor};
use lectern_memory::{
    recommend, ConceptSnapshot, LearnerFileStore, LearnerStore, LearningProgress, QuizScore,
    ReviewCandidate, ReviewOutcome, StudyRecommendation,
};
use lectern_retrieval::HybridRetriever;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::aggregate::{self, ClassAggregate};
use crate::corpus::CorpusSource;
use crate::stats::{SessionStats, SessionSummary, StatsSnapshot};

/// Identity and roster of a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub session_id: String,
    pub course_id: String,
    /// Learners loaded at `start`. Others are admitted on first quiz result.
    pub roster: Vec<String>,
}

impl SessionOptions {
    /// Options with a generated session id and an empty roster.
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            course_id: course_id.into(),
            roster: Vec::new(),
        }
    }

    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_roster<I, S>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = roster.into_iter().map(Into::into).collect();
        self
    }
}

/// Retrieval result plus the asking learner's progress, if any is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub query: String,
    pub retrieval: HybridResult,
    pub learner_progress: Option<LearningProgress>,
}

/// Session status, available in every phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
    pub course_id: String,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_minutes: Option<f64>,
    pub stats: StatsSnapshot,
    pub learner_count: usize,
}

/// Everything resident while the session is active.
struct ActiveSession {
    retriever: Arc<HybridRetriever>,
    learners: DashMap<String, LearnerStore>,
    started_at: DateTime<Utc>,
}

enum Phase {
    Inactive,
    Active(Arc<ActiveSession>),
    /// Persisting learners; new work is refused.
    Ending(Arc<ActiveSession>),
    Ended {
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
        learner_count: usize,
    },
}

/// Lifecycle manager for one class session. Single use: once ended it cannot
/// be restarted.
pub struct SessionCache {
    options: SessionOptions,
    config: LecternConfig,
    embedder: Arc<dyn IEmbedder>,
    extractor: Arc<dyn ITripletExtractor>,
    files: LearnerFileStore,
    phase: RwLock<Phase>,
    stats: SessionStats,
}

impl SessionCache {
    pub fn new(
        options: SessionOptions,
        config: LecternConfig,
        embedder: Arc<dyn IEmbedder>,
        extractor: Arc<dyn ITripletExtractor>,
    ) -> Self {
        let files = LearnerFileStore::new(PathBuf::from(&config.session.data_dir));
        Self {
            options,
            config,
            embedder,
            extractor,
            files,
            phase: RwLock::new(Phase::Inactive),
            stats: SessionStats::new(),
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    /// Build the retriever and load every rostered learner.
    ///
    /// With no source, or a missing corpus file, the retriever is empty but
    /// present. Any failure leaves the session inactive so `start` can be
    /// retried.
    pub fn start(&self, source: Option<CorpusSource>) -> LecternResult<()> {
        let _span = lectern_core::session_start_span!(self.options.session_id).entered();
        let mut phase = self.write_phase()?;
        match &*phase {
            Phase::Inactive => {}
            Phase::Active(_) | Phase::Ending(_) => return Err(LecternError::AlreadyActive),
            Phase::Ended { .. } => return Err(LecternError::SessionEnded),
        }

        let started_at = Utc::now();
        let chunks = match &source {
            Some(source) => source.load(&self.config.retrieval)?,
            None => {
                warn!(course_id = %self.options.course_id, "no course content, starting with an empty retriever");
                Vec::new()
            }
        };
        let retriever = HybridRetriever::build(
            &chunks,
            Arc::clone(&self.embedder),
            self.extractor.as_ref(),
            self.config.retrieval.clone(),
        )?;

        let learners = DashMap::new();
        let roster: BTreeSet<&str> = self.options.roster.iter().map(String::as_str).collect();
        for learner_id in roster {
            let store =
                self.files
                    .load_or_create(learner_id, self.config.memory.clone(), started_at)?;
            learners.insert(learner_id.to_string(), store);
        }

        let stats = retriever.stats();
        let learner_count = learners.len();
        *phase = Phase::Active(Arc::new(ActiveSession {
            retriever: Arc::new(retriever),
            learners,
            started_at,
        }));
        info!(
            session_id = %self.options.session_id,
            course_id = %self.options.course_id,
            chunks = stats.chunks,
            entities = stats.entities,
            relations = stats.relations,
            learners = learner_count,
            "session started"
        );
        Ok(())
    }

    /// Persist every learner, then release the retriever and all stores.
    ///
    /// If any learner fails to save, the session returns to active and the
    /// error is returned; calling `end` again retries every learner.
    ///
    /// The summary counts queries admitted before the session left `Active`.
    /// A query still in flight at that point may be counted in `queries` but
    /// not yet in `cache_hits`. Its learner progress is absent once the
    /// stores have been released.
    pub fn end(&self) -> LecternResult<SessionSummary> {
        let _span = lectern_core::session_end_span!(self.options.session_id).entered();

        // Taking the write lock waits out in-flight quiz results.
        let active = {
            let mut phase = self.write_phase()?;
            let active = match &*phase {
                Phase::Active(active) => Arc::clone(active),
                _ => return Err(LecternError::not_active("end the session")),
            };
            *phase = Phase::Ending(Arc::clone(&active));
            active
        };

        let ended_at = Utc::now();
        if let Err(e) = self.persist_all(&active, ended_at) {
            warn!(error = %e, "persisting learners failed, session stays active");
            *self.write_phase()? = Phase::Active(active);
            return Err(e);
        }

        let learner_count = active.learners.len();
        let started_at = active.started_at;
        active.learners.clear();
        *self.write_phase()? = Phase::Ended {
            started_at,
            ended_at,
            learner_count,
        };
        // In-flight queries keep the retriever alive through their own Arc.
        drop(active);

        let summary = SessionSummary::new(minutes_between(started_at, ended_at), self.stats.snapshot());
        info!(
            session_id = %self.options.session_id,
            duration_minutes = summary.duration_minutes,
            queries = summary.queries,
            memory_updates = summary.memory_updates,
            learners = learner_count,
            "session ended"
        );
        Ok(summary)
    }

    fn persist_all(&self, active: &ActiveSession, now: DateTime<Utc>) -> LecternResult<()> {
        for entry in active.learners.iter() {
            self.files.save(entry.value(), now)?;
        }
        Ok(())
    }

    // ── Serving ──────────────────────────────────────────────────────────

    /// Hybrid search with the configured `top_k`.
    pub fn query(&self, text: &str, learner_id: &str) -> LecternResult<QueryResponse> {
        self.query_with_top_k(text, learner_id, self.config.retrieval.top_k)
    }

    /// Hybrid search plus the learner's progress. Never admits the learner.
    pub fn query_with_top_k(
        &self,
        text: &str,
        learner_id: &str,
        top_k: usize,
    ) -> LecternResult<QueryResponse> {
        let active = self.active("query")?;
        self.stats.record_query();

        let retrieval = active.retriever.hybrid_search(text, top_k)?;
        self.stats.record_cache_hit();

        let now = Utc::now();
        let learner_progress = active
            .learners
            .get(learner_id)
            .map(|store| store.aggregate_progress_at(now));
        debug!(
            learner_id,
            vector_hits = retrieval.vector_results.len(),
            graph_hits = retrieval.graph_results.len(),
            "query served"
        );

        Ok(QueryResponse {
            query: text.to_string(),
            retrieval,
            learner_progress,
        })
    }

    /// Apply a quiz score. Unknown learners are admitted, loading their saved
    /// history first if a file exists.
    pub fn record_result(
        &self,
        learner_id: &str,
        concept: &str,
        score: u8,
    ) -> LecternResult<ReviewOutcome> {
        QuizScore::new(score)?;
        let phase = self.read_phase()?;
        let Phase::Active(active) = &*phase else {
            return Err(LecternError::not_active("record a quiz result"));
        };

        let now = Utc::now();
        let mut store = active
            .learners
            .entry(learner_id.to_string())
            .or_try_insert_with(|| {
                debug!(learner_id, "admitting learner");
                self.files
                    .load_or_create(learner_id, self.config.memory.clone(), now)
            })?;
        let outcome = store.record_result_at(concept, score, now)?;
        self.stats.record_memory_update();
        Ok(outcome)
    }

    /// Retention statistics across every resident learner.
    pub fn class_aggregate(&self) -> LecternResult<ClassAggregate> {
        self.class_aggregate_at(Utc::now())
    }

    pub fn class_aggregate_at(&self, now: DateTime<Utc>) -> LecternResult<ClassAggregate> {
        let active = self.active("aggregate the class")?;
        let mut samples = Vec::new();
        for entry in active.learners.iter() {
            samples.extend(
                entry
                    .concepts()
                    .map(|state| (state.concept.clone(), state.strength_at(now))),
            );
        }
        Ok(aggregate::aggregate(
            samples,
            self.config.session.class_weak_threshold,
            active.learners.len(),
        ))
    }

    /// What `concept` needs next for this learner, with related concepts from
    /// the concept graph.
    pub fn recommend(&self, learner_id: &str, concept: &str) -> LecternResult<StudyRecommendation> {
        let active = self.active("recommend")?;
        let related = active
            .retriever
            .hybrid_search(concept, self.config.retrieval.top_k)?
            .graph_results
            .into_iter()
            .map(|hit| hit.entity);

        let now = Utc::now();
        let recommendation = match active.learners.get(learner_id) {
            Some(store) => recommend(&store, concept, related, now),
            None => {
                let blank = LearnerStore::new(learner_id, self.config.memory.clone(), now);
                recommend(&blank, concept, related, now)
            }
        };
        Ok(recommendation)
    }

    /// Progress of a resident learner, `None` if unknown.
    pub fn learner_progress(&self, learner_id: &str) -> LecternResult<Option<LearningProgress>> {
        let active = self.active("report progress")?;
        let now = Utc::now();
        Ok(active
            .learners
            .get(learner_id)
            .map(|store| store.aggregate_progress_at(now)))
    }

    /// The learner's review queue with the configured threshold and limit.
    pub fn review_queue(&self, learner_id: &str) -> LecternResult<Vec<ReviewCandidate>> {
        let active = self.active("build a review queue")?;
        let now = Utc::now();
        Ok(active
            .learners
            .get(learner_id)
            .map(|store| store.review_queue_at(now))
            .unwrap_or_default())
    }

    /// Every concept's parameters for one learner.
    pub fn concept_snapshot(&self, learner_id: &str) -> LecternResult<Vec<ConceptSnapshot>> {
        let active = self.active("export concepts")?;
        let now = Utc::now();
        Ok(active
            .learners
            .get(learner_id)
            .map(|store| store.snapshot_at(now))
            .unwrap_or_default())
    }

    // ── Status ───────────────────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        matches!(self.read_phase().as_deref(), Ok(Phase::Active(_)))
    }

    pub fn info(&self) -> LecternResult<SessionInfo> {
        let phase = self.read_phase()?;
        let now = Utc::now();
        let (is_active, started_at, ended_at, learner_count) = match &*phase {
            Phase::Inactive => (false, None, None, 0),
            Phase::Active(a) => (true, Some(a.started_at), None, a.learners.len()),
            Phase::Ending(a) => (false, Some(a.started_at), None, a.learners.len()),
            Phase::Ended {
                started_at,
                ended_at,
                learner_count,
            } => (false, Some(*started_at), Some(*ended_at), *learner_count),
        };
        let duration_minutes = started_at.map(|s| minutes_between(s, ended_at.unwrap_or(now)));

        Ok(SessionInfo {
            session_id: self.options.session_id.clone(),
            course_id: self.options.course_id.clone(),
            is_active,
            started_at,
            ended_at,
            duration_minutes,
            stats: self.stats.snapshot(),
            learner_count,
        })
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn session_id(&self) -> &str {
        &self.options.session_id
    }

    pub fn course_id(&self) -> &str {
        &self.options.course_id
    }

    pub fn config(&self) -> &LecternConfig {
        &self.config
    }

    // ── Internals ────────────────────────────────────────────────────────

    /// The resident state, or `NotActive` naming `operation`.
    fn active(&self, operation: &str) -> LecternResult<Arc<ActiveSession>> {
        match &*self.read_phase()? {
            Phase::Active(active) => Ok(Arc::clone(active)),
            _ => Err(LecternError::not_active(operation)),
        }
    }

    fn read_phase(&self) -> LecternResult<RwLockReadGuard<'_, Phase>> {
        self.phase
            .read()
            .map_err(|e| LecternError::ConcurrencyError(format!("session lock poisoned: {e}")))
    }

    fn write_phase(&self) -> LecternResult<RwLockWriteGuard<'_, Phase>> {
        self.phase
            .write()
            .map_err(|e| LecternError::ConcurrencyError(format!("session lock poisoned: {e}")))
    }
}

fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}
