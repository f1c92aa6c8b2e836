//! Property tests for concurrent quiz recording and class aggregates.

use std::sync::Arc;

use chrono::Utc;
use lectern_core::config::LecternConfig;
use lectern_memory::LearnerStore;
use lectern_session::aggregate::aggregate;
use lectern_session::{SessionCache, SessionOptions};
use proptest::prelude::*;
use test_fixtures::{cnn_vocabulary, KeywordEmbedder, ScriptedExtractor};

const CONCEPTS: [&str; 3] = ["CNN", "pooling", "gradients"];

fn active_session(dir: &std::path::Path) -> SessionCache {
    let mut config = LecternConfig::default();
    config.session.data_dir = dir.to_string_lossy().into_owned();
    let session = SessionCache::new(
        SessionOptions::new("prop"),
        config,
        Arc::new(KeywordEmbedder::new(&cnn_vocabulary())),
        Arc::new(ScriptedExtractor::new()),
    );
    session.start(None).unwrap();
    session
}

fn ops() -> impl Strategy<Value = Vec<(usize, u8)>> {
    prop::collection::vec((0..CONCEPTS.len(), 0u8..=5), 0..30)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Two learners recorded from two threads end up exactly where a
    /// sequential replay of each learner's own results would.
    #[test]
    fn interleaved_learners_match_sequential_replay(a in ops(), b in ops()) {
        let dir = tempfile::tempdir().unwrap();
        let session = active_session(dir.path());

        std::thread::scope(|scope| {
            for (learner, ops) in [("a", &a), ("b", &b)] {
                let session = &session;
                scope.spawn(move || {
                    for &(c, score) in ops {
                        session.record_result(learner, CONCEPTS[c], score).unwrap();
                    }
                });
            }
        });

        prop_assert_eq!(session.stats().memory_updates, (a.len() + b.len()) as u64);
        for (learner, ops) in [("a", &a), ("b", &b)] {
            let now = Utc::now();
            let mut replay = LearnerStore::new(learner, LecternConfig::default().memory, now);
            for &(c, score) in ops {
                replay.record_result_at(CONCEPTS[c], score, now).unwrap();
            }
            let live = session.concept_snapshot(learner).unwrap();
            let expected = replay.snapshot_at(now);
            prop_assert_eq!(live.len(), expected.len());
            for (l, e) in live.iter().zip(&expected) {
                prop_assert_eq!(&l.concept, &e.concept);
                prop_assert_eq!(l.interval, e.interval);
                prop_assert_eq!(l.repetitions, e.repetitions);
                prop_assert_eq!(l.easiness, e.easiness);
            }
        }
    }

    #[test]
    fn aggregate_stays_within_sample_bounds(
        samples in prop::collection::vec((0..CONCEPTS.len(), 0.0f64..=1.0), 0..40),
        threshold in 0.0f64..=1.0,
    ) {
        let agg = aggregate(
            samples.iter().map(|&(c, s)| (CONCEPTS[c].to_string(), s)),
            threshold,
            1,
        );

        prop_assert_eq!(agg.concepts.iter().map(|c| c.count).sum::<usize>(), samples.len());
        for c in &agg.concepts {
            prop_assert!(c.min <= c.average + 1e-12 && c.average <= c.max + 1e-12);
        }
        prop_assert!((0.0..=1.0 + 1e-12).contains(&agg.class_average));
        for w in agg.weak_concepts.windows(2) {
            prop_assert!(w[0].average <= w[1].average);
        }
        prop_assert!(agg.weak_concepts.iter().all(|c| c.average < threshold));
        let weak_expected = agg.concepts.iter().filter(|c| c.average < threshold).count();
        prop_assert_eq!(agg.weak_concepts.len(), weak_expected);
    }
}
