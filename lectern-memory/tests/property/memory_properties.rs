use chrono::{DateTime, Duration, TimeZone, Utc};
use lectern_core::config::MemoryConfig;
use lectern_memory::LearnerStore;
use proptest::prelude::*;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 12, 3, 14, 0, 0).unwrap()
}

/// Scores with the gap (in hours) before each review.
fn arb_reviews() -> impl Strategy<Value = Vec<(u8, i64)>> {
    prop::collection::vec((0u8..=5, 0i64..2_000), 1..25)
}

fn replay(reviews: &[(u8, i64)]) -> (LearnerStore, DateTime<Utc>) {
    let mut store = LearnerStore::new("p", MemoryConfig::default(), t0());
    let mut now = t0();
    for (score, gap) in reviews {
        now += Duration::hours(*gap);
        store.record_result_at("X", *score, now).unwrap();
    }
    (store, now)
}

proptest! {
    #[test]
    fn strength_is_always_in_unit_interval(reviews in arb_reviews(), later in 0i64..100_000) {
        let (store, now) = replay(&reviews);
        let s = store.strength_of("X", now + Duration::hours(later));
        prop_assert!((0.0..=1.0).contains(&s));
        let p = store.aggregate_progress_at(now + Duration::hours(later));
        prop_assert!((0.0..=1.0).contains(&p.average_strength));
    }
}

proptest! {
    #[test]
    fn easiness_never_below_floor(reviews in arb_reviews()) {
        let mut store = LearnerStore::new("p", MemoryConfig::default(), t0());
        for (i, (score, _)) in reviews.iter().enumerate() {
            store.record_result_at("X", *score, t0() + Duration::hours(i as i64)).unwrap();
            prop_assert!(store.concept("X").unwrap().easiness >= 1.3);
        }
    }
}

proptest! {
    #[test]
    fn failure_always_resets(reviews in arb_reviews(), fail in 0u8..3) {
        let (mut store, now) = replay(&reviews);
        store.record_result_at("X", fail, now + Duration::days(1)).unwrap();
        let state = store.concept("X").unwrap();
        prop_assert_eq!(state.repetitions, 0);
        prop_assert_eq!(state.interval_days, 1);
    }
}

proptest! {
    #[test]
    fn three_successes_from_fresh(scores in prop::array::uniform3(3u8..=5)) {
        let mut store = LearnerStore::new("p", MemoryConfig::default(), t0());
        let mut intervals = Vec::new();
        let mut easiness_before_third = 0.0;
        for (i, score) in scores.iter().enumerate() {
            if i == 2 {
                easiness_before_third = store.concept("X").unwrap().easiness;
            }
            let outcome = store.record_result_at("X", *score, t0() + Duration::days(i as i64)).unwrap();
            intervals.push(outcome.interval_days);
        }
        prop_assert_eq!(intervals[0], 1);
        prop_assert_eq!(intervals[1], 6);
        prop_assert_eq!(intervals[2], (6.0 * easiness_before_third).round() as u32);
    }
}

proptest! {
    #[test]
    fn history_grows_by_one_per_review(reviews in arb_reviews()) {
        let (store, _) = replay(&reviews);
        let state = store.concept("X").unwrap();
        prop_assert_eq!(state.history.len(), reviews.len());
        prop_assert!(state.history.windows(2).all(|w| w[0].time <= w[1].time));
    }
}
