use chrono::{DateTime, Utc};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Retention estimate: `exp(-elapsedDays / (interval × easiness))`.
///
/// Range: 0.0 – 1.0. Never reviewed → 0.0. A review time in the future of
/// `now` counts as zero elapsed time.
pub fn calculate(
    last_review_at: Option<DateTime<Utc>>,
    interval_days: u32,
    easiness: f64,
    now: DateTime<Utc>,
) -> f64 {
    let Some(last) = last_review_at else {
        return 0.0;
    };

    let elapsed_days = (now - last).num_milliseconds().max(0) as f64 / MILLIS_PER_DAY;
    let stability = f64::from(interval_days.max(1)) * easiness;
    if stability.is_nan() || stability <= 0.0 {
        return 0.0;
    }

    (-elapsed_days / stability).exp().clamp(0.0, 1.0)
}

/// Whole days since `last_review_at`, or 999 if never reviewed.
pub fn days_since(last_review_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> i64 {
    match last_review_at {
        Some(last) => (now - last).num_days(),
        None => 999,
    }
}
