//! Class-wide retention statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Strength statistics of one concept across the learners who studied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptAggregate {
    pub concept: String,
    pub average: f64,
    pub min: f64,
    pub max: f64,
    /// Learners with a record for this concept.
    pub count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAggregate {
    /// Every concept, in name order.
    pub concepts: Vec<ConceptAggregate>,
    /// Concepts averaging strictly below the weak threshold, weakest first.
    pub weak_concepts: Vec<ConceptAggregate>,
    /// Unweighted mean of the per-concept averages; 0.0 with no concepts.
    pub class_average: f64,
    pub learner_count: usize,
}

/// Aggregate `(concept, strength)` samples, one per learner per concept.
pub fn aggregate(
    samples: impl IntoIterator<Item = (String, f64)>,
    weak_threshold: f64,
    learner_count: usize,
) -> ClassAggregate {
    let mut by_concept: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (concept, strength) in samples {
        by_concept.entry(concept).or_default().push(strength);
    }

    let concepts: Vec<ConceptAggregate> = by_concept
        .into_iter()
        .map(|(concept, strengths)| {
            let count = strengths.len();
            let sum: f64 = strengths.iter().sum();
            ConceptAggregate {
                concept,
                average: sum / count as f64,
                min: strengths.iter().copied().fold(f64::INFINITY, f64::min),
                max: strengths.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                count,
            }
        })
        .collect();

    let class_average = if concepts.is_empty() {
        0.0
    } else {
        concepts.iter().map(|c| c.average).sum::<f64>() / concepts.len() as f64
    };

    let mut weak_concepts: Vec<ConceptAggregate> = concepts
        .iter()
        .filter(|c| c.average < weak_threshold)
        .cloned()
        .collect();
    // Stable: equal averages stay in name order.
    weak_concepts.sort_by(|a, b| {
        a.average
            .partial_cmp(&b.average)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    ClassAggregate {
        concepts,
        weak_concepts,
        class_average,
        learner_count,
    }
}
