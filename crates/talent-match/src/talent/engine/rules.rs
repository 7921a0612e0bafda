use super::super::baseline::BenchmarkBaseline;
use super::super::domain::{AssessmentRecord, ScoringDirection};

const FULL_MATCH: f64 = 100.0;

/// Rate of one record against its baseline, clamped into `[0, ceiling]`.
///
/// A zero or missing numeric baseline floors the rate at 0 instead of excluding it.
pub(crate) fn variable_rate(
    record: &AssessmentRecord,
    baseline: &BenchmarkBaseline,
    ceiling: f64,
) -> f64 {
    let rate = match baseline.direction {
        ScoringDirection::HigherIsBetter => {
            match (record.numeric_value(), baseline.baseline_numeric) {
                (Some(candidate), Some(expected)) if expected > 0.0 => {
                    candidate / expected * FULL_MATCH
                }
                _ => 0.0,
            }
        }
        ScoringDirection::LowerIsBetter => {
            match (record.numeric_value(), baseline.baseline_numeric) {
                (Some(candidate), Some(expected)) if expected > 0.0 => {
                    (2.0 * expected - candidate) / expected * FULL_MATCH
                }
                _ => 0.0,
            }
        }
        ScoringDirection::Categorical => {
            match (
                record.categorical_value(),
                baseline.baseline_categorical.as_deref(),
            ) {
                (Some(candidate), Some(expected)) if candidate == expected => FULL_MATCH,
                _ => 0.0,
            }
        }
    };

    rate.max(0.0).min(ceiling)
}
