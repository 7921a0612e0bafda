use super::common::*;
use crate::talent::baseline::{compute_baselines, median, mode_for_tests};
use crate::talent::domain::{BenchmarkSet, ScoringDirection, TalentGroup, ValidationError};

#[test]
fn median_interpolates_even_counts() {
    let mut values = vec![40.0, 10.0, 30.0, 20.0];
    assert_eq!(median(&mut values), Some(25.0));
}

#[test]
fn median_of_odd_counts_is_the_middle_value() {
    let mut values = vec![7.0, 3.0, 5.0];
    assert_eq!(median(&mut values), Some(5.0));
    let mut empty: Vec<f64> = Vec::new();
    assert_eq!(median(&mut empty), None);
}

#[test]
fn mode_prefers_most_frequent_then_smallest_label() {
    assert_eq!(mode_for_tests(["I", "E", "I"]), Some("I".to_string()));
    assert_eq!(mode_for_tests(["S", "D", "S", "D"]), Some("D".to_string()));
    assert_eq!(mode_for_tests(std::iter::empty::<&str>()), None);
}

#[test]
fn baselines_only_use_benchmark_members() {
    let records = vec![iq("E1", 100.0), iq("E2", 120.0), iq("E3", 10.0)];
    let benchmark = BenchmarkSet::parse("E1,E2").expect("valid benchmark");

    let table = compute_baselines(&records, &benchmark);
    let baseline = table
        .get(
            TalentGroup::CognitiveComplexity,
            "Overall IQ Score",
            ScoringDirection::HigherIsBetter,
        )
        .expect("iq baseline present");

    assert_eq!(table.len(), 1);
    assert_eq!(baseline.baseline_numeric, Some(110.0));
    assert_eq!(baseline.baseline_categorical, None);
}

#[test]
fn categorical_baseline_is_the_mode() {
    let variable = "MBTI Extraversion";
    let records = vec![
        categorical("E1", TalentGroup::LeadershipAndInfluence, variable, "E"),
        categorical("E2", TalentGroup::LeadershipAndInfluence, variable, "E"),
        categorical("E3", TalentGroup::LeadershipAndInfluence, variable, "E"),
    ];
    let benchmark = BenchmarkSet::parse("E1,E2").expect("valid benchmark");

    let table = compute_baselines(&records, &benchmark);
    let baseline = table
        .get(
            TalentGroup::LeadershipAndInfluence,
            variable,
            ScoringDirection::Categorical,
        )
        .expect("categorical baseline present");
    assert_eq!(baseline.baseline_categorical.as_deref(), Some("E"));
    assert_eq!(baseline.display().as_deref(), Some("E"));
}

#[test]
fn variables_without_benchmark_observations_have_no_baseline() {
    let records = vec![iq("E1", 100.0), iq("E3", 90.0)];
    let benchmark = BenchmarkSet::parse("E2").expect("valid benchmark");

    assert!(compute_baselines(&records, &benchmark).is_empty());
}

#[test]
fn benchmark_parsing_trims_and_deduplicates() {
    let benchmark = BenchmarkSet::parse(" E2, E1 ,,E2 ").expect("valid benchmark");
    assert_eq!(benchmark.ids(), &[id("E2"), id("E1")]);
    assert!(benchmark.contains(&id("E1")));
}

#[test]
fn benchmark_parsing_rejects_empty_and_malformed_input() {
    assert_eq!(
        BenchmarkSet::parse(" , ,"),
        Err(ValidationError::EmptyBenchmark)
    );
    assert_eq!(
        BenchmarkSet::parse("E1,E 2"),
        Err(ValidationError::InvalidBenchmarkId("E 2".to_string()))
    );
}
