use super::common::*;
use crate::talent::domain::{AssessmentSource, AssessmentValue, ScoringDirection, TalentGroup};
use crate::talent::unifier::{
    AssessmentUnifier, PapiScoreRow, PsychProfileRow, RawAssessments, StrengthRow,
};

fn variables_for<'a>(
    records: &'a [crate::talent::domain::AssessmentRecord],
    employee: &str,
) -> Vec<&'a str> {
    records
        .iter()
        .filter(|record| record.employee_id() == &id(employee))
        .map(|record| record.variable())
        .collect()
}

#[test]
fn output_is_rule_major_with_strengths_last() {
    let records = AssessmentUnifier::standard().unify(&snapshot().assessments);

    let leading: Vec<(&str, String)> = records
        .iter()
        .take(5)
        .map(|record| (record.variable(), record.employee_id().to_string()))
        .collect();
    assert_eq!(
        leading,
        vec![
            ("Overall IQ Score", "E1".to_string()),
            ("Overall IQ Score", "E2".to_string()),
            ("Overall IQ Score", "E3".to_string()),
            ("Overall IQ Score", "E4".to_string()),
            ("Overall GTQ Score", "E1".to_string()),
        ]
    );

    let last = records.last().expect("records produced");
    assert_eq!(last.source(), AssessmentSource::Strengths);
    assert_eq!(last.variable(), "Discipline");
}

#[test]
fn null_scores_produce_no_record() {
    let records = AssessmentUnifier::standard().unify(&snapshot().assessments);
    let e4 = variables_for(&records, "E4");

    assert!(e4.contains(&"Overall IQ Score"));
    assert!(!e4.contains(&"Overall GTQ Score"));
    assert!(!e4.contains(&"Overall TIKI Score"));
}

#[test]
fn categorical_fields_emit_only_matching_letters() {
    let raw = RawAssessments {
        psych: vec![PsychProfileRow {
            employee_id: id("E9"),
            disc: Some(" d ".to_string()),
            mbti: Some("entj".to_string()),
            ..PsychProfileRow::default()
        }],
        ..RawAssessments::default()
    };

    let records = AssessmentUnifier::standard().unify(&raw);
    let variables: Vec<&str> = records.iter().map(|record| record.variable()).collect();
    assert_eq!(
        variables,
        vec![
            "Directness, control (DISC D)",
            "MBTI Extraversion",
            "MBTI Intuition",
        ]
    );
    assert!(records
        .iter()
        .all(|record| record.direction() == ScoringDirection::Categorical));
    assert_eq!(
        records[1].value(),
        &AssessmentValue::Categorical("E".to_string())
    );
}

#[test]
fn blended_disc_profiles_do_not_match_single_letter_rules() {
    let raw = RawAssessments {
        psych: vec![PsychProfileRow {
            employee_id: id("E9"),
            disc: Some("DI".to_string()),
            ..PsychProfileRow::default()
        }],
        ..RawAssessments::default()
    };

    assert!(AssessmentUnifier::standard().unify(&raw).is_empty());
}

#[test]
fn papi_scale_codes_match_case_insensitively() {
    let raw = RawAssessments {
        papi: vec![
            PapiScoreRow {
                employee_id: id("E9"),
                scale_code: "papi_k".to_string(),
                score: Some(4.0),
            },
            PapiScoreRow {
                employee_id: id("E9"),
                scale_code: "Papi_X".to_string(),
                score: Some(7.0),
            },
            PapiScoreRow {
                employee_id: id("E9"),
                scale_code: "Papi_N".to_string(),
                score: None,
            },
        ],
        ..RawAssessments::default()
    };

    let records = AssessmentUnifier::standard().unify(&raw);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].variable(), "Assertive and firm (Papi_K)");
    assert_eq!(records[0].direction(), ScoringDirection::LowerIsBetter);
    assert_eq!(records[0].group(), TalentGroup::LeadershipAndInfluence);
    assert_eq!(records[0].numeric_value(), Some(4.0));
}

#[test]
fn strengths_use_theme_as_variable_and_value() {
    let raw = RawAssessments {
        strengths: vec![
            StrengthRow {
                employee_id: id("E9"),
                theme: " Strategic ".to_string(),
            },
            StrengthRow {
                employee_id: id("E9"),
                theme: "   ".to_string(),
            },
            StrengthRow {
                employee_id: id("E9"),
                theme: "Maximizer".to_string(),
            },
        ],
        ..RawAssessments::default()
    };

    let records = AssessmentUnifier::standard().unify(&raw);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].variable(), "Strategic");
    assert_eq!(records[0].categorical_value(), Some("Strategic"));
    assert_eq!(records[0].group(), TalentGroup::CognitiveComplexity);
    assert_eq!(records[1].group(), TalentGroup::OtherStrengths);
}

#[test]
fn strengths_themes_join_baselines_regardless_of_casing() {
    let raw = RawAssessments {
        strengths: vec![
            StrengthRow {
                employee_id: id("E1"),
                theme: "Achiever".to_string(),
            },
            StrengthRow {
                employee_id: id("E2"),
                theme: "  achiever".to_string(),
            },
            StrengthRow {
                employee_id: id("E2"),
                theme: "MAXIMIZER".to_string(),
            },
        ],
        ..RawAssessments::default()
    };

    let records = AssessmentUnifier::standard().unify(&raw);
    assert_eq!(records[0].variable(), records[1].variable());
    assert_eq!(records[1].categorical_value(), Some("Achiever"));
    assert_eq!(records[2].variable(), "Maximizer");

    let benchmark = crate::talent::domain::BenchmarkSet::parse("E1").expect("valid benchmark");
    let baselines = crate::talent::baseline::compute_baselines(&records, &benchmark);
    let table = crate::talent::engine::MatchRateEngine::default().score(&records, &baselines);
    assert_eq!(table.final_for(&id("E2")).map(|rate| rate.match_rate), Some(100.0));
}
