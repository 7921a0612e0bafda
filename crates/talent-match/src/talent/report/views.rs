use std::collections::HashMap;

use serde::Serialize;

use crate::talent::domain::{AssessmentSource, EmployeeDirectory, EmployeeId, TalentGroup};
use crate::talent::engine::{round_rate, MatchRateTable};

/// Joined row of the full rate table: one per employee and scored variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTableRow {
    pub employee_id: EmployeeId,
    pub fullname: Option<String>,
    pub directorate: Option<String>,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub group: TalentGroup,
    pub variable: String,
    pub source: AssessmentSource,
    pub baseline_score: Option<String>,
    pub candidate_score: String,
    pub variable_match_rate: f64,
    pub group_match_rate: f64,
    pub final_match_rate: f64,
}

/// Group rate paired with a label, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupScore {
    pub group: TalentGroup,
    pub match_rate: f64,
}

/// Variable rate as shown in a candidate drill-down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableRateView {
    pub group: TalentGroup,
    pub variable: String,
    pub source: AssessmentSource,
    pub baseline_score: Option<String>,
    pub candidate_score: String,
    pub match_rate: f64,
}

/// Candidate group rate next to the benchmark-cohort mean for the same group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub group: TalentGroup,
    pub candidate_rate: f64,
    pub benchmark_mean: Option<f64>,
}

pub(crate) fn build_rate_table(
    table: &MatchRateTable,
    directory: &EmployeeDirectory,
) -> Vec<RateTableRow> {
    let group_rates: HashMap<(&EmployeeId, TalentGroup), f64> = table
        .groups
        .iter()
        .map(|rate| ((&rate.employee_id, rate.group), rate.match_rate))
        .collect();
    let final_rates: HashMap<&EmployeeId, f64> = table
        .finals
        .iter()
        .map(|rate| (&rate.employee_id, rate.match_rate))
        .collect();

    table
        .variables
        .iter()
        .map(|rate| {
            let profile = directory.get(&rate.employee_id);
            let group_rate = group_rates
                .get(&(&rate.employee_id, rate.group))
                .copied()
                .unwrap_or_default();
            let final_rate = final_rates
                .get(&rate.employee_id)
                .copied()
                .unwrap_or_default();

            RateTableRow {
                employee_id: rate.employee_id.clone(),
                fullname: profile.map(|profile| profile.fullname.clone()),
                directorate: profile.and_then(|profile| profile.directorate.clone()),
                role: profile.and_then(|profile| profile.role.clone()),
                grade: profile.and_then(|profile| profile.grade.clone()),
                group: rate.group,
                variable: rate.variable.clone(),
                source: rate.source,
                baseline_score: rate.baseline_score.clone(),
                candidate_score: rate.candidate_score.clone(),
                variable_match_rate: round_rate(rate.match_rate),
                group_match_rate: round_rate(group_rate),
                final_match_rate: round_rate(final_rate),
            }
        })
        .collect()
}
