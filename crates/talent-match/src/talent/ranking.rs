use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::domain::{AssessmentSource, EmployeeDirectory, EmployeeId, TalentGroup};
use super::engine::{round_rate, GroupMatchRate, MatchRateTable, VariableMatchRate};

/// One row of the ranked candidate list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub employee_id: EmployeeId,
    pub fullname: Option<String>,
    pub directorate: Option<String>,
    pub role: Option<String>,
    pub grade: Option<String>,
    pub final_match_rate: f64,
    pub top_group: Option<TalentGroup>,
    pub top_strengths: Vec<String>,
}

impl RankedCandidate {
    pub fn display_name(&self) -> &str {
        self.fullname.as_deref().unwrap_or(&self.employee_id.0)
    }
}

/// Rank every scored employee by final match rate, highest first.
///
/// Sorting uses the presented two-decimal rate and is stable, so equal rates keep the
/// order of `table.finals`.
pub fn rank_candidates(
    table: &MatchRateTable,
    directory: &EmployeeDirectory,
    top_strengths: usize,
) -> Vec<RankedCandidate> {
    let mut groups_by_employee: HashMap<&EmployeeId, Vec<&GroupMatchRate>> = HashMap::new();
    for rate in &table.groups {
        groups_by_employee
            .entry(&rate.employee_id)
            .or_default()
            .push(rate);
    }

    let mut strengths_by_employee: HashMap<&EmployeeId, Vec<&VariableMatchRate>> = HashMap::new();
    for rate in table
        .variables
        .iter()
        .filter(|rate| rate.source == AssessmentSource::Strengths)
    {
        strengths_by_employee
            .entry(&rate.employee_id)
            .or_default()
            .push(rate);
    }

    let mut ranked: Vec<RankedCandidate> = table
        .finals
        .iter()
        .map(|final_rate| {
            let employee_id = &final_rate.employee_id;
            let profile = directory.get(employee_id);
            let top_group = groups_by_employee
                .get(employee_id)
                .and_then(|groups| top_group(groups));
            let top_strengths = strengths_by_employee
                .get(employee_id)
                .map(|rates| leading_strengths(rates, top_strengths))
                .unwrap_or_default();

            RankedCandidate {
                rank: 0,
                employee_id: employee_id.clone(),
                fullname: profile.map(|profile| profile.fullname.clone()),
                directorate: profile.and_then(|profile| profile.directorate.clone()),
                role: profile.and_then(|profile| profile.role.clone()),
                grade: profile.and_then(|profile| profile.grade.clone()),
                final_match_rate: round_rate(final_rate.match_rate),
                top_group,
                top_strengths,
            }
        })
        .collect();

    ranked.sort_by(|left, right| {
        right
            .final_match_rate
            .partial_cmp(&left.final_match_rate)
            .unwrap_or(Ordering::Equal)
    });

    for (index, candidate) in ranked.iter_mut().enumerate() {
        candidate.rank = index + 1;
    }

    ranked
}

/// Highest group rate; the first group in taxonomy order wins ties.
fn top_group(groups: &[&GroupMatchRate]) -> Option<TalentGroup> {
    let mut best: Option<&GroupMatchRate> = None;
    for rate in groups {
        match best {
            Some(current) if rate.match_rate <= current.match_rate => {}
            _ => best = Some(rate),
        }
    }
    best.map(|rate| rate.group)
}

/// First `limit` distinct strengths themes in record order.
fn leading_strengths(rates: &[&VariableMatchRate], limit: usize) -> Vec<String> {
    let mut themes: Vec<String> = Vec::new();
    for rate in rates {
        if themes.len() == limit {
            break;
        }
        if !themes.contains(&rate.variable) {
            themes.push(rate.variable.clone());
        }
    }
    themes
}
