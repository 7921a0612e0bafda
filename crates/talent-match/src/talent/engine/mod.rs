mod config;
mod rules;

pub use config::{MatchRateConfig, DEFAULT_RATE_CEILING, DEFAULT_TOP_STRENGTHS};

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracing::debug;

use super::baseline::BaselineTable;
use super::domain::{AssessmentRecord, AssessmentSource, EmployeeId, TalentGroup};

/// Round a rate to two decimals for presentation.
pub fn round_rate(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Stateless scorer turning records plus baselines into the three rate levels.
#[derive(Debug, Clone)]
pub struct MatchRateEngine {
    config: MatchRateConfig,
}

impl Default for MatchRateEngine {
    fn default() -> Self {
        Self::new(MatchRateConfig::default())
    }
}

impl MatchRateEngine {
    pub fn new(config: MatchRateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchRateConfig {
        &self.config
    }

    /// Score every employee present in `records`, not only benchmark members.
    ///
    /// Records without a baseline are left out of every aggregate.
    pub fn score(&self, records: &[AssessmentRecord], baselines: &BaselineTable) -> MatchRateTable {
        let mut variables = Vec::with_capacity(records.len());
        let mut unscored = 0usize;

        for record in records {
            let Some(baseline) = baselines.for_record(record) else {
                unscored += 1;
                continue;
            };

            variables.push(VariableMatchRate {
                employee_id: record.employee_id().clone(),
                group: record.group(),
                variable: record.variable().to_string(),
                source: record.source(),
                baseline_score: baseline.display(),
                candidate_score: record.value().display(),
                match_rate: rules::variable_rate(record, baseline, self.config.rate_ceiling),
            });
        }

        let (groups, finals) = aggregate(&variables);

        debug!(
            scored = variables.len(),
            unscored,
            employees = finals.len(),
            "scored match rates"
        );

        MatchRateTable {
            variables,
            groups,
            finals,
        }
    }
}

fn aggregate(variables: &[VariableMatchRate]) -> (Vec<GroupMatchRate>, Vec<FinalMatchRate>) {
    let mut order: Vec<&EmployeeId> = Vec::new();
    let mut sums: HashMap<&EmployeeId, BTreeMap<TalentGroup, (f64, usize)>> = HashMap::new();

    for rate in variables {
        let per_group = sums.entry(&rate.employee_id).or_insert_with(|| {
            order.push(&rate.employee_id);
            BTreeMap::new()
        });
        let slot = per_group.entry(rate.group).or_insert((0.0, 0));
        slot.0 += rate.match_rate;
        slot.1 += 1;
    }

    let mut groups = Vec::new();
    let mut finals = Vec::with_capacity(order.len());

    for employee_id in order {
        let Some(per_group) = sums.remove(employee_id) else {
            continue;
        };

        let mut total = 0.0;
        let group_count = per_group.len();
        for (group, (sum, count)) in per_group {
            let match_rate = sum / count as f64;
            total += match_rate;
            groups.push(GroupMatchRate {
                employee_id: employee_id.clone(),
                group,
                match_rate,
                variable_count: count,
            });
        }

        finals.push(FinalMatchRate {
            employee_id: employee_id.clone(),
            match_rate: total / group_count as f64,
            group_count,
        });
    }

    (groups, finals)
}

/// One employee's rate on one test variable. `match_rate` is unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableMatchRate {
    pub employee_id: EmployeeId,
    pub group: TalentGroup,
    pub variable: String,
    pub source: AssessmentSource,
    pub baseline_score: Option<String>,
    pub candidate_score: String,
    pub match_rate: f64,
}

/// Unweighted mean of an employee's variable rates within one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMatchRate {
    pub employee_id: EmployeeId,
    pub group: TalentGroup,
    pub match_rate: f64,
    pub variable_count: usize,
}

/// Unweighted mean of an employee's group rates over the groups they have data for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinalMatchRate {
    pub employee_id: EmployeeId,
    pub match_rate: f64,
    pub group_count: usize,
}

/// All three rate levels of one analysis run.
///
/// Employees appear in the order their first scored record was seen; groups follow
/// taxonomy order within an employee.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchRateTable {
    pub variables: Vec<VariableMatchRate>,
    pub groups: Vec<GroupMatchRate>,
    pub finals: Vec<FinalMatchRate>,
}

impl MatchRateTable {
    /// Iterators own a copy of the id, so callers may pass a temporary.
    pub fn variables_for(
        &self,
        employee_id: &EmployeeId,
    ) -> impl Iterator<Item = &VariableMatchRate> + '_ {
        let employee_id = employee_id.clone();
        self.variables
            .iter()
            .filter(move |rate| rate.employee_id == employee_id)
    }

    pub fn groups_for(
        &self,
        employee_id: &EmployeeId,
    ) -> impl Iterator<Item = &GroupMatchRate> + '_ {
        let employee_id = employee_id.clone();
        self.groups
            .iter()
            .filter(move |rate| rate.employee_id == employee_id)
    }

    pub fn group_rate(&self, employee_id: &EmployeeId, group: TalentGroup) -> Option<f64> {
        self.groups
            .iter()
            .find(|rate| &rate.employee_id == employee_id && rate.group == group)
            .map(|rate| rate.match_rate)
    }

    pub fn final_for(&self, employee_id: &EmployeeId) -> Option<&FinalMatchRate> {
        self.finals
            .iter()
            .find(|rate| &rate.employee_id == employee_id)
    }
}

#[cfg(test)]
pub(crate) fn variable_rate_for_tests(
    record: &AssessmentRecord,
    baseline: &super::baseline::BenchmarkBaseline,
    ceiling: f64,
) -> f64 {
    rules::variable_rate(record, baseline, ceiling)
}
