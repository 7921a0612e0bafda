use std::collections::BTreeMap;

use serde::Serialize;

use super::views::{GroupComparison, GroupScore, VariableRateView};
use crate::talent::domain::{BenchmarkSet, TalentGroup};
use crate::talent::engine::{round_rate, MatchRateTable};
use crate::talent::ranking::RankedCandidate;

/// Numeric drill-down for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateScores {
    pub candidate: RankedCandidate,
    pub variables: Vec<VariableRateView>,
    /// Taxonomy order, each with the benchmark-cohort mean when one exists.
    pub groups: Vec<GroupComparison>,
    /// Groups from weakest to strongest.
    pub strengths_and_gaps: Vec<GroupScore>,
}

impl CandidateScores {
    pub(crate) fn build(
        candidate: &RankedCandidate,
        table: &MatchRateTable,
        benchmark_means: &BTreeMap<TalentGroup, f64>,
    ) -> Self {
        let employee_id = &candidate.employee_id;

        let variables = table
            .variables_for(employee_id)
            .map(|rate| VariableRateView {
                group: rate.group,
                variable: rate.variable.clone(),
                source: rate.source,
                baseline_score: rate.baseline_score.clone(),
                candidate_score: rate.candidate_score.clone(),
                match_rate: round_rate(rate.match_rate),
            })
            .collect();

        let groups: Vec<GroupComparison> = table
            .groups_for(employee_id)
            .map(|rate| GroupComparison {
                group: rate.group,
                candidate_rate: round_rate(rate.match_rate),
                benchmark_mean: benchmark_means.get(&rate.group).copied().map(round_rate),
            })
            .collect();

        let mut strengths_and_gaps: Vec<GroupScore> = groups
            .iter()
            .map(|comparison| GroupScore {
                group: comparison.group,
                match_rate: comparison.candidate_rate,
            })
            .collect();
        strengths_and_gaps.sort_by(|left, right| left.match_rate.total_cmp(&right.match_rate));

        Self {
            candidate: candidate.clone(),
            variables,
            groups,
            strengths_and_gaps,
        }
    }

    /// Up to `count` groups with the highest rates, strongest first.
    pub fn strongest(&self, count: usize) -> Vec<GroupScore> {
        self.descending().into_iter().take(count).collect()
    }

    /// Up to `count` groups with the lowest rates, still listed strongest first.
    pub fn weakest(&self, count: usize) -> Vec<GroupScore> {
        let descending = self.descending();
        let skip = descending.len().saturating_sub(count);
        descending.into_iter().skip(skip).collect()
    }

    fn descending(&self) -> Vec<GroupScore> {
        let mut scores: Vec<GroupScore> = self
            .groups
            .iter()
            .map(|comparison| GroupScore {
                group: comparison.group,
                match_rate: comparison.candidate_rate,
            })
            .collect();
        scores.sort_by(|left, right| right.match_rate.total_cmp(&left.match_rate));
        scores
    }
}

/// Mean group rate over benchmark members that have that group, unrounded.
pub(crate) fn benchmark_group_means(
    table: &MatchRateTable,
    benchmark: &BenchmarkSet,
) -> BTreeMap<TalentGroup, f64> {
    let mut sums: BTreeMap<TalentGroup, (f64, usize)> = BTreeMap::new();
    for rate in table
        .groups
        .iter()
        .filter(|rate| benchmark.contains(&rate.employee_id))
    {
        let slot = sums.entry(rate.group).or_insert((0.0, 0));
        slot.0 += rate.match_rate;
        slot.1 += 1;
    }

    sums.into_iter()
        .map(|(group, (sum, count))| (group, sum / count as f64))
        .collect()
}

/// One equal-width histogram bucket of final match rates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Histogram of final match rates with an optional highlighted bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MatchRateDistribution {
    pub bins: Vec<DistributionBin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlighted_bin: Option<usize>,
}

pub(crate) fn distribution(
    rates: &[f64],
    bin_count: usize,
    highlight: Option<f64>,
) -> MatchRateDistribution {
    let Some(min) = rates.iter().copied().reduce(f64::min) else {
        return MatchRateDistribution::default();
    };
    let max = rates.iter().copied().fold(min, f64::max);
    let span = max - min;
    let bin_count = if span > 0.0 { bin_count.max(1) } else { 1 };
    let width = if span > 0.0 { span / bin_count as f64 } else { 0.0 };

    let bucket = |value: f64| -> usize {
        if width <= 0.0 {
            return 0;
        }
        (((value - min) / width).floor().max(0.0) as usize).min(bin_count - 1)
    };

    let mut bins: Vec<DistributionBin> = (0..bin_count)
        .map(|index| DistributionBin {
            lower: min + width * index as f64,
            upper: if index + 1 == bin_count {
                max
            } else {
                min + width * (index + 1) as f64
            },
            count: 0,
        })
        .collect();

    for rate in rates {
        bins[bucket(*rate)].count += 1;
    }

    let highlighted_bin = highlight
        .filter(|value| *value >= min && *value <= max)
        .map(bucket);

    MatchRateDistribution {
        bins,
        highlighted_bin,
    }
}
