mod detail;
pub mod views;

pub use detail::{CandidateScores, DistributionBin, MatchRateDistribution};
pub use views::{GroupComparison, GroupScore, RateTableRow, VariableRateView};

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::baseline::BaselineTable;
use super::domain::{BenchmarkSet, EmployeeDirectory, EmployeeId, RoleBrief, TalentGroup};
use super::engine::MatchRateTable;
use super::ranking::RankedCandidate;

pub const DEFAULT_DISTRIBUTION_BINS: usize = 20;

/// Everything one analysis run produced, owned by the caller.
#[derive(Debug, Clone, Serialize)]
pub struct TalentAnalysis {
    pub generated_at: DateTime<Utc>,
    pub role: RoleBrief,
    pub benchmark: BenchmarkSet,
    pub baselines: BaselineTable,
    pub scores: MatchRateTable,
    #[serde(skip)]
    pub directory: EmployeeDirectory,
    pub ranked: Vec<RankedCandidate>,
    pub job_profile: String,
}

impl TalentAnalysis {
    /// Full joined table, one row per employee and scored variable.
    pub fn rate_table(&self) -> Vec<RateTableRow> {
        views::build_rate_table(&self.scores, &self.directory)
    }

    pub fn candidate(&self, employee_id: &EmployeeId) -> Option<&RankedCandidate> {
        self.ranked
            .iter()
            .find(|candidate| &candidate.employee_id == employee_id)
    }

    pub fn benchmark_group_means(&self) -> BTreeMap<TalentGroup, f64> {
        detail::benchmark_group_means(&self.scores, &self.benchmark)
    }

    pub fn candidate_scores(&self, employee_id: &EmployeeId) -> Option<CandidateScores> {
        let candidate = self.candidate(employee_id)?;
        let means = self.benchmark_group_means();
        Some(CandidateScores::build(candidate, &self.scores, &means))
    }

    /// Histogram of ranked final rates, marking `highlight`'s bucket when given.
    pub fn distribution(
        &self,
        bins: usize,
        highlight: Option<&EmployeeId>,
    ) -> MatchRateDistribution {
        let rates: Vec<f64> = self
            .ranked
            .iter()
            .map(|candidate| candidate.final_match_rate)
            .collect();
        let highlight = highlight
            .and_then(|id| self.candidate(id))
            .map(|candidate| candidate.final_match_rate);
        detail::distribution(&rates, bins, highlight)
    }
}
