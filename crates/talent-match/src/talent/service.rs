use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::baseline::compute_baselines;
use super::domain::{BenchmarkSet, EmployeeDirectory, EmployeeId, RoleBrief, ValidationError};
use super::engine::{MatchRateConfig, MatchRateEngine};
use super::narrative::{
    narrate_candidate_summary, narrate_job_profile, CandidateSummaryInput, NarrativeGenerator,
};
use super::ranking::rank_candidates;
use super::report::{CandidateScores, MatchRateDistribution, TalentAnalysis};
use super::repository::{AssessmentRepository, RepositoryError};
use super::unifier::AssessmentUnifier;

/// Number of strongest and weakest groups quoted in a candidate summary.
pub const SUMMARY_GROUPS: usize = 3;

/// Benchmark identifiers as either one comma-separated string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BenchmarkIds {
    Joined(String),
    List(Vec<String>),
}

impl BenchmarkIds {
    pub fn parse(&self) -> Result<BenchmarkSet, ValidationError> {
        match self {
            BenchmarkIds::Joined(raw) => BenchmarkSet::parse(raw),
            BenchmarkIds::List(ids) => BenchmarkSet::from_ids(ids),
        }
    }
}

/// Inputs of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub role: RoleBrief,
    pub benchmark_ids: BenchmarkIds,
}

impl AnalysisRequest {
    /// Validated benchmark set; role fields are checked first.
    pub fn benchmark(&self) -> Result<BenchmarkSet, ValidationError> {
        self.role.validate()?;
        self.benchmark_ids.parse()
    }
}

/// Drill-down for one ranked candidate, including the narrative summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateDetail {
    #[serde(flatten)]
    pub scores: CandidateScores,
    pub summary: String,
    pub distribution: MatchRateDistribution,
}

/// Service composing the data source, unifier, scoring engine, and narrator.
pub struct TalentAnalysisService<R, N> {
    repository: Arc<R>,
    narrator: Arc<N>,
    unifier: AssessmentUnifier,
    engine: MatchRateEngine,
}

impl<R, N> TalentAnalysisService<R, N>
where
    R: AssessmentRepository + 'static,
    N: NarrativeGenerator + 'static,
{
    pub fn new(repository: Arc<R>, narrator: Arc<N>, config: MatchRateConfig) -> Self {
        Self {
            repository,
            narrator,
            unifier: AssessmentUnifier::standard(),
            engine: MatchRateEngine::new(config),
        }
    }

    pub fn config(&self) -> &MatchRateConfig {
        self.engine.config()
    }

    /// Run the whole pipeline for one benchmark set. Nothing is cached between runs.
    ///
    /// Only employees listed in the directory set baselines or get ranked.
    pub fn analyze(&self, request: &AnalysisRequest) -> Result<TalentAnalysis, AnalysisError> {
        let benchmark = request.benchmark()?;
        let snapshot = self.repository.snapshot(&benchmark)?;

        let directory = EmployeeDirectory::from_profiles(snapshot.employees);
        let mut records = self.unifier.unify(&snapshot.assessments);
        let unified = records.len();
        records.retain(|record| directory.contains(record.employee_id()));
        if records.len() < unified {
            warn!(
                dropped = unified - records.len(),
                "ignoring assessment rows of employees missing from the directory"
            );
        }

        let benchmark_records = records
            .iter()
            .filter(|record| benchmark.contains(record.employee_id()))
            .count();
        if benchmark_records == 0 {
            warn!(benchmark = benchmark.len(), "benchmark set has no assessment data");
            return Err(AnalysisError::NoBenchmarkData);
        }

        let baselines = compute_baselines(&records, &benchmark);
        let scores = self.engine.score(&records, &baselines);
        let ranked = rank_candidates(&scores, &directory, self.engine.config().top_strengths);
        let job_profile = narrate_job_profile(self.narrator.as_ref(), &request.role);

        info!(
            role = %request.role.role_name,
            benchmark = benchmark.len(),
            benchmark_records,
            records = records.len(),
            baselines = baselines.len(),
            candidates = ranked.len(),
            "talent analysis complete"
        );

        Ok(TalentAnalysis {
            generated_at: Utc::now(),
            role: request.role.clone(),
            benchmark,
            baselines,
            scores,
            directory,
            ranked,
            job_profile,
        })
    }

    /// Numeric drill-down plus narrative summary for one ranked candidate.
    pub fn candidate_detail(
        &self,
        analysis: &TalentAnalysis,
        employee_id: &EmployeeId,
        bins: usize,
    ) -> Result<CandidateDetail, AnalysisError> {
        let scores = analysis
            .candidate_scores(employee_id)
            .ok_or_else(|| AnalysisError::UnknownCandidate(employee_id.clone()))?;

        let strongest = scores.strongest(SUMMARY_GROUPS);
        let weakest = scores.weakest(SUMMARY_GROUPS);
        let summary = narrate_candidate_summary(
            self.narrator.as_ref(),
            &CandidateSummaryInput {
                role_name: &analysis.role.role_name,
                fullname: scores.candidate.display_name(),
                final_match_rate: scores.candidate.final_match_rate,
                strongest: &strongest,
                weakest: &weakest,
            },
        );
        let distribution = analysis.distribution(bins, Some(employee_id));

        Ok(CandidateDetail {
            scores,
            summary,
            distribution,
        })
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("no assessment data found for the benchmark employees")]
    NoBenchmarkData,
    #[error("employee '{0}' is not among the ranked candidates")]
    UnknownCandidate(EmployeeId),
}
