//! Talent match rate analysis: unify assessment sources, derive benchmark baselines,
//! score every employee against them, and rank the result.
//!
//! Every run is a pure computation over one [`repository::AssessmentSnapshot`]; the data
//! source and the text generator are the only collaborators and both sit behind traits.

pub mod baseline;
pub mod domain;
pub mod engine;
pub mod narrative;
pub mod ranking;
pub mod report;
pub mod repository;
pub mod router;
pub mod service;
pub mod unifier;

#[cfg(test)]
mod tests;

pub use baseline::{compute_baselines, BaselineTable, BenchmarkBaseline};
pub use domain::{
    AssessmentRecord, AssessmentSource, AssessmentValue, BenchmarkSet, EmployeeDirectory,
    EmployeeId, EmployeeProfile, RecordError, RoleBrief, ScoringDirection, TalentGroup,
    ValidationError,
};
pub use engine::{
    round_rate, FinalMatchRate, GroupMatchRate, MatchRateConfig, MatchRateEngine,
    MatchRateTable, VariableMatchRate,
};
pub use narrative::{DisabledNarrator, NarrativeError, NarrativeGenerator};
pub use ranking::{rank_candidates, RankedCandidate};
pub use report::{
    CandidateScores, GroupComparison, GroupScore, MatchRateDistribution, RateTableRow,
    TalentAnalysis, DEFAULT_DISTRIBUTION_BINS,
};
pub use repository::{
    AssessmentRepository, AssessmentSnapshot, CsvAssessmentRepository, RepositoryError,
};
pub use router::talent_router;
pub use service::{
    AnalysisError, AnalysisRequest, BenchmarkIds, CandidateDetail, TalentAnalysisService,
};
pub use unifier::{AssessmentUnifier, PapiScoreRow, PsychProfileRow, RawAssessments, StrengthRow};
