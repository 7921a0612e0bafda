use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{BenchmarkSet, EmployeeId, RoleBrief};
use super::narrative::NarrativeGenerator;
use super::ranking::RankedCandidate;
use super::report::{MatchRateDistribution, RateTableRow, TalentAnalysis, DEFAULT_DISTRIBUTION_BINS};
use super::repository::AssessmentRepository;
use super::service::{AnalysisError, AnalysisRequest, TalentAnalysisService};

/// Router builder exposing the analysis endpoints.
pub fn talent_router<R, N>(service: Arc<TalentAnalysisService<R, N>>) -> Router
where
    R: AssessmentRepository + 'static,
    N: NarrativeGenerator + 'static,
{
    Router::new()
        .route("/api/v1/talent/analysis", post(analysis_handler::<R, N>))
        .route(
            "/api/v1/talent/analysis/candidate",
            post(candidate_handler::<R, N>),
        )
        .with_state(service)
}

/// Body of a successful analysis response.
#[derive(Debug, Serialize)]
pub struct AnalysisView {
    pub generated_at: DateTime<Utc>,
    pub role: RoleBrief,
    pub benchmark: BenchmarkSet,
    pub job_profile: String,
    pub ranked: Vec<RankedCandidate>,
    pub rate_table: Vec<RateTableRow>,
    pub distribution: MatchRateDistribution,
}

impl From<TalentAnalysis> for AnalysisView {
    fn from(analysis: TalentAnalysis) -> Self {
        let rate_table = analysis.rate_table();
        let distribution = analysis.distribution(DEFAULT_DISTRIBUTION_BINS, None);
        Self {
            generated_at: analysis.generated_at,
            role: analysis.role,
            benchmark: analysis.benchmark,
            job_profile: analysis.job_profile,
            ranked: analysis.ranked,
            rate_table,
            distribution,
        }
    }
}

/// Analysis inputs plus the candidate to drill into.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateRequest {
    #[serde(flatten)]
    pub analysis: AnalysisRequest,
    pub employee_id: EmployeeId,
}

pub(crate) async fn analysis_handler<R, N>(
    State(service): State<Arc<TalentAnalysisService<R, N>>>,
    axum::Json(request): axum::Json<AnalysisRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    N: NarrativeGenerator + 'static,
{
    match tokio::task::spawn_blocking(move || service.analyze(&request)).await {
        Ok(Ok(analysis)) => {
            (StatusCode::OK, axum::Json(AnalysisView::from(analysis))).into_response()
        }
        Ok(Err(error)) => error_response(error),
        Err(join_error) => task_failed(join_error),
    }
}

pub(crate) async fn candidate_handler<R, N>(
    State(service): State<Arc<TalentAnalysisService<R, N>>>,
    axum::Json(request): axum::Json<CandidateRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
    N: NarrativeGenerator + 'static,
{
    let detail = tokio::task::spawn_blocking(move || {
        service.analyze(&request.analysis).and_then(|analysis| {
            service.candidate_detail(&analysis, &request.employee_id, DEFAULT_DISTRIBUTION_BINS)
        })
    })
    .await;

    match detail {
        Ok(Ok(detail)) => (StatusCode::OK, axum::Json(detail)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => task_failed(join_error),
    }
}

/// HTTP status for each analysis failure.
pub fn status_for(error: &AnalysisError) -> StatusCode {
    match error {
        AnalysisError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::NoBenchmarkData | AnalysisError::UnknownCandidate(_) => {
            StatusCode::NOT_FOUND
        }
        AnalysisError::Repository(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(error: AnalysisError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}

fn task_failed(join_error: tokio::task::JoinError) -> Response {
    error!(error = %join_error, "analysis task did not complete");
    let payload = json!({
        "error": "analysis task did not complete",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
