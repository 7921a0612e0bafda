use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::talent::domain::{
    AssessmentRecord, AssessmentSource, BenchmarkSet, EmployeeId, EmployeeProfile, RoleBrief,
    ScoringDirection, TalentGroup,
};
use crate::talent::engine::MatchRateConfig;
use crate::talent::narrative::{NarrativeError, NarrativeGenerator};
use crate::talent::repository::{AssessmentRepository, AssessmentSnapshot, RepositoryError};
use crate::talent::service::{AnalysisRequest, BenchmarkIds, TalentAnalysisService};
use crate::talent::talent_router;
use crate::talent::unifier::{PapiScoreRow, PsychProfileRow, RawAssessments, StrengthRow};

pub(super) fn id(raw: &str) -> EmployeeId {
    EmployeeId::from(raw)
}

pub(super) fn numeric(
    employee: &str,
    group: TalentGroup,
    variable: &str,
    value: f64,
    direction: ScoringDirection,
) -> AssessmentRecord {
    AssessmentRecord::numeric(
        id(employee),
        group,
        variable,
        value,
        direction,
        AssessmentSource::ProfilesPsych,
    )
    .expect("valid numeric record")
}

pub(super) fn categorical(
    employee: &str,
    group: TalentGroup,
    variable: &str,
    value: &str,
) -> AssessmentRecord {
    AssessmentRecord::categorical(
        id(employee),
        group,
        variable,
        value,
        AssessmentSource::ProfilesPsych,
    )
    .expect("valid categorical record")
}

pub(super) fn iq(employee: &str, value: f64) -> AssessmentRecord {
    numeric(
        employee,
        TalentGroup::CognitiveComplexity,
        "Overall IQ Score",
        value,
        ScoringDirection::HigherIsBetter,
    )
}

pub(super) fn role() -> RoleBrief {
    RoleBrief {
        role_name: "Data Analyst".to_string(),
        job_level: "Middle".to_string(),
        role_purpose: "Turn operational data into weekly business insight".to_string(),
    }
}

pub(super) fn request(benchmark: &str) -> AnalysisRequest {
    AnalysisRequest {
        role: role(),
        benchmark_ids: BenchmarkIds::Joined(benchmark.to_string()),
    }
}

fn profile(employee: &str, fullname: &str, grade: &str) -> EmployeeProfile {
    EmployeeProfile {
        employee_id: id(employee),
        fullname: fullname.to_string(),
        directorate: Some("Commercial".to_string()),
        role: Some("Data Analyst".to_string()),
        grade: Some(grade.to_string()),
    }
}

#[allow(clippy::too_many_arguments)]
fn psych(
    employee: &str,
    iq: Option<f64>,
    gtq: Option<f64>,
    tiki: Option<f64>,
    pauli: Option<f64>,
    disc: &str,
    mbti: &str,
) -> PsychProfileRow {
    PsychProfileRow {
        employee_id: id(employee),
        iq,
        gtq,
        tiki,
        pauli,
        disc: Some(disc.to_string()),
        mbti: Some(mbti.to_string()),
    }
}

fn papi(employee: &str, scale: &str, score: f64) -> PapiScoreRow {
    PapiScoreRow {
        employee_id: id(employee),
        scale_code: scale.to_string(),
        score: Some(score),
    }
}

fn strength(employee: &str, theme: &str) -> StrengthRow {
    StrengthRow {
        employee_id: id(employee),
        theme: theme.to_string(),
    }
}

/// Four employees; E1 and E2 form the usual benchmark.
///
/// With benchmark `E1,E2` the final rates are roughly E2 102.3, E3 100.0, E1 96.9 and
/// E4 64.1.
pub(super) fn snapshot() -> AssessmentSnapshot {
    AssessmentSnapshot {
        employees: vec![
            profile("E1", "Ayu Lestari", "IV"),
            profile("E2", "Budi Santoso", "V"),
            profile("E3", "Citra Dewi", "IV"),
            profile("E4", "Dimas Pratama", "III"),
        ],
        assessments: RawAssessments {
            psych: vec![
                psych("E1", Some(100.0), Some(30.0), Some(8.0), Some(50.0), "D", "ENTJ"),
                psych("E2", Some(120.0), Some(34.0), Some(10.0), Some(70.0), "D", "INTJ"),
                psych("E3", Some(110.0), Some(32.0), Some(9.0), Some(60.0), "I", "ESFP"),
                psych("E4", Some(90.0), None, None, Some(40.0), "C", "ISTJ"),
            ],
            papi: vec![
                papi("E1", "Papi_N", 6.0),
                papi("E1", "Papi_Z", 4.0),
                papi("E2", "Papi_N", 8.0),
                papi("E2", "Papi_Z", 6.0),
                papi("E3", "Papi_N", 7.0),
                papi("E3", "Papi_Z", 5.0),
                papi("E4", "Papi_N", 3.0),
                papi("E4", "Papi_Z", 9.0),
            ],
            strengths: vec![
                strength("E1", "Achiever"),
                strength("E1", "Futuristic"),
                strength("E2", "Achiever"),
                strength("E3", "Achiever"),
                strength("E3", "Woo"),
                strength("E4", "Discipline"),
            ],
        },
    }
}

pub(super) fn build_service(
    narrator: ScriptedNarrator,
) -> (
    TalentAnalysisService<MemoryRepository, ScriptedNarrator>,
    Arc<MemoryRepository>,
    Arc<ScriptedNarrator>,
) {
    let repository = Arc::new(MemoryRepository::new(snapshot()));
    let narrator = Arc::new(narrator);
    let service = TalentAnalysisService::new(
        repository.clone(),
        narrator.clone(),
        MatchRateConfig::default(),
    );
    (service, repository, narrator)
}

pub(super) fn talent_router_with_service(
    service: TalentAnalysisService<MemoryRepository, ScriptedNarrator>,
) -> axum::Router {
    talent_router(Arc::new(service))
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    snapshot: AssessmentSnapshot,
    fetches: AtomicUsize,
}

impl MemoryRepository {
    pub(super) fn new(snapshot: AssessmentSnapshot) -> Self {
        Self {
            snapshot,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(super) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl AssessmentRepository for MemoryRepository {
    fn snapshot(&self, _benchmark: &BenchmarkSet) -> Result<AssessmentSnapshot, RepositoryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot.clone())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn snapshot(&self, _benchmark: &BenchmarkSet) -> Result<AssessmentSnapshot, RepositoryError> {
        Err(RepositoryError::Unavailable("warehouse offline".to_string()))
    }
}

pub(super) struct FailingNarrator;

impl NarrativeGenerator for FailingNarrator {
    fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::Upstream("quota exhausted".to_string()))
    }
}

/// Returns a fixed reply and remembers every prompt it was given.
pub(super) struct ScriptedNarrator {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedNarrator {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("narrator mutex poisoned").clone()
    }
}

impl NarrativeGenerator for ScriptedNarrator {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError> {
        self.prompts
            .lock()
            .expect("narrator mutex poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
