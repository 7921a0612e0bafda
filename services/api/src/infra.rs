use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_match::talent::{
    CsvAssessmentRepository, DisabledNarrator, MatchRateConfig, TalentAnalysisService,
};

/// Analysis service as wired by the binary: CSV exports, no text backend.
pub(crate) type ApiAnalysisService = TalentAnalysisService<CsvAssessmentRepository, DisabledNarrator>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn analysis_service(data_dir: PathBuf, scoring: MatchRateConfig) -> ApiAnalysisService {
    TalentAnalysisService::new(
        Arc::new(CsvAssessmentRepository::new(data_dir)),
        Arc::new(DisabledNarrator),
        scoring,
    )
}
