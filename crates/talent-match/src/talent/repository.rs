use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{BenchmarkSet, EmployeeProfile};
use super::unifier::parser::parse_rows;
use super::unifier::RawAssessments;

pub const EMPLOYEES_FILE: &str = "employees.csv";
pub const PSYCH_FILE: &str = "profiles_psych.csv";
pub const PAPI_FILE: &str = "papi_scores.csv";
pub const STRENGTHS_FILE: &str = "strengths.csv";

/// Everything the data source knows about at the moment of the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    pub employees: Vec<EmployeeProfile>,
    pub assessments: RawAssessments,
}

/// Read-only data source so the analysis service can be exercised in isolation.
///
/// Implementations return at least every benchmark member plus the candidate pool.
pub trait AssessmentRepository: Send + Sync {
    fn snapshot(&self, benchmark: &BenchmarkSet) -> Result<AssessmentSnapshot, RepositoryError>;
}

/// Error enumeration for data source failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CSV data in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// Directory of CSV exports, one file per source table.
#[derive(Debug, Clone)]
pub struct CsvAssessmentRepository {
    root: PathBuf,
}

impl CsvAssessmentRepository {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn required<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, RepositoryError> {
        let path = self.root.join(name);
        let file = File::open(&path).map_err(|source| RepositoryError::Io {
            path: path.clone(),
            source,
        })?;
        parse_rows(file).map_err(|source| RepositoryError::Csv { path, source })
    }

    fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Vec<T>, RepositoryError> {
        let path = self.root.join(name);
        match File::open(&path) {
            Ok(file) => parse_rows(file).map_err(|source| RepositoryError::Csv { path, source }),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "optional assessment file absent");
                Ok(Vec::new())
            }
            Err(source) => Err(RepositoryError::Io { path, source }),
        }
    }
}

impl AssessmentRepository for CsvAssessmentRepository {
    /// Exports hold the whole organization, so the benchmark only shapes logging.
    fn snapshot(&self, benchmark: &BenchmarkSet) -> Result<AssessmentSnapshot, RepositoryError> {
        let employees: Vec<EmployeeProfile> = self.required(EMPLOYEES_FILE)?;
        let assessments = RawAssessments {
            psych: self.required(PSYCH_FILE)?,
            papi: self.optional(PAPI_FILE)?,
            strengths: self.optional(STRENGTHS_FILE)?,
        };

        info!(
            root = %self.root.display(),
            benchmark = benchmark.len(),
            employees = employees.len(),
            psych = assessments.psych.len(),
            papi = assessments.papi.len(),
            strengths = assessments.strengths.len(),
            "loaded assessment snapshot"
        );

        Ok(AssessmentSnapshot {
            employees,
            assessments,
        })
    }
}
