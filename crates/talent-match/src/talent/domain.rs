use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Identifier wrapper shared by every assessment source and the employee directory.
#[derive(
    Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EmployeeId(pub String);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EmployeeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Broad talent dimension (TGV) that specific test variables roll up into.
///
/// Declaration order is the stable ordering used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TalentGroup {
    #[serde(rename = "Cognitive Complexity & Problem-Solving")]
    CognitiveComplexity,
    #[serde(rename = "Motivation & Drive")]
    MotivationAndDrive,
    #[serde(rename = "Leadership & Influence")]
    LeadershipAndInfluence,
    #[serde(rename = "Social Orientation & Collaboration")]
    SocialOrientation,
    #[serde(rename = "Adaptability & Stress Tolerance")]
    AdaptabilityAndStressTolerance,
    #[serde(rename = "Conscientiousness & Reliability")]
    ConscientiousnessAndReliability,
    #[serde(rename = "Creativity & Innovation Orientation")]
    CreativityAndInnovation,
    #[serde(rename = "Cultural & Values Urgency")]
    CulturalAndValuesUrgency,
    #[serde(rename = "Other Strengths")]
    OtherStrengths,
}

impl TalentGroup {
    pub const ALL: [TalentGroup; 9] = [
        TalentGroup::CognitiveComplexity,
        TalentGroup::MotivationAndDrive,
        TalentGroup::LeadershipAndInfluence,
        TalentGroup::SocialOrientation,
        TalentGroup::AdaptabilityAndStressTolerance,
        TalentGroup::ConscientiousnessAndReliability,
        TalentGroup::CreativityAndInnovation,
        TalentGroup::CulturalAndValuesUrgency,
        TalentGroup::OtherStrengths,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            TalentGroup::CognitiveComplexity => "Cognitive Complexity & Problem-Solving",
            TalentGroup::MotivationAndDrive => "Motivation & Drive",
            TalentGroup::LeadershipAndInfluence => "Leadership & Influence",
            TalentGroup::SocialOrientation => "Social Orientation & Collaboration",
            TalentGroup::AdaptabilityAndStressTolerance => "Adaptability & Stress Tolerance",
            TalentGroup::ConscientiousnessAndReliability => "Conscientiousness & Reliability",
            TalentGroup::CreativityAndInnovation => "Creativity & Innovation Orientation",
            TalentGroup::CulturalAndValuesUrgency => "Cultural & Values Urgency",
            TalentGroup::OtherStrengths => "Other Strengths",
        }
    }
}

impl fmt::Display for TalentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a raw value compares against the benchmark expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringDirection {
    HigherIsBetter,
    LowerIsBetter,
    Categorical,
}

impl ScoringDirection {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringDirection::HigherIsBetter => "higher_is_better",
            ScoringDirection::LowerIsBetter => "lower_is_better",
            ScoringDirection::Categorical => "categorical",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, ScoringDirection::Categorical)
    }
}

/// Provenance tag naming the instrument table a record was unified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    ProfilesPsych,
    PapiScores,
    Strengths,
}

impl AssessmentSource {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentSource::ProfilesPsych => "profiles_psych",
            AssessmentSource::PapiScores => "papi_scores",
            AssessmentSource::Strengths => "strengths",
        }
    }
}

/// Observed value; the enum keeps numeric and categorical payloads mutually exclusive.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AssessmentValue {
    Numeric(f64),
    Categorical(String),
}

impl AssessmentValue {
    /// Text used in presentation tables.
    pub fn display(&self) -> String {
        match self {
            AssessmentValue::Numeric(value) => value.to_string(),
            AssessmentValue::Categorical(label) => label.clone(),
        }
    }
}

/// One observed fact about one employee on one test variable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentRecord {
    employee_id: EmployeeId,
    group: TalentGroup,
    variable: String,
    value: AssessmentValue,
    direction: ScoringDirection,
    source: AssessmentSource,
}

impl AssessmentRecord {
    pub fn new(
        employee_id: EmployeeId,
        group: TalentGroup,
        variable: impl Into<String>,
        value: AssessmentValue,
        direction: ScoringDirection,
        source: AssessmentSource,
    ) -> Result<Self, RecordError> {
        let variable = variable.into();
        match (&value, direction) {
            (AssessmentValue::Numeric(number), direction) if direction.is_numeric() => {
                if !number.is_finite() {
                    return Err(RecordError::NonFiniteValue { variable });
                }
            }
            (AssessmentValue::Categorical(_), ScoringDirection::Categorical) => {}
            _ => return Err(RecordError::DirectionMismatch { variable, direction }),
        }

        Ok(Self {
            employee_id,
            group,
            variable,
            value,
            direction,
            source,
        })
    }

    pub fn numeric(
        employee_id: EmployeeId,
        group: TalentGroup,
        variable: impl Into<String>,
        value: f64,
        direction: ScoringDirection,
        source: AssessmentSource,
    ) -> Result<Self, RecordError> {
        Self::new(
            employee_id,
            group,
            variable,
            AssessmentValue::Numeric(value),
            direction,
            source,
        )
    }

    pub fn categorical(
        employee_id: EmployeeId,
        group: TalentGroup,
        variable: impl Into<String>,
        value: impl Into<String>,
        source: AssessmentSource,
    ) -> Result<Self, RecordError> {
        Self::new(
            employee_id,
            group,
            variable,
            AssessmentValue::Categorical(value.into()),
            ScoringDirection::Categorical,
            source,
        )
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    pub fn group(&self) -> TalentGroup {
        self.group
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn value(&self) -> &AssessmentValue {
        &self.value
    }

    pub fn direction(&self) -> ScoringDirection {
        self.direction
    }

    pub fn source(&self) -> AssessmentSource {
        self.source
    }

    pub fn numeric_value(&self) -> Option<f64> {
        match self.value {
            AssessmentValue::Numeric(value) => Some(value),
            AssessmentValue::Categorical(_) => None,
        }
    }

    pub fn categorical_value(&self) -> Option<&str> {
        match &self.value {
            AssessmentValue::Numeric(_) => None,
            AssessmentValue::Categorical(label) => Some(label),
        }
    }
}

/// Raised when a record would break the value/direction invariant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("variable '{variable}' value does not match scoring direction {}", direction.label())]
    DirectionMismatch {
        variable: String,
        direction: ScoringDirection,
    },
    #[error("variable '{variable}' carries a non-finite numeric value")]
    NonFiniteValue { variable: String },
}

/// Organizational attributes joined onto rate rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub employee_id: EmployeeId,
    pub fullname: String,
    #[serde(default)]
    pub directorate: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
}

/// Lookup of employee profiles keyed by identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeDirectory {
    profiles: BTreeMap<EmployeeId, EmployeeProfile>,
}

impl EmployeeDirectory {
    pub fn from_profiles(profiles: impl IntoIterator<Item = EmployeeProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.employee_id.clone(), profile))
            .collect();
        Self { profiles }
    }

    pub fn get(&self, id: &EmployeeId) -> Option<&EmployeeProfile> {
        self.profiles.get(id)
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.profiles.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

/// Validated, de-duplicated set of benchmark employee identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchmarkSet {
    ids: Vec<EmployeeId>,
    members: BTreeSet<EmployeeId>,
}

impl BenchmarkSet {
    /// Parse a comma-separated identifier list, dropping blanks and repeats.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        Self::from_ids(raw.split(','))
    }

    pub fn from_ids<I, S>(ids: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut members = BTreeSet::new();

        for raw in ids {
            let trimmed = raw.as_ref().trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(ValidationError::InvalidBenchmarkId(trimmed.to_string()));
            }

            let id = EmployeeId(trimmed.to_string());
            if members.insert(id.clone()) {
                ordered.push(id);
            }
        }

        if ordered.is_empty() {
            return Err(ValidationError::EmptyBenchmark);
        }

        Ok(Self {
            ids: ordered,
            members,
        })
    }

    pub fn contains(&self, id: &EmployeeId) -> bool {
        self.members.contains(id)
    }

    pub fn ids(&self) -> &[EmployeeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl Serialize for BenchmarkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.ids)
    }
}

/// Job context supplied alongside the benchmark set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleBrief {
    pub role_name: String,
    pub job_level: String,
    pub role_purpose: String,
}

impl RoleBrief {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("role_name", &self.role_name),
            ("job_level", &self.job_level),
            ("role_purpose", &self.role_purpose),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::MissingRoleField(name));
            }
        }
        Ok(())
    }
}

/// Input problems rejected before any computation starts.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("at least one benchmark employee id is required")]
    EmptyBenchmark,
    #[error("benchmark employee id '{0}' is malformed")]
    InvalidBenchmarkId(String),
    #[error("role field '{0}' is required")]
    MissingRoleField(&'static str),
}
