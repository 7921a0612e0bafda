//! Normalizes heterogeneous assessment tables into one stream of [`AssessmentRecord`]s.
//!
//! Each source contributes fixed mappings from its native fields to a
//! (group, variable, direction) triple, declared once in [`mapping`]. Null scores and
//! unmatched categories produce no record at all.

mod mapping;
mod normalizer;
pub(crate) mod parser;

pub use mapping::{
    classify_theme, group_for_theme, unification_rules, SourceField, UnificationRule,
};

use crate::talent::domain::{AssessmentRecord, AssessmentSource, AssessmentValue, EmployeeId};
use normalizer::{normalize_code, normalize_label};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One row of the psychometric profile table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsychProfileRow {
    pub employee_id: EmployeeId,
    #[serde(default)]
    pub iq: Option<f64>,
    #[serde(default)]
    pub gtq: Option<f64>,
    #[serde(default)]
    pub tiki: Option<f64>,
    #[serde(default)]
    pub pauli: Option<f64>,
    #[serde(default)]
    pub disc: Option<String>,
    #[serde(default)]
    pub mbti: Option<String>,
}

/// One PAPI Kostick scale score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PapiScoreRow {
    pub employee_id: EmployeeId,
    pub scale_code: String,
    #[serde(default)]
    pub score: Option<f64>,
}

/// One strengths-inventory theme held by an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthRow {
    pub employee_id: EmployeeId,
    pub theme: String,
}

/// Raw rows from every assessment source, as handed over by a repository.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAssessments {
    #[serde(default)]
    pub psych: Vec<PsychProfileRow>,
    #[serde(default)]
    pub papi: Vec<PapiScoreRow>,
    #[serde(default)]
    pub strengths: Vec<StrengthRow>,
}

/// Applies the static rule table and the strengths theme lookup.
#[derive(Debug, Clone, Copy)]
pub struct AssessmentUnifier {
    rules: &'static [UnificationRule],
}

impl Default for AssessmentUnifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl AssessmentUnifier {
    pub fn standard() -> Self {
        Self {
            rules: unification_rules(),
        }
    }

    /// Rule-major output: every rule in table order over its source rows, then strengths.
    pub fn unify(&self, raw: &RawAssessments) -> Vec<AssessmentRecord> {
        let mut records = Vec::new();
        let mut skipped = 0usize;

        for rule in self.rules {
            match rule.source {
                AssessmentSource::ProfilesPsych => {
                    for row in &raw.psych {
                        if let Some(value) = psych_value(rule.field, row) {
                            push_record(&mut records, &mut skipped, &row.employee_id, rule, value);
                        }
                    }
                }
                AssessmentSource::PapiScores => {
                    for row in &raw.papi {
                        if let Some(value) = papi_value(rule.field, row) {
                            push_record(&mut records, &mut skipped, &row.employee_id, rule, value);
                        }
                    }
                }
                AssessmentSource::Strengths => {}
            }
        }

        for row in &raw.strengths {
            if normalize_label(&row.theme).is_empty() {
                continue;
            }
            let (theme, group) = classify_theme(&row.theme);
            match AssessmentRecord::categorical(
                row.employee_id.clone(),
                group,
                &theme,
                &theme,
                AssessmentSource::Strengths,
            ) {
                Ok(record) => records.push(record),
                Err(err) => {
                    skipped += 1;
                    warn!(employee = %row.employee_id, error = %err, "dropping strengths row");
                }
            }
        }

        debug!(records = records.len(), skipped, "unified assessment rows");
        records
    }
}

fn push_record(
    records: &mut Vec<AssessmentRecord>,
    skipped: &mut usize,
    employee_id: &EmployeeId,
    rule: &UnificationRule,
    value: AssessmentValue,
) {
    match AssessmentRecord::new(
        employee_id.clone(),
        rule.group,
        rule.variable,
        value,
        rule.direction,
        rule.source,
    ) {
        Ok(record) => records.push(record),
        Err(err) => {
            *skipped += 1;
            warn!(employee = %employee_id, error = %err, "dropping assessment value");
        }
    }
}

fn psych_value(field: SourceField, row: &PsychProfileRow) -> Option<AssessmentValue> {
    match field {
        SourceField::Iq => row.iq.map(AssessmentValue::Numeric),
        SourceField::Gtq => row.gtq.map(AssessmentValue::Numeric),
        SourceField::Tiki => row.tiki.map(AssessmentValue::Numeric),
        SourceField::Pauli => row.pauli.map(AssessmentValue::Numeric),
        SourceField::Disc(letter) => {
            let disc = normalize_code(row.disc.as_deref()?);
            let mut chars = disc.chars();
            match (chars.next(), chars.next()) {
                (Some(first), None) if first == letter => {
                    Some(AssessmentValue::Categorical(letter.to_string()))
                }
                _ => None,
            }
        }
        SourceField::MbtiLetter { position, letter } => {
            let mbti = normalize_code(row.mbti.as_deref()?);
            (mbti.chars().nth(position) == Some(letter))
                .then(|| AssessmentValue::Categorical(letter.to_string()))
        }
        SourceField::PapiScale(_) => None,
    }
}

fn papi_value(field: SourceField, row: &PapiScoreRow) -> Option<AssessmentValue> {
    match field {
        SourceField::PapiScale(code)
            if normalize_label(&row.scale_code) == normalize_label(code) =>
        {
            row.score.map(AssessmentValue::Numeric)
        }
        _ => None,
    }
}

