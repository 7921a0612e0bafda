use super::normalizer::{normalize_label, title_label};
use crate::talent::domain::{AssessmentSource, ScoringDirection, TalentGroup};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Native field of a source row that a rule reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceField {
    Iq,
    Gtq,
    Tiki,
    Pauli,
    /// PAPI Kostick row with the given scale code.
    PapiScale(&'static str),
    /// DISC profile equal to the given letter.
    Disc(char),
    /// MBTI type carrying `letter` at zero-based `position`.
    MbtiLetter { position: usize, letter: char },
}

/// Declarative mapping of one native field to a talent group variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnificationRule {
    pub source: AssessmentSource,
    pub field: SourceField,
    pub group: TalentGroup,
    pub variable: &'static str,
    pub direction: ScoringDirection,
}

const fn rule(
    source: AssessmentSource,
    field: SourceField,
    group: TalentGroup,
    variable: &'static str,
    direction: ScoringDirection,
) -> UnificationRule {
    UnificationRule {
        source,
        field,
        group,
        variable,
        direction,
    }
}

use AssessmentSource::{PapiScores, ProfilesPsych};
use ScoringDirection::{Categorical, HigherIsBetter, LowerIsBetter};
use TalentGroup::*;

#[rustfmt::skip]
static UNIFICATION_RULES: [UnificationRule; 20] = [
    // Cognitive
    rule(ProfilesPsych, SourceField::Iq, CognitiveComplexity, "Overall IQ Score", HigherIsBetter),
    rule(ProfilesPsych, SourceField::Gtq, CognitiveComplexity, "Overall GTQ Score", HigherIsBetter),
    rule(ProfilesPsych, SourceField::Tiki, CognitiveComplexity, "Overall TIKI Score", HigherIsBetter),
    // Motivation
    rule(ProfilesPsych, SourceField::Pauli, MotivationAndDrive, "Initial Performance (Pauli)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_N"), MotivationAndDrive, "Drive to complete tasks (Papi_N)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_G"), MotivationAndDrive, "High effort and persistence (Papi_G)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_A"), MotivationAndDrive, "Desire for achievement (Papi_A)", HigherIsBetter),
    // Leadership
    rule(ProfilesPsych, SourceField::Disc('D'), LeadershipAndInfluence, "Directness, control (DISC D)", Categorical),
    rule(PapiScores, SourceField::PapiScale("Papi_L"), LeadershipAndInfluence, "Tendency to take leadership (Papi_L)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_P"), LeadershipAndInfluence, "Desire to control others (Papi_P)", HigherIsBetter),
    rule(ProfilesPsych, SourceField::MbtiLetter { position: 0, letter: 'E' }, LeadershipAndInfluence, "MBTI Extraversion", Categorical),
    rule(ProfilesPsych, SourceField::MbtiLetter { position: 0, letter: 'I' }, LeadershipAndInfluence, "MBTI Introversion", Categorical),
    // Social, adaptability, conscientiousness
    rule(ProfilesPsych, SourceField::Disc('I'), SocialOrientation, "Sociability, persuasion (DISC I)", Categorical),
    rule(ProfilesPsych, SourceField::Disc('S'), AdaptabilityAndStressTolerance, "Patience, cooperation (DISC S)", Categorical),
    rule(ProfilesPsych, SourceField::Disc('C'), ConscientiousnessAndReliability, "Accuracy, rule orientation (DISC C)", Categorical),
    // Creativity
    rule(ProfilesPsych, SourceField::MbtiLetter { position: 1, letter: 'N' }, CreativityAndInnovation, "MBTI Intuition", Categorical),
    rule(PapiScores, SourceField::PapiScale("Papi_Z"), CreativityAndInnovation, "Drive for variety and novelty (Papi_Z)", LowerIsBetter),
    // Adaptability scales
    rule(PapiScores, SourceField::PapiScale("Papi_T"), AdaptabilityAndStressTolerance, "Work speed preference (Papi_T)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_E"), AdaptabilityAndStressTolerance, "Emotional resilience (Papi_E)", HigherIsBetter),
    rule(PapiScores, SourceField::PapiScale("Papi_K"), LeadershipAndInfluence, "Assertive and firm (Papi_K)", LowerIsBetter),
];

/// Static rule table, in output order.
pub fn unification_rules() -> &'static [UnificationRule] {
    &UNIFICATION_RULES
}

static THEME_GROUPS: OnceLock<HashMap<String, (&'static str, TalentGroup)>> = OnceLock::new();

/// Group a strengths theme belongs to, falling back to [`TalentGroup::OtherStrengths`].
pub fn group_for_theme(theme: &str) -> TalentGroup {
    classify_theme(theme).1
}

/// Canonical theme label plus its group.
///
/// Known themes take the table spelling; unknown ones are title-cased so that any
/// casing of the same theme yields one variable name.
pub fn classify_theme(theme: &str) -> (String, TalentGroup) {
    match theme_groups().get(&normalize_label(theme)) {
        Some((label, group)) => ((*label).to_string(), *group),
        None => (title_label(theme), TalentGroup::OtherStrengths),
    }
}

fn theme_groups() -> &'static HashMap<String, (&'static str, TalentGroup)> {
    THEME_GROUPS.get_or_init(|| {
        const THEME_TO_GROUP: &[(&str, TalentGroup)] = &[
            ("Achiever", MotivationAndDrive),
            ("Arranger", LeadershipAndInfluence),
            ("Command", LeadershipAndInfluence),
            ("Self-Assurance", LeadershipAndInfluence),
            ("Developer", LeadershipAndInfluence),
            ("Belief", CulturalAndValuesUrgency),
            ("Deliberative", ConscientiousnessAndReliability),
            ("Discipline", ConscientiousnessAndReliability),
            ("Communication", SocialOrientation),
            ("Woo", SocialOrientation),
            ("Relator", SocialOrientation),
            ("Adaptability", AdaptabilityAndStressTolerance),
            ("Connectedness", CognitiveComplexity),
            ("Analytical", CognitiveComplexity),
            ("Strategic", CognitiveComplexity),
            ("Futuristic", CreativityAndInnovation),
            ("Ideation", CreativityAndInnovation),
        ];

        THEME_TO_GROUP
            .iter()
            .map(|(theme, group)| (normalize_label(theme), (*theme, *group)))
            .collect()
    })
}
