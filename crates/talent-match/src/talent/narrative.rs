//! Prompt assembly for the external text generator and graceful degradation on failure.
//!
//! The generator is a black box: it receives a finished prompt and returns free text.
//! Failures never abort an analysis; they become an inline error string instead.

use tracing::warn;

use super::domain::RoleBrief;
use super::report::GroupScore;

/// Outbound text-generation hook (an LLM client in production, fakes in tests).
pub trait NarrativeGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String, NarrativeError>;
}

/// Text generation failure.
#[derive(Debug, thiserror::Error)]
pub enum NarrativeError {
    #[error("text generation is not configured")]
    NotConfigured,
    #[error("text generation failed: {0}")]
    Upstream(String),
    #[error("text generation returned an empty response")]
    Empty,
}

/// Generator used when no text backend is wired in; every call degrades inline.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledNarrator;

impl NarrativeGenerator for DisabledNarrator {
    fn generate(&self, _prompt: &str) -> Result<String, NarrativeError> {
        Err(NarrativeError::NotConfigured)
    }
}

/// Structured inputs for a candidate fit summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateSummaryInput<'a> {
    pub role_name: &'a str,
    pub fullname: &'a str,
    pub final_match_rate: f64,
    pub strongest: &'a [GroupScore],
    pub weakest: &'a [GroupScore],
}

pub fn job_profile_prompt(role: &RoleBrief) -> String {
    format!(
        "You are an HR recruitment specialist. Write a concise job profile for the role below.\n\
         Use exactly these three section headers:\n\
         ### Job requirements\n\
         ### Job description\n\
         ### Key competencies\n\
         Rules:\n\
         - Short bullet points or brief sentences, no long paragraphs.\n\
         - Skills as `skill: detail` pairs.\n\
         - Job description: two or three sentences on purpose and responsibilities.\n\
         - Key competencies: a compact list of tools and technical proficiencies.\n\
         Role name: {}\n\
         Job level: {}\n\
         Role purpose: {}\n",
        role.role_name.trim(),
        role.job_level.trim(),
        role.role_purpose.trim()
    )
}

pub fn candidate_summary_prompt(input: &CandidateSummaryInput<'_>) -> String {
    format!(
        "You are a senior talent analyst assessing a candidate for the {} role.\n\
         In two or three sentences, explain why the candidate is a strong or weak fit,\n\
         naming their strongest talent groups and the groups to develop.\n\
         Candidate: {}\n\
         Final match rate: {:.2}%\n\
         Strongest groups: {}\n\
         Weakest groups: {}\n",
        input.role_name.trim(),
        input.fullname,
        input.final_match_rate,
        format_groups(input.strongest),
        format_groups(input.weakest)
    )
}

fn format_groups(scores: &[GroupScore]) -> String {
    if scores.is_empty() {
        return "none".to_string();
    }
    scores
        .iter()
        .map(|score| format!("{} ({:.2}%)", score.group, score.match_rate))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Job profile text, or `Error generating AI profile: ...` when the generator fails.
pub fn narrate_job_profile<N>(narrator: &N, role: &RoleBrief) -> String
where
    N: NarrativeGenerator + ?Sized,
{
    narrate(narrator, &job_profile_prompt(role), "profile")
}

/// Candidate summary text, or `Error generating AI summary: ...` when the generator fails.
pub fn narrate_candidate_summary<N>(narrator: &N, input: &CandidateSummaryInput<'_>) -> String
where
    N: NarrativeGenerator + ?Sized,
{
    narrate(narrator, &candidate_summary_prompt(input), "summary")
}

fn narrate<N>(narrator: &N, prompt: &str, kind: &str) -> String
where
    N: NarrativeGenerator + ?Sized,
{
    let outcome = narrator.generate(prompt).and_then(|text| {
        if text.trim().is_empty() {
            Err(NarrativeError::Empty)
        } else {
            Ok(text)
        }
    });

    match outcome {
        Ok(text) => text,
        Err(err) => {
            warn!(kind, error = %err, "narrative generation degraded");
            format!("Error generating AI {kind}: {err}")
        }
    }
}
