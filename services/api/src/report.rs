use crate::infra::analysis_service;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use talent_match::config::AppConfig;
use talent_match::error::AppError;
use talent_match::talent::router::AnalysisView;
use talent_match::talent::{
    AnalysisRequest, BenchmarkIds, CandidateDetail, EmployeeId, MatchRateDistribution,
    RankedCandidate, RoleBrief, TalentAnalysis, DEFAULT_DISTRIBUTION_BINS,
};

#[derive(Args, Debug)]
pub(crate) struct AnalyzeArgs {
    /// Comma-separated employee ids of the benchmark high performers
    #[arg(long)]
    pub(crate) benchmark: String,
    /// Role name used for the job profile narrative
    #[arg(long)]
    pub(crate) role_name: String,
    /// Job level used for the job profile narrative
    #[arg(long)]
    pub(crate) job_level: String,
    /// Role purpose used for the job profile narrative
    #[arg(long)]
    pub(crate) role_purpose: String,
    /// Directory holding the CSV exports (defaults to TALENT_DATA_DIR)
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Only show the first N ranked candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Employee id to drill into
    #[arg(long)]
    pub(crate) candidate: Option<String>,
    /// Print JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Serialize)]
struct AnalyzeOutput {
    #[serde(flatten)]
    analysis: AnalysisView,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidate: Option<CandidateDetail>,
}

pub(crate) fn run_analysis(args: AnalyzeArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let data_dir = args.data_dir.clone().unwrap_or(config.data.data_dir);
    let service = analysis_service(data_dir, config.scoring);

    let request = AnalysisRequest {
        role: RoleBrief {
            role_name: args.role_name.clone(),
            job_level: args.job_level.clone(),
            role_purpose: args.role_purpose.clone(),
        },
        benchmark_ids: BenchmarkIds::Joined(args.benchmark.clone()),
    };

    let analysis = service.analyze(&request)?;
    let detail = match args.candidate.as_deref() {
        Some(raw) => Some(service.candidate_detail(
            &analysis,
            &EmployeeId::from(raw.trim()),
            DEFAULT_DISTRIBUTION_BINS,
        )?),
        None => None,
    };

    if args.json {
        let mut view = AnalysisView::from(analysis);
        if let Some(limit) = args.limit {
            view.ranked.truncate(limit);
        }
        let output = AnalyzeOutput {
            analysis: view,
            candidate: detail,
        };
        let rendered = serde_json::to_string_pretty(&output).map_err(std::io::Error::from)?;
        println!("{rendered}");
    } else {
        print!("{}", render_analysis(&analysis, args.limit));
        if let Some(detail) = &detail {
            print!("{}", render_candidate(detail));
        }
    }

    Ok(())
}

pub(crate) fn render_analysis(analysis: &TalentAnalysis, limit: Option<usize>) -> String {
    let role = &analysis.role;
    let benchmark: Vec<&str> = analysis
        .benchmark
        .ids()
        .iter()
        .map(|id| id.0.as_str())
        .collect();

    let mut lines = vec![
        format!("Talent match analysis: {} ({})", role.role_name, role.job_level),
        format!(
            "Benchmark: {} | {} baselines | {} candidates scored",
            benchmark.join(", "),
            analysis.baselines.len(),
            analysis.ranked.len()
        ),
        String::new(),
        "Job profile".to_string(),
    ];
    lines.extend(analysis.job_profile.lines().map(|line| format!("  {line}")));

    let shown = limit.unwrap_or(analysis.ranked.len());
    lines.push(String::new());
    lines.push("Ranked candidates".to_string());
    lines.extend(analysis.ranked.iter().take(shown).map(ranked_line));
    if shown < analysis.ranked.len() {
        lines.push(format!("  ... {} more", analysis.ranked.len() - shown));
    }

    block(lines)
}

fn ranked_line(candidate: &RankedCandidate) -> String {
    let top_group = candidate
        .top_group
        .map(|group| group.label())
        .unwrap_or("-");
    let strengths = if candidate.top_strengths.is_empty() {
        "-".to_string()
    } else {
        candidate.top_strengths.join(", ")
    };

    format!(
        "{:>4}. {:<10} {:<24} {:>7.2}%  {} | {}",
        candidate.rank,
        candidate.employee_id.0,
        candidate.display_name(),
        candidate.final_match_rate,
        top_group,
        strengths
    )
}

pub(crate) fn render_candidate(detail: &CandidateDetail) -> String {
    let candidate = &detail.scores.candidate;

    let mut lines = vec![
        String::new(),
        format!(
            "Candidate {} ({}) rank {} at {:.2}%",
            candidate.display_name(),
            candidate.employee_id.0,
            candidate.rank,
            candidate.final_match_rate
        ),
        "Group rates vs benchmark mean".to_string(),
    ];
    lines.extend(detail.scores.groups.iter().map(|comparison| {
        let benchmark = comparison
            .benchmark_mean
            .map(|mean| format!("{mean:.2}%"))
            .unwrap_or_else(|| "n/a".to_string());
        format!(
            "  {:<40} {:>7.2}%  (benchmark {})",
            comparison.group.label(),
            comparison.candidate_rate,
            benchmark
        )
    }));

    lines.push("Variables".to_string());
    lines.extend(detail.scores.variables.iter().map(|variable| {
        format!(
            "  {:<42} {:>8} vs {:<8} {:>7.2}%",
            variable.variable,
            variable.candidate_score,
            variable.baseline_score.as_deref().unwrap_or("-"),
            variable.match_rate
        )
    }));

    let gaps: Vec<String> = detail
        .scores
        .strengths_and_gaps
        .iter()
        .map(|score| format!("{} {:.2}%", score.group.label(), score.match_rate))
        .collect();
    lines.push(format!("Strengths and gaps (weakest first): {}", gaps.join("; ")));

    lines.push("Summary".to_string());
    lines.extend(detail.summary.lines().map(|line| format!("  {line}")));

    let mut out = block(lines);
    out.push_str(&render_distribution(&detail.distribution));
    out
}

fn render_distribution(distribution: &MatchRateDistribution) -> String {
    if distribution.bins.is_empty() {
        return String::new();
    }

    let mut lines = vec!["Final match rate distribution".to_string()];
    lines.extend(distribution.bins.iter().enumerate().map(|(index, bin)| {
        let marker = if distribution.highlighted_bin == Some(index) {
            " <"
        } else {
            ""
        };
        format!(
            "  {:>7.2} - {:>7.2} | {}{}",
            bin.lower,
            bin.upper,
            "#".repeat(bin.count),
            marker
        )
    }));
    block(lines)
}

/// Newline-terminated text block.
fn block(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
