use crate::report::{run_analysis, AnalyzeArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use talent_match::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Talent Match",
    about = "Rank employees against a benchmark cohort of high performers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one analysis over the CSV exports and print the result
    Analyze(AnalyzeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Analyze(args) => run_analysis(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["talent-match-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn analyze_requires_role_fields() {
        let result = Cli::try_parse_from(["talent-match-api", "analyze", "--benchmark", "E1"]);
        assert!(result.is_err());
    }

    #[test]
    fn analyze_parses_every_flag() {
        let cli = Cli::try_parse_from([
            "talent-match-api",
            "analyze",
            "--benchmark",
            "E1,E2",
            "--role-name",
            "Data Analyst",
            "--job-level",
            "Middle",
            "--role-purpose",
            "Weekly insight",
            "--data-dir",
            "/srv/talent",
            "--limit",
            "5",
            "--candidate",
            "E3",
            "--json",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Analyze(args)) => {
                assert_eq!(args.benchmark, "E1,E2");
                assert_eq!(args.limit, Some(5));
                assert_eq!(args.candidate.as_deref(), Some("E3"));
                assert!(args.json);
            }
            other => panic!("expected analyze command, got {other:?}"),
        }
    }
}
