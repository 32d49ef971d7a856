use crate::commands::{
    run_completeness_score, run_journey_report, CompletenessScoreArgs, JourneyReportArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use onboarding_ai::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Digital Employee Onboarding Engine",
    about = "Schedule onboarding journeys and score profile completeness",
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
    /// Planned and projected dates for a Digital Employee journey
    Journey {
        #[command(subcommand)]
        command: JourneyCommand,
    },
    /// Business and technical profile completeness
    Completeness {
        #[command(subcommand)]
        command: CompletenessCommand,
    },
}

#[derive(Subcommand, Debug)]
enum JourneyCommand {
    /// Print the phase timeline and projected go-live date
    Report(JourneyReportArgs),
}

#[derive(Subcommand, Debug)]
enum CompletenessCommand {
    /// Score a profile from an extraction CSV export
    Score(CompletenessScoreArgs),
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
        Command::Journey {
            command: JourneyCommand::Report(args),
        } => run_journey_report(args),
        Command::Completeness {
            command: CompletenessCommand::Score(args),
        } => run_completeness_score(args),
    }
}
