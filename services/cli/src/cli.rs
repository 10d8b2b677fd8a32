use crate::commands::{
    run_dashboard, run_search, run_suggest, DashboardArgs, SearchArgs, SuggestArgs,
};
use crate::demo::{run_demo, DemoArgs};
use clap::{Parser, Subcommand};
use market_match::config::AppConfig;
use market_match::error::AppError;
use market_match::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "market-match",
    about = "Browse a requirements catalog and suggest matching offers and needs",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank open requirements of the opposite type for one listing
    Suggest(SuggestArgs),
    /// Filter the catalog the way the browse view does
    Search(SearchArgs),
    /// Print catalog and contact counters
    Dashboard(DashboardArgs),
    /// Run an end-to-end walkthrough on a built-in sample catalog
    Demo(DemoArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "configuration loaded");

    match cli.command {
        Command::Suggest(args) => run_suggest(args, &config),
        Command::Search(args) => run_search(args),
        Command::Dashboard(args) => run_dashboard(args),
        Command::Demo(args) => run_demo(args, &config),
    }
}
