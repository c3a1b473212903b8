use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fundtrack::core::log::init_logging;
use fundtrack::core::ranking::RankMetric;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show fund snapshots, portfolio aggregates and leaderboards
    Dashboard {
        /// Only include funds matching this search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show snapshots for all funds
    List {
        /// Only include funds matching this search term
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Rank funds by daily or period change
    Rank {
        /// Metric to rank by: daily or period
        #[arg(short, long, default_value = "daily")]
        metric: RankMetric,
        /// Number of funds to show
        #[arg(short, long)]
        top: Option<usize>,
        /// Show the worst performers instead
        #[arg(short, long)]
        losers: bool,
    },
    /// Show a single fund with lookback returns
    Fund {
        /// Fund code
        code: String,
    },
}

impl From<Commands> for fundtrack::AppCommand {
    fn from(cmd: Commands) -> fundtrack::AppCommand {
        match cmd {
            Commands::Dashboard { search } => fundtrack::AppCommand::Dashboard { search },
            Commands::List { search } => fundtrack::AppCommand::List { search },
            Commands::Rank {
                metric,
                top,
                losers,
            } => fundtrack::AppCommand::Rank {
                metric,
                top,
                losers,
            },
            Commands::Fund { code } => fundtrack::AppCommand::Fund { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let result = match cli.command {
        Some(Commands::Setup) => fundtrack::cli::setup::setup(),
        Some(cmd) => fundtrack::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
