pub mod cli;
pub mod core;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::ranking::RankMetric;
use crate::providers::api_provider::FundApiProvider;
use anyhow::Result;
use tracing::{debug, info};

pub enum AppCommand {
    Dashboard {
        search: Option<String>,
    },
    List {
        search: Option<String>,
    },
    Rank {
        metric: RankMetric,
        top: Option<usize>,
        losers: bool,
    },
    Fund {
        code: String,
    },
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Fund tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = FundApiProvider::new(&config.provider)?;

    match command {
        AppCommand::Dashboard { search } => {
            cli::dashboard::run(&provider, search.as_deref(), config.window_days, config.top_n)
                .await
        }
        AppCommand::List { search } => {
            cli::dashboard::list(&provider, search.as_deref(), config.window_days).await
        }
        AppCommand::Rank {
            metric,
            top,
            losers,
        } => {
            cli::rank::run(
                &provider,
                metric,
                top.unwrap_or(config.top_n),
                losers,
                config.window_days,
            )
            .await
        }
        AppCommand::Fund { code } => {
            cli::fund::run(&provider, &code, config.detail_window_days).await
        }
    }
}
