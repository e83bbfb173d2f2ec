mod cli;
mod config;
mod logging;
mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use sitewatch_engine::{system_clock, JsonFileSiteStore, MonitorService, ReqwestFetcher};
use sitewatch_logging::{monitor_debug, monitor_error};

use cli::{Cli, Command};
use config::AppConfig;
use output::Printer;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            monitor_error!("{err:#}");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command succeeded.
fn run(cli: Cli) -> anyhow::Result<bool> {
    if matches!(cli.command, Command::InitConfig) {
        AppConfig::default().save(&cli.config)?;
        println!("Wrote default config to {}", cli.config.display());
        return Ok(true);
    }

    let config = AppConfig::load(&cli.config)?;
    logging::initialize(
        config.log_destination,
        sitewatch_logging::parse_level(&config.log_level),
    );
    monitor_debug!("Loaded config {:?}", config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(execute(cli, config))
}

async fn execute(cli: Cli, config: AppConfig) -> anyhow::Result<bool> {
    let store = JsonFileSiteStore::open(&config.store_path)
        .with_context(|| format!("failed to open site store {:?}", config.store_path))?;
    let fetcher = ReqwestFetcher::new(config.fetch_settings());
    let service = MonitorService::new(
        Arc::new(store),
        Arc::new(fetcher),
        system_clock(),
        config.max_concurrency,
    );
    let printer = Printer { json: cli.json };

    match cli.command {
        Command::Add { name, url } => {
            let response = service.handle_add_site(&name, &url).await;
            printer.added(&response)?;
            Ok(response.success)
        }
        Command::List => {
            let sites = service.handle_list_sites().await?;
            printer.sites(&sites)?;
            Ok(true)
        }
        Command::Check { id: Some(id) } => {
            let response = service.handle_single_check(&id).await;
            printer.single(&response)?;
            Ok(response.success)
        }
        Command::Check { id: None } => {
            let response = service.handle_manual_check().await;
            printer.batch(&response)?;
            Ok(response.success)
        }
        Command::Remove { id } => {
            let response = service.handle_remove_site(&id).await;
            printer.removed(&response)?;
            Ok(response.success)
        }
        Command::InitConfig => Ok(true),
    }
}
