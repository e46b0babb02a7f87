mod app;
mod cli;
mod commands;
mod config;
mod effects;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;

use console_logging::console_error;

use crate::cli::Cli;
use crate::config::ConsoleConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ConsoleConfig::resolve(cli.config.as_deref(), cli.overrides())?;
    logging::initialize(config.log_destination, cli.verbose);

    let result = commands::run(cli.command, &config).await;
    if let Err(err) = &result {
        console_error!("{:#}", err);
    }
    result
}
