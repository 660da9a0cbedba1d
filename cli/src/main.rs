#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use std::io;

use ancla_cli::{
    commands::{self, Cli, Context},
    config::{CliConfig, ConfigPaths},
    logging,
};
use ancla_sdk::AnclaClient;
use anyhow::Context as _;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let paths = ConfigPaths::discover(&cwd);
    tracing::debug!(global = %paths.global.display(), local = ?paths.local, "config files");

    let config = CliConfig::load(&paths, &cli.overrides())?;

    // Resolution already happened in the config layers; the SDK's own env
    // fallback would only re-read the same variables.
    let client = AnclaClient::builder()
        .api_key(config.api_key.clone())
        .server(config.server.clone())
        .build()?;

    let mut ctx = Context::new(client, config, cwd, io::stdout().lock());
    commands::run(cli.command, &mut ctx).await
}
