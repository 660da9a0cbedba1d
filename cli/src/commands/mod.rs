//! `ancla` command tree.
//!
//! Commands that act on part of the hierarchy take an optional positional
//! `PATH` of the form `workspace/project/env/service`. Missing segments fall
//! back to the directory's link context.

mod config;
mod services;
mod workspaces;

use std::io::Write;
use std::path::PathBuf;

use ancla_sdk::AnclaClient;
use anyhow::bail;
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{remove_link, save_link, CliConfig, FlagOverrides, ServicePath};
use crate::output::{write_json, write_line};

pub use config::ConfigCommand;
pub use services::{BuildsCommand, DeploysCommand, ServicesCommand};
pub use workspaces::{EnvsCommand, ProjectsCommand, WorkspacesCommand};

#[derive(Debug, Parser)]
#[command(name = "ancla", version)]
#[command(about = "Manage workspaces, services and deploys on Ancla", long_about = None)]
pub struct Cli {
    /// API server URL (default https://ancla.dev)
    #[arg(long, global = true, value_name = "URL")]
    pub server: Option<String>,

    /// API key; overrides ANCLA_API_KEY and the config file
    #[arg(long, global = true, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Log filter, e.g. `info` or `ancla_sdk=debug` (default: $ANCLA_LOG or warn)
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> FlagOverrides {
        FlagOverrides {
            server: self.server.clone(),
            api_key: self.api_key.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the account behind the configured API key
    Whoami,

    /// Manage workspaces
    #[command(subcommand, visible_alias = "ws")]
    Workspaces(WorkspacesCommand),

    /// Manage projects
    #[command(subcommand)]
    Projects(ProjectsCommand),

    /// Manage environments
    #[command(subcommand)]
    Envs(EnvsCommand),

    /// Manage services
    #[command(subcommand)]
    Services(ServicesCommand),

    /// Inspect and trigger builds
    #[command(subcommand)]
    Builds(BuildsCommand),

    /// Inspect deploys
    #[command(subcommand)]
    Deploys(DeploysCommand),

    /// Manage configuration variables
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Show build and deploy status for a service
    Status {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },

    /// Link the current directory to a workspace, project, env and service
    Link {
        /// ws[/project[/env[/service]]]
        #[arg(value_name = "PATH")]
        path: String,
    },

    /// Remove the current directory's link
    Unlink,
}

/// Everything a command needs to run.
pub struct Context<W> {
    pub client: AnclaClient,
    pub config: CliConfig,
    /// Directory `link`/`unlink` operate on.
    pub cwd: PathBuf,
    pub out: W,
}

impl<W: Write> Context<W> {
    pub const fn new(client: AnclaClient, config: CliConfig, cwd: PathBuf, out: W) -> Self {
        Self {
            client,
            config,
            cwd,
            out,
        }
    }

    /// Resolve a positional path argument against the link context.
    #[must_use]
    pub fn path(&self, arg: Option<&str>) -> ServicePath {
        ServicePath::resolve(arg, &self.config)
    }

    /// # Errors
    /// Returns an error if the value can't be written.
    pub fn print<T: Serialize + ?Sized>(&mut self, value: &T) -> anyhow::Result<()> {
        write_json(&mut self.out, value)
    }

    /// # Errors
    /// Returns an error if the line can't be written.
    pub fn say(&mut self, message: &str) -> anyhow::Result<()> {
        write_line(&mut self.out, message)
    }
}

/// Run one parsed command.
///
/// # Errors
/// Returns an error if the path is incomplete, the API call fails or the
/// output can't be written.
pub async fn run<W: Write>(command: Command, ctx: &mut Context<W>) -> anyhow::Result<()> {
    tracing::debug!(?command, "running command");

    match command {
        Command::Whoami => whoami(ctx).await,
        Command::Workspaces(cmd) => cmd.run(ctx).await,
        Command::Projects(cmd) => cmd.run(ctx).await,
        Command::Envs(cmd) => cmd.run(ctx).await,
        Command::Services(cmd) => cmd.run(ctx).await,
        Command::Builds(cmd) => cmd.run(ctx).await,
        Command::Deploys(cmd) => cmd.run(ctx).await,
        Command::Config(cmd) => cmd.run(ctx).await,
        Command::Status { path } => status(ctx, path.as_deref()).await,
        Command::Link { path } => link(ctx, &path),
        Command::Unlink => unlink(ctx),
    }
}

async fn whoami<W: Write>(ctx: &mut Context<W>) -> anyhow::Result<()> {
    let session = ctx.client.get_session().await?;
    match session.user {
        Some(user) if session.authenticated => ctx.print(&user),
        _ => bail!("not logged in: set ANCLA_API_KEY or pass --api-key"),
    }
}

async fn status<W: Write>(ctx: &mut Context<W>, arg: Option<&str>) -> anyhow::Result<()> {
    let path = ctx.path(arg);
    let (ws, proj, env, svc) = path.service()?;
    let status = ctx.client.pipeline_status(ws, proj, env, svc).await?;
    ctx.print(&status)
}

fn link<W: Write>(ctx: &mut Context<W>, arg: &str) -> anyhow::Result<()> {
    let target = ServicePath::parse(arg);
    target.workspace()?;

    let file = save_link(&ctx.cwd, &target)?;
    tracing::info!(path = %file.display(), link = %target, "linked directory");
    let message = format!("Linked {} to {target}", ctx.cwd.display());
    ctx.say(&message)
}

fn unlink<W: Write>(ctx: &mut Context<W>) -> anyhow::Result<()> {
    if remove_link(&ctx.cwd)? {
        ctx.say("Unlinked")
    } else {
        ctx.say("Not linked")
    }
}

/// Parse `NAME=VALUE`, splitting at the first `=`.
fn split_assignment(input: &str) -> Result<(String, String), String> {
    match input.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got '{input}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ancla",
            "services",
            "list",
            "acme/web/prod",
            "--server",
            "http://localhost:8000",
            "--api-key",
            "k",
        ])
        .expect("should parse");

        let overrides = cli.overrides();
        assert_eq!(overrides.server.as_deref(), Some("http://localhost:8000"));
        assert_eq!(overrides.api_key.as_deref(), Some("k"));
        assert!(matches!(cli.command, Command::Services(_)));
    }

    #[test]
    fn test_split_assignment() {
        assert_eq!(
            split_assignment("DATABASE_URL=postgres://u@h/db?x=1"),
            Ok(("DATABASE_URL".into(), "postgres://u@h/db?x=1".into()))
        );
        assert_eq!(split_assignment("EMPTY="), Ok(("EMPTY".into(), String::new())));
        assert!(split_assignment("=value").is_err());
        assert!(split_assignment("novalue").is_err());
    }
}
