use std::collections::BTreeMap;
use std::io::Write;

use clap::Subcommand;

use super::{split_assignment, Context};

#[derive(Debug, Subcommand)]
pub enum ServicesCommand {
    /// List services in an environment
    List {
        /// ws/project/env
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Show one service
    Get {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Set process replica counts
    Scale {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
        /// PROCESS=COUNT, repeatable (e.g. -p web=2 -p worker=1)
        #[arg(
            short = 'p',
            long = "process",
            value_name = "PROCESS=COUNT",
            value_parser = parse_process_count,
            required = true
        )]
        processes: Vec<(String, u32)>,
    },
    /// Build and deploy the service
    Deploy {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
}

fn parse_process_count(input: &str) -> Result<(String, u32), String> {
    let (name, count) = split_assignment(input)?;
    let count = count
        .parse()
        .map_err(|_| format!("count for '{name}' must be a non-negative integer, got '{count}'"))?;
    Ok((name, count))
}

impl ServicesCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env) = path.env()?;
                let services = ctx.client.list_services(ws, proj, env).await?;
                ctx.print(&services)
            }
            Self::Get { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let service = ctx.client.get_service(ws, proj, env, svc).await?;
                ctx.print(&service)
            }
            Self::Scale { path, processes } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let counts: BTreeMap<String, u32> = processes.into_iter().collect();
                ctx.client
                    .scale_service(ws, proj, env, svc, &counts)
                    .await?;
                ctx.print(&counts)
            }
            Self::Deploy { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let result = ctx.client.deploy_service(ws, proj, env, svc).await?;
                ctx.print(&result)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum BuildsCommand {
    /// List builds for a service
    List {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Show the log of one build
    Log {
        version: u32,
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Start a build without deploying it
    Trigger {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
        /// Build strategy, e.g. `dockerfile` or `buildpack`
        #[arg(long)]
        strategy: Option<String>,
    },
}

impl BuildsCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let builds = ctx.client.list_builds(ws, proj, env, svc).await?;
                ctx.print(&builds)
            }
            Self::Log { version, path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let log = ctx
                    .client
                    .get_build_log(ws, proj, env, svc, version)
                    .await?;
                ctx.print(&log)
            }
            Self::Trigger { path, strategy } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let result = ctx
                    .client
                    .create_build(ws, proj, env, svc, strategy.as_deref())
                    .await?;
                ctx.print(&result)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum DeploysCommand {
    /// List deploys for a service
    List {
        /// ws/project/env/service
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Show one deploy
    Get {
        #[arg(value_name = "DEPLOY_ID")]
        id: String,
    },
    /// Show the log of one deploy
    Log {
        #[arg(value_name = "DEPLOY_ID")]
        id: String,
    },
}

impl DeploysCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj, env, svc) = path.service()?;
                let deploys = ctx.client.list_deploys(ws, proj, env, svc).await?;
                ctx.print(&deploys)
            }
            Self::Get { id } => {
                let deploy = ctx.client.get_deploy(&id).await?;
                ctx.print(&deploy)
            }
            Self::Log { id } => {
                let log = ctx.client.get_deploy_log(&id).await?;
                ctx.print(&log)
            }
        }
    }
}
