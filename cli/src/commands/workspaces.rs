use std::io::Write;

use clap::Subcommand;

use super::Context;

#[derive(Debug, Subcommand)]
pub enum WorkspacesCommand {
    /// List workspaces you belong to
    List,
    /// Show a workspace and its members
    Get {
        #[arg(value_name = "WORKSPACE")]
        slug: String,
    },
    /// Create a workspace
    Create { name: String },
    /// Delete a workspace
    Delete {
        #[arg(value_name = "WORKSPACE")]
        slug: String,
    },
}

impl WorkspacesCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List => {
                let workspaces = ctx.client.list_workspaces().await?;
                ctx.print(&workspaces)
            }
            Self::Get { slug } => {
                let workspace = ctx.client.get_workspace(&slug).await?;
                ctx.print(&workspace)
            }
            Self::Create { name } => {
                let workspace = ctx.client.create_workspace(&name).await?;
                ctx.print(&workspace)
            }
            Self::Delete { slug } => {
                ctx.client.delete_workspace(&slug).await?;
                ctx.say(&format!("Deleted workspace {slug}"))
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// List projects in a workspace
    List {
        /// ws
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Create a project in a workspace
    Create {
        name: String,
        /// ws
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
}

impl ProjectsCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let path = ctx.path(path.as_deref());
                let projects = ctx.client.list_projects(path.workspace()?).await?;
                ctx.print(&projects)
            }
            Self::Create { name, path } => {
                let path = ctx.path(path.as_deref());
                let project = ctx.client.create_project(path.workspace()?, &name).await?;
                ctx.print(&project)
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum EnvsCommand {
    /// List environments in a project
    List {
        /// ws/project
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Create an environment in a project
    Create {
        name: String,
        /// ws/project
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
}

impl EnvsCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj) = path.project()?;
                let envs = ctx.client.list_environments(ws, proj).await?;
                ctx.print(&envs)
            }
            Self::Create { name, path } => {
                let path = ctx.path(path.as_deref());
                let (ws, proj) = path.project()?;
                let env = ctx.client.create_environment(ws, proj, &name).await?;
                ctx.print(&env)
            }
        }
    }
}
