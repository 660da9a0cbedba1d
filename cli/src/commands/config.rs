use std::io::Write;

use clap::Subcommand;

use super::{split_assignment, Context};

/// Variables are read and written at the narrowest scope the path reaches:
/// `ws` is the workspace, `ws/proj/env/svc` a single service.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// List variables defined at a scope
    List {
        /// ws[/project[/env[/service]]]
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
    /// Create or overwrite a variable
    Set {
        #[arg(value_name = "NAME=VALUE", value_parser = split_assignment)]
        assignment: (String, String),
        /// ws[/project[/env[/service]]]
        #[arg(value_name = "PATH")]
        path: Option<String>,
        /// Hide the value in API responses
        #[arg(long)]
        secret: bool,
    },
    /// Delete a variable by id
    Delete {
        #[arg(value_name = "VAR_ID")]
        id: String,
        /// ws[/project[/env[/service]]]
        #[arg(value_name = "PATH")]
        path: Option<String>,
    },
}

impl ConfigCommand {
    pub(super) async fn run<W: Write>(self, ctx: &mut Context<W>) -> anyhow::Result<()> {
        match self {
            Self::List { path } => {
                let scope = ctx.path(path.as_deref()).config_scope()?;
                let vars = ctx.client.list_config(&scope).await?;
                ctx.print(&vars)
            }
            Self::Set {
                assignment: (name, value),
                path,
                secret,
            } => {
                let scope = ctx.path(path.as_deref()).config_scope()?;
                let var = ctx.client.set_config(&scope, &name, &value, secret).await?;
                ctx.print(&var)
            }
            Self::Delete { id, path } => {
                let scope = ctx.path(path.as_deref()).config_scope()?;
                ctx.client.delete_config(&scope, &id).await?;
                ctx.say(&format!("Deleted {id} from {scope}"))
            }
        }
    }
}
