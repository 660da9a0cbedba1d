use std::fmt;

use super::workspaces::team_path;
use super::{env_path, project_path, segment, service_path, workspace_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{BulkSetConfigRequest, ConfigVar, SetConfigVar};

/// Level of the hierarchy a configuration variable is attached to.
///
/// Values set at a narrower scope override broader ones when the server
/// resolves a service's effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConfigScope {
    Workspace {
        workspace: String,
    },
    Team {
        workspace: String,
        team: String,
    },
    Project {
        workspace: String,
        project: String,
    },
    Environment {
        workspace: String,
        project: String,
        env: String,
    },
    Service {
        workspace: String,
        project: String,
        env: String,
        service: String,
    },
}

impl ConfigScope {
    pub fn workspace(workspace: impl Into<String>) -> Self {
        Self::Workspace {
            workspace: workspace.into(),
        }
    }

    pub fn team(workspace: impl Into<String>, team: impl Into<String>) -> Self {
        Self::Team {
            workspace: workspace.into(),
            team: team.into(),
        }
    }

    pub fn project(workspace: impl Into<String>, project: impl Into<String>) -> Self {
        Self::Project {
            workspace: workspace.into(),
            project: project.into(),
        }
    }

    pub fn environment(
        workspace: impl Into<String>,
        project: impl Into<String>,
        env: impl Into<String>,
    ) -> Self {
        Self::Environment {
            workspace: workspace.into(),
            project: project.into(),
            env: env.into(),
        }
    }

    pub fn service(
        workspace: impl Into<String>,
        project: impl Into<String>,
        env: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self::Service {
            workspace: workspace.into(),
            project: project.into(),
            env: env.into(),
            service: service.into(),
        }
    }

    /// Path of the owning resource, without the `/config/` suffix.
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Workspace { workspace } => workspace_path(workspace),
            Self::Team { workspace, team } => team_path(workspace, team),
            Self::Project { workspace, project } => project_path(workspace, project),
            Self::Environment {
                workspace,
                project,
                env,
            } => env_path(workspace, project, env),
            Self::Service {
                workspace,
                project,
                env,
                service,
            } => service_path(workspace, project, env, service),
        }
    }

    /// Short name matching [`ConfigVar::scope`].
    #[must_use]
    pub const fn level(&self) -> &'static str {
        match self {
            Self::Workspace { .. } => "workspace",
            Self::Team { .. } => "team",
            Self::Project { .. } => "project",
            Self::Environment { .. } => "env",
            Self::Service { .. } => "service",
        }
    }

    fn config_path(&self) -> String {
        format!("{}/config/", self.path())
    }
}

impl fmt::Display for ConfigScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Workspace { workspace } => write!(f, "{workspace}"),
            Self::Team { workspace, team } => write!(f, "{workspace} (team {team})"),
            Self::Project { workspace, project } => write!(f, "{workspace}/{project}"),
            Self::Environment {
                workspace,
                project,
                env,
            } => write!(f, "{workspace}/{project}/{env}"),
            Self::Service {
                workspace,
                project,
                env,
                service,
            } => write!(f, "{workspace}/{project}/{env}/{service}"),
        }
    }
}

impl AnclaClient {
    /// Variables defined directly at `scope`, not inherited ones.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_config(&self, scope: &ConfigScope) -> Result<Vec<ConfigVar>, AnclaError> {
        self.get(&scope.config_path()).await
    }

    /// Create or overwrite one variable at `scope`.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn set_config(
        &self,
        scope: &ConfigScope,
        key: &str,
        value: &str,
        secret: bool,
    ) -> Result<ConfigVar, AnclaError> {
        let body = SetConfigVar::new(key, value).secret(secret);
        self.post(&scope.config_path(), &body).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn delete_config(&self, scope: &ConfigScope, id: &str) -> Result<(), AnclaError> {
        let path = format!("{}{}", scope.config_path(), segment(id));
        self.delete(&path).await
    }

    /// Set several environment variables in one request.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn bulk_set_config(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        vars: &[SetConfigVar],
    ) -> Result<Vec<ConfigVar>, AnclaError> {
        let path = format!("{}/config/bulk", env_path(ws, proj, env));
        self.post(&path, &BulkSetConfigRequest { vars }).await
    }

    /// Effective configuration for a service after merging every scope.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_resolved_config(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
    ) -> Result<Vec<ConfigVar>, AnclaError> {
        let path = format!("{}/config/resolved", service_path(ws, proj, env, svc));
        self.get(&path).await
    }

    /// Look a single variable up by key.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_config(
        &self,
        ws: &str,
        proj: &str,
        svc: &str,
        key: &str,
    ) -> Result<ConfigVar, AnclaError> {
        let path = format!(
            "/configurations/{}/{}/{}/{}",
            segment(ws),
            segment(proj),
            segment(svc),
            segment(key)
        );
        self.get(&path).await
    }
}
