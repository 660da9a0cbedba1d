use super::{segment, workspace_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{AddMemberRequest, NameRequest, Team, Workspace, WorkspaceMember};

impl AnclaClient {
    /// List all workspaces the authenticated user belongs to.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_workspaces(&self) -> Result<Vec<Workspace>, AnclaError> {
        self.get("/workspaces/").await
    }

    /// Get a single workspace, including its members.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_workspace(&self, slug: &str) -> Result<Workspace, AnclaError> {
        self.get(&workspace_path(slug)).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_workspace(&self, name: &str) -> Result<Workspace, AnclaError> {
        self.post("/workspaces/", &NameRequest { name }).await
    }

    /// Rename a workspace.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn update_workspace(&self, slug: &str, name: &str) -> Result<Workspace, AnclaError> {
        self.patch(&workspace_path(slug), &NameRequest { name }).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn delete_workspace(&self, slug: &str) -> Result<(), AnclaError> {
        self.delete(&workspace_path(slug)).await
    }

    // ------------------------------------------------------------------
    // Members
    // ------------------------------------------------------------------

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_members(&self, ws: &str) -> Result<Vec<WorkspaceMember>, AnclaError> {
        self.get(&format!("{}/members/", workspace_path(ws))).await
    }

    /// Invite an existing user into a workspace.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn add_member(
        &self,
        ws: &str,
        username: &str,
        admin: bool,
    ) -> Result<WorkspaceMember, AnclaError> {
        let body = AddMemberRequest { username, admin };
        self.post(&format!("{}/members/", workspace_path(ws)), &body)
            .await
    }

    // ------------------------------------------------------------------
    // Teams
    // ------------------------------------------------------------------

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_teams(&self, ws: &str) -> Result<Vec<Team>, AnclaError> {
        self.get(&format!("{}/teams/", workspace_path(ws))).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_team(&self, ws: &str, name: &str) -> Result<Team, AnclaError> {
        self.post(&format!("{}/teams/", workspace_path(ws)), &NameRequest { name })
            .await
    }
}

/// `/workspaces/{ws}/teams/{team}`, the team config scope root.
pub(crate) fn team_path(ws: &str, team: &str) -> String {
    format!("{}/teams/{}", workspace_path(ws), segment(team))
}
