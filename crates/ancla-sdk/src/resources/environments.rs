use super::{env_path, project_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{Deploy, Environment, NameRequest, VersionRequest};

impl AnclaClient {
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_environments(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<Vec<Environment>, AnclaError> {
        self.get(&format!("{}/envs/", project_path(ws, proj))).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_environment(
        &self,
        ws: &str,
        proj: &str,
        slug: &str,
    ) -> Result<Environment, AnclaError> {
        self.get(&env_path(ws, proj, slug)).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_environment(
        &self,
        ws: &str,
        proj: &str,
        name: &str,
    ) -> Result<Environment, AnclaError> {
        let path = format!("{}/envs/", project_path(ws, proj));
        self.post(&path, &NameRequest { name }).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn update_environment(
        &self,
        ws: &str,
        proj: &str,
        slug: &str,
        name: &str,
    ) -> Result<Environment, AnclaError> {
        self.patch(&env_path(ws, proj, slug), &NameRequest { name })
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn delete_environment(
        &self,
        ws: &str,
        proj: &str,
        slug: &str,
    ) -> Result<(), AnclaError> {
        self.delete(&env_path(ws, proj, slug)).await
    }

    /// Deploy every service in an environment. `None` uses each service's
    /// latest build.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn deploy_environment(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        version: Option<u32>,
    ) -> Result<Deploy, AnclaError> {
        let path = format!("{}/deploy", env_path(ws, proj, env));
        self.post(&path, &VersionRequest { version }).await
    }
}
