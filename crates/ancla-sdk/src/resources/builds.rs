use super::{segment, service_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{Build, BuildLog, BuildResult, TriggerBuildRequest};

impl AnclaClient {
    /// Builds for a service, newest first.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_builds(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
    ) -> Result<Vec<Build>, AnclaError> {
        self.get_items(&format!("{}/builds/", service_path(ws, proj, env, svc)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_build(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        version: u32,
    ) -> Result<Build, AnclaError> {
        let path = format!("{}/builds/{version}", service_path(ws, proj, env, svc));
        self.get(&path).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_build_log(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        version: u32,
    ) -> Result<BuildLog, AnclaError> {
        let path = format!("{}/builds/{version}/log", service_path(ws, proj, env, svc));
        self.get(&path).await
    }

    /// Trigger a build without deploying it. With no `strategy` the request
    /// has no body and the server picks one.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_build(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        strategy: Option<&str>,
    ) -> Result<BuildResult, AnclaError> {
        let path = format!("{}/builds/trigger", service_path(ws, proj, env, svc));
        match strategy {
            Some(strategy) => self.post(&path, &TriggerBuildRequest { strategy }).await,
            None => self.post_empty(&path).await,
        }
    }

    /// Look a build up by its id alone.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_build_by_id(&self, build_id: &str) -> Result<Build, AnclaError> {
        self.get(&format!("/builds/{}", segment(build_id))).await
    }
}
