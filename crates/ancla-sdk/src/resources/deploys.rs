use super::{env_path, segment, service_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{Deploy, DeployLog};

impl AnclaClient {
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_deploys(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
    ) -> Result<Vec<Deploy>, AnclaError> {
        self.get_items(&format!("{}/deploys/", service_path(ws, proj, env, svc)))
            .await
    }

    /// Deploys across every service in an environment.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_environment_deploys(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
    ) -> Result<Vec<Deploy>, AnclaError> {
        self.get_items(&format!("{}/deploys/", env_path(ws, proj, env)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_deploy(&self, deploy_id: &str) -> Result<Deploy, AnclaError> {
        self.get(&format!("/deploys/{}/detail", segment(deploy_id)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_deploy_log(&self, deploy_id: &str) -> Result<DeployLog, AnclaError> {
        self.get(&format!("/deploys/{}/log", segment(deploy_id)))
            .await
    }

    // ------------------------------------------------------------------
    // Scoped lookups
    // ------------------------------------------------------------------

    /// Same record as [`get_deploy`](Self::get_deploy), addressed through
    /// its environment.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_environment_deploy(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        deploy_id: &str,
    ) -> Result<Deploy, AnclaError> {
        self.get(&env_deploy_path(ws, proj, env, deploy_id)).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_environment_deploy_log(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        deploy_id: &str,
    ) -> Result<DeployLog, AnclaError> {
        let path = format!("{}/log", env_deploy_path(ws, proj, env, deploy_id));
        self.get(&path).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_service_deploy(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        deploy_id: &str,
    ) -> Result<Deploy, AnclaError> {
        self.get(&service_deploy_path(ws, proj, env, svc, deploy_id))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_service_deploy_log(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        deploy_id: &str,
    ) -> Result<DeployLog, AnclaError> {
        let path = format!("{}/log", service_deploy_path(ws, proj, env, svc, deploy_id));
        self.get(&path).await
    }
}

fn env_deploy_path(ws: &str, proj: &str, env: &str, deploy_id: &str) -> String {
    format!("{}/deploys/{}", env_path(ws, proj, env), segment(deploy_id))
}

fn service_deploy_path(ws: &str, proj: &str, env: &str, svc: &str, deploy_id: &str) -> String {
    format!("{}/deploys/{}", service_path(ws, proj, env, svc), segment(deploy_id))
}
