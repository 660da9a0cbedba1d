use super::{project_path, workspace_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{
    Deploy, NameRequest, ObservabilityData, PipelineHistory, PipelineMetrics, PipelineStatus,
    Project, PromotionPreview, PromotionResult, VersionRequest,
};

impl AnclaClient {
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_projects(&self, ws: &str) -> Result<Vec<Project>, AnclaError> {
        self.get(&format!("{}/projects/", workspace_path(ws))).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_project(&self, ws: &str, slug: &str) -> Result<Project, AnclaError> {
        self.get(&project_path(ws, slug)).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_project(&self, ws: &str, name: &str) -> Result<Project, AnclaError> {
        self.post(&format!("{}/projects/", workspace_path(ws)), &NameRequest { name })
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn update_project(
        &self,
        ws: &str,
        slug: &str,
        name: &str,
    ) -> Result<Project, AnclaError> {
        self.patch(&project_path(ws, slug), &NameRequest { name })
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn delete_project(&self, ws: &str, slug: &str) -> Result<(), AnclaError> {
        self.delete(&project_path(ws, slug)).await
    }

    // ------------------------------------------------------------------
    // Pipeline
    // ------------------------------------------------------------------

    /// Latest build and deploy stage for one service in one environment.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn pipeline_status(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
    ) -> Result<PipelineStatus, AnclaError> {
        let path = format!("{}/pipeline/status", project_path(ws, proj));
        self.get_with_query(&path, &[("service", svc), ("env", env)])
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn pipeline_history(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<PipelineHistory, AnclaError> {
        self.get(&format!("{}/pipeline/history", project_path(ws, proj)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn pipeline_metrics(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<PipelineMetrics, AnclaError> {
        self.get(&format!("{}/pipeline/metrics", project_path(ws, proj)))
            .await
    }

    /// Deploy a build version through the project pipeline. `None` deploys
    /// the latest build.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn pipeline_deploy(
        &self,
        ws: &str,
        proj: &str,
        version: Option<u32>,
    ) -> Result<Deploy, AnclaError> {
        let path = format!("{}/pipeline/deploy", project_path(ws, proj));
        self.post(&path, &VersionRequest { version }).await
    }

    /// Roll the pipeline back to `version`, or the previous one when `None`.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn pipeline_rollback(
        &self,
        ws: &str,
        proj: &str,
        version: Option<u32>,
    ) -> Result<Deploy, AnclaError> {
        let path = format!("{}/pipeline/rollback", project_path(ws, proj));
        self.post(&path, &VersionRequest { version }).await
    }

    // ------------------------------------------------------------------
    // Promotion
    // ------------------------------------------------------------------

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn preview_promotion(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<PromotionPreview, AnclaError> {
        self.get(&format!("{}/promote/preview", project_path(ws, proj)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn execute_promotion(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<PromotionResult, AnclaError> {
        self.post_empty(&format!("{}/promote", project_path(ws, proj)))
            .await
    }

    // ------------------------------------------------------------------
    // Observability
    // ------------------------------------------------------------------

    /// Metrics and log summaries across the project's services.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_observability(
        &self,
        ws: &str,
        proj: &str,
    ) -> Result<ObservabilityData, AnclaError> {
        self.get(&format!("{}/observability", project_path(ws, proj)))
            .await
    }
}
