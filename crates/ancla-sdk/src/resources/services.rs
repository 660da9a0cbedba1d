use std::collections::BTreeMap;

use super::{env_path, service_path};
use crate::client::AnclaClient;
use crate::error::AnclaError;
use crate::types::{BuildResult, CreateServiceRequest, ScaleRequest, Service, UpdateService};

impl AnclaClient {
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn list_services(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
    ) -> Result<Vec<Service>, AnclaError> {
        self.get(&format!("{}/services/", env_path(ws, proj, env)))
            .await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn get_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        slug: &str,
    ) -> Result<Service, AnclaError> {
        self.get(&service_path(ws, proj, env, slug)).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn create_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        name: &str,
        platform: &str,
    ) -> Result<Service, AnclaError> {
        let path = format!("{}/services/", env_path(ws, proj, env));
        self.post(&path, &CreateServiceRequest { name, platform })
            .await
    }

    /// Apply a partial update; only fields set on `update` are sent.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn update_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        slug: &str,
        update: &UpdateService,
    ) -> Result<Service, AnclaError> {
        self.patch(&service_path(ws, proj, env, slug), update).await
    }

    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn delete_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        slug: &str,
    ) -> Result<(), AnclaError> {
        self.delete(&service_path(ws, proj, env, slug)).await
    }

    /// Build and deploy a service in one step. The returned `build_id` can be
    /// polled with [`AnclaClient::get_build_by_id`].
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn deploy_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
    ) -> Result<BuildResult, AnclaError> {
        self.post_empty(&format!("{}/deploy", service_path(ws, proj, env, svc)))
            .await
    }

    /// Set desired replica counts per process, e.g. `{"web": 2}`.
    ///
    /// # Errors
    /// Returns [`AnclaError`] on transport failure or an error status.
    pub async fn scale_service(
        &self,
        ws: &str,
        proj: &str,
        env: &str,
        svc: &str,
        process_counts: &BTreeMap<String, u32>,
    ) -> Result<(), AnclaError> {
        let path = format!("{}/scale", service_path(ws, proj, env, svc));
        self.post_discard(&path, &ScaleRequest { process_counts })
            .await
    }
}
