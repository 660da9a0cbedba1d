//! Records exchanged with the Ancla API.
//!
//! The API is versioned independently of this crate, so every response
//! record tolerates missing fields, explicit `null`s and unknown keys:
//! anything absent decodes to its empty/zero/false default.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;
use serde_json::Value;

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

/// Top-level tenant grouping projects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Workspace {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub slug: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub member_count: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub project_count: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub service_count: u32,
    /// Only populated by the detail endpoint.
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub members: Vec<WorkspaceMember>,
}

/// A user's membership in a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceMember {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub username: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub admin: bool,
}

/// A named group of members inside a workspace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Team {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub slug: String,
}

// ---------------------------------------------------------------------------
// Projects & environments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub slug: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub workspace_slug: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub workspace_name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub service_count: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub created: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub updated: String,
}

/// Deployment target (production, staging, ...) within a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Environment {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub slug: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub service_count: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub created: String,
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

/// Deployable unit within an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub slug: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub platform: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub github_repository: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub auto_deploy_branch: String,
    /// Process name to desired replica count, e.g. `web -> 2`.
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub process_counts: BTreeMap<String, u32>,
}

/// Aggregate build/deploy state for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineStatus {
    pub build: Option<StageStatus>,
    pub deploy: Option<StageStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageStatus {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub status: String,
    pub error_detail: Option<String>,
}

impl StageStatus {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.status.as_str(), "error" | "failed")
    }
}

// ---------------------------------------------------------------------------
// Builds
// ---------------------------------------------------------------------------

/// Packaged artifact produced for a service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Build {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub version: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub built: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub error: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub created: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

/// Response from triggering a build or a full service deploy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildResult {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub build_id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildLog {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub status: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub version: u32,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub log_text: String,
}

// ---------------------------------------------------------------------------
// Deploys
// ---------------------------------------------------------------------------

/// Record of rolling a build out to an environment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Deploy {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub complete: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub error: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub error_detail: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub job_id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub created: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployLog {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub status: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub log_text: String,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Named value attached to a workspace, team, project, environment or service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigVar {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub id: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub value: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub secret: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub buildtime: bool,
    /// Scope the value was defined at (`workspace`, `env`, ...).
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub scope: String,
}

// ---------------------------------------------------------------------------
// Pipeline & promotion
// ---------------------------------------------------------------------------

/// Untyped pipeline history entries, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineHistory {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub items: Vec<Value>,
}

/// Aggregated pipeline metrics keyed by metric name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineMetrics {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub metrics: BTreeMap<String, Value>,
}

/// Metrics and log summaries for a project. Both maps are server-shaped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityData {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub metrics: BTreeMap<String, Value>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub logs: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionPreview {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub changes: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromotionResult {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub success: bool,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub message: String,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Result of `GET /auth/session`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Session {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub authenticated: bool,
    pub user: Option<SessionUser>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionUser {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub username: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub email: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub admin: bool,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{"items": [...]}` wrapper used by the build and deploy list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct ItemList<T> {
    #[serde(default, deserialize_with = "deserialize_default_from_null")]
    pub items: Vec<T>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// Body for endpoints that only take a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct NameRequest<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CreateServiceRequest<'a> {
    pub name: &'a str,
    pub platform: &'a str,
}

/// Partial update for a service. `None` fields are left out of the body and
/// keep their current server-side value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateService {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_repository: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_deploy_branch: Option<String>,
}

impl UpdateService {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn github_repository(mut self, repo: impl Into<String>) -> Self {
        self.github_repository = Some(repo.into());
        self
    }

    #[must_use]
    pub fn auto_deploy_branch(mut self, branch: impl Into<String>) -> Self {
        self.auto_deploy_branch = Some(branch.into());
        self
    }

    /// True when no field is set; the request would be a no-op.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.github_repository.is_none() && self.auto_deploy_branch.is_none()
    }
}

/// Create-or-update body for a configuration variable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SetConfigVar {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub secret: bool,
}

impl SetConfigVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            secret: false,
        }
    }

    #[must_use]
    pub const fn secret(mut self, secret: bool) -> Self {
        self.secret = secret;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct BulkSetConfigRequest<'a> {
    pub vars: &'a [SetConfigVar],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ScaleRequest<'a> {
    pub process_counts: &'a BTreeMap<String, u32>,
}

/// Body for deploy/rollback endpoints. No version means "latest".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub(crate) struct VersionRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct AddMemberRequest<'a> {
    pub username: &'a str,
    pub admin: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct TriggerBuildRequest<'a> {
    pub strategy: &'a str,
}
