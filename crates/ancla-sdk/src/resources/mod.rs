//! Resource methods on [`AnclaClient`](crate::AnclaClient), one module per
//! API area.
//!
//! Path templates mirror the server's routes exactly. Trailing slashes are
//! part of the contract: collection routes end with `/`, member routes don't.

mod auth;
mod builds;
mod config;
mod deploys;
mod environments;
mod projects;
mod services;
mod workspaces;

pub use config::ConfigScope;

/// Percent-encode one path segment.
fn segment(value: &str) -> std::borrow::Cow<'_, str> {
    urlencoding::encode(value)
}

pub(crate) fn workspace_path(ws: &str) -> String {
    format!("/workspaces/{}", segment(ws))
}

pub(crate) fn project_path(ws: &str, proj: &str) -> String {
    format!("{}/projects/{}", workspace_path(ws), segment(proj))
}

pub(crate) fn env_path(ws: &str, proj: &str, env: &str) -> String {
    format!("{}/envs/{}", project_path(ws, proj), segment(env))
}

pub(crate) fn service_path(ws: &str, proj: &str, env: &str, svc: &str) -> String {
    format!("{}/services/{}", env_path(ws, proj, env), segment(svc))
}
