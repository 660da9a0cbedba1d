//! CLI configuration.
//!
//! Loaded in priority order (lowest to highest):
//! 1. Built-in defaults
//! 2. `~/.ancla/config.yaml`
//! 3. The nearest `.ancla/config.yaml` found walking up from the working
//!    directory (the "link" file)
//! 4. Environment variables with the `ANCLA_` prefix
//! 5. `--server` / `--api-key` flags

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use ancla_sdk::settings::DEFAULT_SERVER;
use ancla_sdk::ConfigScope;
use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_string_from_number;

/// Directory holding both the global and the per-directory config file.
pub const CONFIG_DIR: &str = ".ancla";
pub const CONFIG_FILE: &str = "config.yaml";

/// Renamed keys still accepted in link files: `(old, new)`.
const LEGACY_KEYS: [(&str, &str); 2] = [("org", "workspace"), ("app", "service")];

/// Merged CLI settings.
///
/// Env values are typed by figment, so an all-digit key or slug arrives as a
/// number. Every field accepts either.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(
        default = "default_server",
        deserialize_with = "deserialize_string_from_number"
    )]
    pub server: String,

    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub api_key: String,

    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub username: String,

    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub email: String,

    /// Link context. Normally only set by the local link file.
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub workspace: String,
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub project: String,
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub env: String,
    #[serde(default, deserialize_with = "deserialize_string_from_number")]
    pub service: String,
}

fn default_server() -> String {
    DEFAULT_SERVER.to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            api_key: String::new(),
            username: String::new(),
            email: String::new(),
            workspace: String::new(),
            project: String::new(),
            env: String::new(),
            service: String::new(),
        }
    }
}

/// Values given on the command line; only the ones present override.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("failed to read or write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("{0} not specified: pass it in the path argument or run `ancla link`")]
    MissingContext(&'static str),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Where the config files live for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// `~/.ancla/config.yaml`
    pub global: PathBuf,
    /// Nearest `.ancla/config.yaml` above the working directory, if any.
    pub local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Resolve paths against the real home directory.
    #[must_use]
    pub fn discover(cwd: &Path) -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(&home, cwd)
    }

    #[must_use]
    pub fn new(home: &Path, cwd: &Path) -> Self {
        Self {
            global: home.join(CONFIG_DIR).join(CONFIG_FILE),
            local: find_local_config_dir(cwd).map(|dir| dir.join(CONFIG_FILE)),
        }
    }

    /// The file a user would edit: the link file when present, else the
    /// global one.
    #[must_use]
    pub fn active(&self) -> &Path {
        self.local.as_deref().unwrap_or(&self.global)
    }
}

/// Walk from `start` upward looking for a `.ancla/` directory.
#[must_use]
pub fn find_local_config_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_DIR))
        .find(|candidate| candidate.is_dir())
}

impl CliConfig {
    /// Load configuration from every layer and validate it.
    ///
    /// # Errors
    /// Returns an error if a file can't be parsed or the result is invalid.
    pub fn load(paths: &ConfigPaths, flags: &FlagOverrides) -> Result<Self, ConfigError> {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(&paths.global));

        if let Some(local) = &paths.local {
            figment = figment.merge(Serialized::defaults(read_link_file(local)?));
        }

        let config: Self = figment
            .merge(Env::prefixed("ANCLA_"))
            .merge(Serialized::defaults(flags))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns an error if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.is_empty() {
            return Err(ConfigError::Validation(
                "server cannot be empty. Set ANCLA_SERVER or configure it in ~/.ancla/config.yaml."
                    .into(),
            ));
        }

        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "server '{}' must start with http:// or https://",
                self.server
            )));
        }

        Ok(())
    }

    /// Whether any link context is set.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        !(self.workspace.is_empty()
            && self.project.is_empty()
            && self.env.is_empty()
            && self.service.is_empty())
    }

    /// Link context as a path, e.g. `acme/web/staging/api`.
    #[must_use]
    pub fn service_path(&self) -> ServicePath {
        ServicePath {
            workspace: self.workspace.clone(),
            project: self.project.clone(),
            env: self.env.clone(),
            service: self.service.clone(),
        }
    }
}

/// Read a link file, renaming legacy keys.
fn read_link_file(path: &Path) -> Result<BTreeMap<String, serde_yaml::Value>, ConfigError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }

    let mut settings: BTreeMap<String, serde_yaml::Value> = serde_yaml::from_str::<
        Option<BTreeMap<String, serde_yaml::Value>>,
    >(&contents)
    .map_err(|source| ConfigError::Yaml {
        path: path.to_path_buf(),
        source,
    })?
    .unwrap_or_default();

    if migrate_legacy_keys(&mut settings) {
        tracing::warn!(
            path = %path.display(),
            "migrated old config keys (org -> workspace, app -> service); \
             re-run `ancla link` to update"
        );
    }
    Ok(settings)
}

/// Rename `org`/`app` to `workspace`/`service`. A new key already present
/// wins over its legacy counterpart. Returns whether anything changed.
pub fn migrate_legacy_keys(settings: &mut BTreeMap<String, serde_yaml::Value>) -> bool {
    let mut migrated = false;
    for (old, new) in LEGACY_KEYS {
        if let Some(value) = settings.remove(old) {
            settings.entry(new.to_string()).or_insert(value);
            migrated = true;
        }
    }
    migrated
}

/// Write link context to `<dir>/.ancla/config.yaml`, creating the directory.
/// Empty segments are left out of the file.
///
/// # Errors
/// Returns an error if the directory or file can't be written.
pub fn save_link(dir: &Path, link: &ServicePath) -> Result<PathBuf, ConfigError> {
    let config_dir = dir.join(CONFIG_DIR);
    fs::create_dir_all(&config_dir).map_err(|source| ConfigError::Io {
        path: config_dir.clone(),
        source,
    })?;

    let path = config_dir.join(CONFIG_FILE);
    let yaml = serde_yaml::to_string(link).map_err(|source| ConfigError::Yaml {
        path: path.clone(),
        source,
    })?;
    fs::write(&path, yaml).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "wrote link file");
    Ok(path)
}

/// Delete `<dir>/.ancla/config.yaml` and the directory if it's then empty.
/// Returns whether a file was removed.
///
/// # Errors
/// Returns an error if the file exists but can't be removed.
pub fn remove_link(dir: &Path) -> Result<bool, ConfigError> {
    let config_dir = dir.join(CONFIG_DIR);
    let path = config_dir.join(CONFIG_FILE);

    let removed = match fs::remove_file(&path) {
        Ok(()) => true,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
        Err(source) => return Err(ConfigError::Io { path, source }),
    };

    // Other files may still live there.
    if fs::remove_dir(&config_dir).is_err() {
        tracing::debug!(path = %config_dir.display(), "config directory not removed");
    }
    Ok(removed)
}

/// Workspace/project/env/service coordinates, any of which may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServicePath {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub workspace: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub env: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub service: String,
}

impl ServicePath {
    /// Parse `ws/proj/env/svc`. Missing or empty segments stay empty.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        let mut parts = arg.split('/').map(str::to_string);
        Self {
            workspace: parts.next().unwrap_or_default(),
            project: parts.next().unwrap_or_default(),
            env: parts.next().unwrap_or_default(),
            service: parts.next().unwrap_or_default(),
        }
    }

    /// Start from the link context and override it with every non-empty
    /// segment of `arg`.
    #[must_use]
    pub fn resolve(arg: Option<&str>, config: &CliConfig) -> Self {
        let mut path = config.service_path();
        if let Some(arg) = arg.filter(|a| !a.is_empty()) {
            let given = Self::parse(arg);
            for (slot, value) in [
                (&mut path.workspace, given.workspace),
                (&mut path.project, given.project),
                (&mut path.env, given.env),
                (&mut path.service, given.service),
            ] {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }
        path
    }

    /// # Errors
    /// Returns [`ConfigError::MissingContext`] when the workspace is empty.
    pub fn workspace(&self) -> Result<&str, ConfigError> {
        non_empty(&self.workspace, "workspace")
    }

    /// # Errors
    /// Returns [`ConfigError::MissingContext`] for the first empty segment.
    pub fn project(&self) -> Result<(&str, &str), ConfigError> {
        Ok((self.workspace()?, non_empty(&self.project, "project")?))
    }

    /// # Errors
    /// Returns [`ConfigError::MissingContext`] for the first empty segment.
    pub fn env(&self) -> Result<(&str, &str, &str), ConfigError> {
        let (ws, proj) = self.project()?;
        Ok((ws, proj, non_empty(&self.env, "environment")?))
    }

    /// # Errors
    /// Returns [`ConfigError::MissingContext`] for the first empty segment.
    pub fn service(&self) -> Result<(&str, &str, &str, &str), ConfigError> {
        let (ws, proj, env) = self.env()?;
        Ok((ws, proj, env, non_empty(&self.service, "service")?))
    }

    /// Narrowest config scope the path reaches.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingContext`] when even the workspace is empty.
    pub fn config_scope(&self) -> Result<ConfigScope, ConfigError> {
        if let Ok((ws, proj, env, svc)) = self.service() {
            return Ok(ConfigScope::service(ws, proj, env, svc));
        }
        if let Ok((ws, proj, env)) = self.env() {
            return Ok(ConfigScope::environment(ws, proj, env));
        }
        if let Ok((ws, proj)) = self.project() {
            return Ok(ConfigScope::project(ws, proj));
        }
        Ok(ConfigScope::workspace(self.workspace()?))
    }
}

fn non_empty<'a>(value: &'a str, what: &'static str) -> Result<&'a str, ConfigError> {
    if value.is_empty() {
        Err(ConfigError::MissingContext(what))
    } else {
        Ok(value)
    }
}

impl fmt::Display for ServicePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<&str> = [&self.workspace, &self.project, &self.env, &self.service]
            .into_iter()
            .map(String::as_str)
            .filter(|p| !p.is_empty())
            .collect();
        f.write_str(&parts.join("/"))
    }
}
