//! Configuration for geoprov.
//!
//! Layered settings (built-in defaults, optional TOML file, `GSINIT_*`
//! environment), secret resolution from mounted secret files, and
//! translation to `geoprov_core::ProvisionConfig` plus the transport
//! settings for `geoprov_api::RestClient`.

mod env;
pub mod secrets;

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

use geoprov_api::{PostgisStore, TlsMode, TransportConfig};
use geoprov_core::{
    ADMIN_ROLE, DataStoreConfig, ProvisionConfig, SecurityConfig, parse_name_list,
};

pub use secrets::{Secrets, resolve_secrets};

/// Prefix shared by every environment variable read by geoprov.
pub const ENV_PREFIX: &str = "GSINIT_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("failed to read secret {}: {source}", path.display())]
    Secret {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Flat settings as read from the TOML file and `GSINIT_*` variables.
///
/// Every field has a default, so an empty environment still yields a
/// complete value. Secrets are not part of this struct's defaults; the
/// `new_*` and `pg_password` fields only hold environment fallbacks for
/// [`resolve_secrets`].
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Management API base URL.
    #[serde(default = "default_url")]
    pub url: String,

    /// Factory-default account, disabled during provisioning.
    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    #[serde(default)]
    pub verbose: bool,

    /// Comma-separated workspace names.
    #[serde(default = "default_workspaces")]
    pub workspaces: String,

    #[serde(default = "default_pg_workspace")]
    pub pg_workspace: String,

    #[serde(default = "default_pg_datastore")]
    pub pg_datastore: String,

    #[serde(default = "default_pg_host")]
    pub pg_host: String,

    #[serde(default = "default_pg_port")]
    pub pg_port: u16,

    #[serde(default = "default_pg_user")]
    pub pg_user: String,

    #[serde(default = "default_pg_schema")]
    pub pg_schema: String,

    #[serde(default = "default_pg_database")]
    pub pg_database: String,

    /// Directory holding mounted secret files.
    #[serde(default = "default_secrets_dir")]
    pub secrets_dir: PathBuf,

    /// Request timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub timeout: Option<u64>,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Path to a custom CA certificate (PEM).
    #[serde(default)]
    pub ca_cert: Option<PathBuf>,

    #[serde(default)]
    pub new_user: Option<String>,

    #[serde(default)]
    pub new_password: Option<String>,

    #[serde(default)]
    pub pg_password: Option<String>,
}

fn default_url() -> String {
    "http://localhost:8080/geoserver".into()
}
fn default_user() -> String {
    "admin".into()
}
fn default_password() -> String {
    "geoserver".into()
}
fn default_workspaces() -> String {
    "station,osm".into()
}
fn default_pg_workspace() -> String {
    "station".into()
}
fn default_pg_datastore() -> String {
    "postgis".into()
}
fn default_pg_host() -> String {
    "db".into()
}
fn default_pg_port() -> u16 {
    5432
}
fn default_pg_user() -> String {
    "postgres".into()
}
fn default_pg_schema() -> String {
    "public".into()
}
fn default_pg_database() -> String {
    "postgres".into()
}
fn default_secrets_dir() -> PathBuf {
    PathBuf::from("/run/secrets")
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the default config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "geoprov", "geoprov").map_or_else(
        || PathBuf::from("geoprov.toml"),
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings: defaults, then the TOML file, then `GSINIT_*` variables.
/// String-valued keys are taken from the environment verbatim.
///
/// An explicit `file` must exist. Without one, the default config path is
/// used if present and silently skipped otherwise.
pub fn load_settings(file: Option<&Path>) -> Result<Settings, ConfigError> {
    let path = match file {
        Some(path) if !path.is_file() => {
            return Err(ConfigError::Validation {
                field: "config".into(),
                reason: format!("file not found: {}", path.display()),
            });
        }
        Some(path) => path.to_path_buf(),
        None => config_path(),
    };

    debug!(path = %path.display(), "loading settings");

    let settings: Settings = Figment::new()
        .merge(Toml::file(&path))
        .merge(Env::prefixed(ENV_PREFIX).ignore(env::TEXT_KEYS))
        .merge(env::TextEnv::new(ENV_PREFIX, env::TEXT_KEYS))
        .extract()?;
    Ok(settings)
}

// ── Translation ─────────────────────────────────────────────────────

impl Settings {
    /// Parsed management API base URL.
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        let url: Url = self.url.parse().map_err(|e| ConfigError::Validation {
            field: "url".into(),
            reason: format!("invalid URL '{}': {e}", self.url),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Validation {
                field: "url".into(),
                reason: format!("expected an http(s) URL, got '{}'", self.url),
            });
        }
        Ok(url)
    }

    /// Transport settings for the REST client.
    pub fn transport(&self) -> TransportConfig {
        let tls = if self.insecure {
            TlsMode::DangerAcceptInvalid
        } else if let Some(ref ca_path) = self.ca_cert {
            TlsMode::CustomCa(ca_path.clone())
        } else {
            TlsMode::System
        };

        let transport = TransportConfig {
            tls,
            ..TransportConfig::default()
        };
        match self.timeout {
            Some(secs) => transport.with_timeout(Duration::from_secs(secs)),
            None => transport,
        }
    }

    pub fn workspace_list(&self) -> Vec<String> {
        parse_name_list(&self.workspaces)
    }

    /// Password of the factory-default account.
    pub fn bootstrap_password(&self) -> SecretString {
        SecretString::from(self.password.clone())
    }

    /// Build the pipeline configuration. Missing operator secrets stay
    /// `None` for the pipeline to reject; a missing database password
    /// becomes empty.
    pub fn provision_config(&self, secrets: &Secrets) -> ProvisionConfig {
        ProvisionConfig {
            endpoint: self.url.clone(),
            security: SecurityConfig {
                operator_user: secrets.operator_user.clone(),
                operator_password: secrets.operator_password.clone(),
                default_user: self.user.clone(),
                default_password: self.bootstrap_password(),
                role: ADMIN_ROLE.into(),
            },
            workspaces: self.workspace_list(),
            data_store: DataStoreConfig {
                workspace: self.pg_workspace.clone(),
                store: PostgisStore {
                    name: self.pg_datastore.clone(),
                    host: self.pg_host.clone(),
                    port: self.pg_port,
                    user: self.pg_user.clone(),
                    password: secrets
                        .pg_password
                        .clone()
                        .unwrap_or_else(|| SecretString::from(String::new())),
                    schema: self.pg_schema.clone(),
                    database: self.pg_database.clone(),
                },
            },
        }
    }
}

// ── Redacted rendering ──────────────────────────────────────────────

/// Settings as shown by `geoprov config`, secrets masked.
#[derive(Serialize)]
struct RedactedSettings<'a> {
    url: &'a str,
    user: &'a str,
    password: &'static str,
    verbose: bool,
    workspaces: &'a str,
    pg_workspace: &'a str,
    pg_datastore: &'a str,
    pg_host: &'a str,
    pg_port: u16,
    pg_user: &'a str,
    pg_schema: &'a str,
    pg_database: &'a str,
    secrets_dir: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    timeout: Option<u64>,
    insecure: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    ca_cert: Option<&'a Path>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_user: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_password: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pg_password: Option<&'static str>,
}

const MASK: &str = "****";

/// Render the effective settings and resolved secrets as TOML with every
/// secret value masked.
pub fn redacted_toml(settings: &Settings, secrets: &Secrets) -> Result<String, ConfigError> {
    let view = RedactedSettings {
        url: &settings.url,
        user: &settings.user,
        password: MASK,
        verbose: settings.verbose,
        workspaces: &settings.workspaces,
        pg_workspace: &settings.pg_workspace,
        pg_datastore: &settings.pg_datastore,
        pg_host: &settings.pg_host,
        pg_port: settings.pg_port,
        pg_user: &settings.pg_user,
        pg_schema: &settings.pg_schema,
        pg_database: &settings.pg_database,
        secrets_dir: &settings.secrets_dir,
        timeout: settings.timeout,
        insecure: settings.insecure,
        ca_cert: settings.ca_cert.as_deref(),
        new_user: secrets.operator_user.as_deref(),
        new_password: secrets.operator_password.as_ref().map(|_| MASK),
        pg_password: secrets.pg_password.as_ref().map(|_| MASK),
    };
    Ok(toml::to_string_pretty(&view)?)
}
