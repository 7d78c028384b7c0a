// REST API request/response models
//
// Request bodies follow the server's JSON representation, including the
// fully-qualified root key the user/group service expects.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::{Value, json};

/// Result of a create-if-absent operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

impl CreateOutcome {
    pub fn is_created(self) -> bool {
        matches!(self, Self::Created)
    }
}

// ── Security ────────────────────────────────────────────────────────

const USER_ROOT_KEY: &str = "org.geoserver.rest.model.users.User";

pub(crate) fn new_user_body(name: &str, password: &SecretString) -> Value {
    json!({
        USER_ROOT_KEY: {
            "userName": name,
            "password": password.expose_secret(),
            "enabled": true,
        }
    })
}

pub(crate) fn update_user_body(password: &SecretString, enabled: bool) -> Value {
    json!({
        USER_ROOT_KEY: {
            "password": password.expose_secret(),
            "enabled": enabled,
        }
    })
}

// ── Data stores ─────────────────────────────────────────────────────

/// Connection parameters for a PostGIS-backed data store.
#[derive(Debug, Clone)]
pub struct PostgisStore {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: SecretString,
    pub schema: String,
    pub database: String,
}

impl PostgisStore {
    /// The `dataStore` request body with its `connectionParameters.entry` list.
    pub(crate) fn to_request_body(&self) -> Value {
        let port = self.port.to_string();
        let entries = [
            ("host", self.host.as_str()),
            ("port", port.as_str()),
            ("user", self.user.as_str()),
            ("passwd", self.password.expose_secret()),
            ("dbtype", "postgis"),
            ("schema", self.schema.as_str()),
            ("database", self.database.as_str()),
            ("Expose primary keys", "true"),
        ]
        .into_iter()
        .map(|(key, value)| json!({ "@key": key, "$": value }))
        .collect::<Vec<_>>();

        json!({
            "dataStore": {
                "name": self.name,
                "type": "PostGIS",
                "enabled": true,
                "connectionParameters": { "entry": entries },
            }
        })
    }
}

// ── Layers ──────────────────────────────────────────────────────────

/// A feature type to publish from an existing data store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLayer {
    pub workspace: String,
    pub store: String,
    /// Table or view name inside the backing database.
    pub native_name: String,
    /// Published layer name.
    pub name: String,
    pub title: String,
    /// Declared spatial reference system, e.g. `EPSG:4326`.
    pub srs: String,
}

impl FeatureLayer {
    pub(crate) fn to_request_body(&self) -> Value {
        json!({
            "featureType": {
                "name": self.name,
                "nativeName": self.native_name,
                "title": self.title,
                "srs": self.srs,
                "enabled": true,
            }
        })
    }
}

// ── About ───────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct AboutEnvelope {
    pub about: About,
}

#[derive(Debug, Deserialize)]
pub(crate) struct About {
    #[serde(default)]
    pub resource: Vec<AboutResource>,
}

/// One component entry of `/rest/about/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct AboutResource {
    #[serde(rename = "@name")]
    pub name: String,
    /// Reported as a string by most builds, as a number by some.
    #[serde(rename = "Version", default)]
    pub version: Option<Value>,
}

impl AboutResource {
    pub fn version_string(&self) -> Option<String> {
        match self.version.as_ref()? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
