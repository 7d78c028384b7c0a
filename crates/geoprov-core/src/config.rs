// ── Provisioning configuration ──
//
// Built once at startup by the config layer and passed by reference into
// every pipeline step. Nothing in the pipeline reads the environment.

use secrecy::{ExposeSecret, SecretString};

use geoprov_api::{Credentials, PostgisStore};

use crate::error::CoreError;

/// Role bound to the operator account.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Everything the pipeline needs for one run.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    /// Management API base URL, used in diagnostics only.
    pub endpoint: String,
    pub security: SecurityConfig,
    /// Workspace names in creation order.
    pub workspaces: Vec<String>,
    pub data_store: DataStoreConfig,
}

/// Account hardening inputs.
///
/// The operator fields are optional here so that a missing secret surfaces
/// as a [`CoreError::Configuration`] from the pipeline, before any call.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub operator_user: Option<String>,
    pub operator_password: Option<SecretString>,
    /// Factory-default account, disabled during the run.
    pub default_user: String,
    pub default_password: SecretString,
    pub role: String,
}

impl SecurityConfig {
    /// The operator credentials, or a configuration error if either part is
    /// absent or empty.
    pub fn operator_credentials(&self) -> Result<Credentials, CoreError> {
        let user = self
            .operator_user
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| CoreError::Configuration {
                message: "operator username is missing or empty".into(),
            })?;

        let password = self
            .operator_password
            .as_ref()
            .filter(|p| !p.expose_secret().is_empty())
            .ok_or_else(|| CoreError::Configuration {
                message: "operator password is missing or empty".into(),
            })?;

        Ok(Credentials::new(user, password.clone()))
    }
}

/// Target workspace plus database connection parameters.
#[derive(Debug, Clone)]
pub struct DataStoreConfig {
    pub workspace: String,
    pub store: PostgisStore,
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_name_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::{ADMIN_ROLE, SecurityConfig, parse_name_list};
    use crate::error::CoreError;

    fn security(user: Option<&str>, password: Option<&str>) -> SecurityConfig {
        SecurityConfig {
            operator_user: user.map(String::from),
            operator_password: password.map(SecretString::from),
            default_user: "admin".into(),
            default_password: SecretString::from("geoserver"),
            role: ADMIN_ROLE.into(),
        }
    }

    #[test]
    fn name_list_is_trimmed_and_ordered() {
        assert_eq!(parse_name_list(" a, b ,,c ,"), vec!["a", "b", "c"]);
        assert!(parse_name_list("  ").is_empty());
    }

    #[test]
    fn operator_credentials_require_both_parts() {
        for (user, password) in [
            (None, Some("pw")),
            (Some("ops"), None),
            (Some("   "), Some("pw")),
            (Some("ops"), Some("")),
        ] {
            let result = security(user, password).operator_credentials();
            assert!(
                matches!(result, Err(CoreError::Configuration { .. })),
                "expected configuration error for {user:?}/{password:?}"
            );
        }

        let creds = security(Some(" ops "), Some("pw")).operator_credentials().ok();
        assert_eq!(creds.map(|c| c.username), Some("ops".to_owned()));
    }
}
