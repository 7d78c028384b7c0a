// Secret resolution.
//
// Mounted secret files win over environment variables. A missing or empty
// file falls through to the environment; anything else unreadable is an
// error rather than a silent fallback.

use std::io::ErrorKind;
use std::path::Path;

use secrecy::SecretString;
use tracing::debug;

use crate::{ConfigError, Settings};

/// File holding the operator account's username.
pub const OPERATOR_USER_FILE: &str = "geoserver_user";
/// File holding the operator account's password.
pub const OPERATOR_PASSWORD_FILE: &str = "geoserver_password";
/// File holding the database password.
pub const PG_PASSWORD_FILE: &str = "geoserver_pg_password";

/// Secrets resolved once at startup. `None` means no source provided one.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    pub operator_user: Option<String>,
    pub operator_password: Option<SecretString>,
    pub pg_password: Option<SecretString>,
}

/// Resolve all secrets from `settings.secrets_dir`, falling back to the
/// `GSINIT_NEW_USER`, `GSINIT_NEW_PASSWORD`, and `GSINIT_PG_PASSWORD`
/// values already loaded into `settings`.
pub fn resolve_secrets(settings: &Settings) -> Result<Secrets, ConfigError> {
    let dir = settings.secrets_dir.as_path();

    let operator_user = resolve(dir, OPERATOR_USER_FILE, settings.new_user.as_deref())?;
    let operator_password =
        resolve(dir, OPERATOR_PASSWORD_FILE, settings.new_password.as_deref())?
            .map(SecretString::from);
    let pg_password =
        resolve(dir, PG_PASSWORD_FILE, settings.pg_password.as_deref())?.map(SecretString::from);

    Ok(Secrets {
        operator_user,
        operator_password,
        pg_password,
    })
}

fn resolve(dir: &Path, file: &str, fallback: Option<&str>) -> Result<Option<String>, ConfigError> {
    if let Some(value) = read_secret_file(dir, file)? {
        debug!(secret = file, "using mounted secret file");
        return Ok(Some(value));
    }
    if fallback.is_some() {
        debug!(secret = file, "using environment fallback");
    }
    Ok(fallback.map(String::from))
}

/// Read `dir/name`, stripping the trailing newline editors and `echo` add.
/// Missing and empty files read as `None`.
fn read_secret_file(dir: &Path, name: &str) -> Result<Option<String>, ConfigError> {
    let path = dir.join(name);
    match std::fs::read_to_string(&path) {
        Ok(contents) => {
            let value = contents.trim_end_matches(['\r', '\n']);
            Ok((!value.is_empty()).then(|| value.to_owned()))
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ConfigError::Secret { path, source }),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use figment::Jail;
    use secrecy::ExposeSecret;

    use super::{OPERATOR_PASSWORD_FILE, OPERATOR_USER_FILE, PG_PASSWORD_FILE, resolve_secrets};
    use crate::load_settings;

    #[test]
    fn files_win_over_environment() {
        let secrets_dir = tempfile::tempdir().unwrap();
        std::fs::write(secrets_dir.path().join(OPERATOR_USER_FILE), "ops\n").unwrap();
        std::fs::write(secrets_dir.path().join(OPERATOR_PASSWORD_FILE), "from-file\r\n").unwrap();

        Jail::expect_with(|jail| {
            jail.create_file("geoprov.toml", "")?;
            jail.set_env("GSINIT_SECRETS_DIR", secrets_dir.path().display());
            jail.set_env("GSINIT_NEW_USER", "env-user");
            jail.set_env("GSINIT_NEW_PASSWORD", "from-env");
            jail.set_env("GSINIT_PG_PASSWORD", "pg-env");

            let path = jail.directory().join("geoprov.toml");
            let settings = load_settings(Some(&path)).unwrap();
            let secrets = resolve_secrets(&settings).unwrap();

            assert_eq!(secrets.operator_user.as_deref(), Some("ops"));
            assert_eq!(
                secrets.operator_password.as_ref().map(|p| p.expose_secret()),
                Some("from-file")
            );
            // No pg file mounted: environment fallback applies.
            assert_eq!(
                secrets.pg_password.as_ref().map(|p| p.expose_secret()),
                Some("pg-env")
            );
            Ok(())
        });
    }

    #[test]
    fn empty_file_falls_back_and_absent_stays_none() {
        let secrets_dir = tempfile::tempdir().unwrap();
        std::fs::write(secrets_dir.path().join(PG_PASSWORD_FILE), "\n").unwrap();

        Jail::expect_with(|jail| {
            jail.create_file("geoprov.toml", "")?;
            jail.set_env("GSINIT_SECRETS_DIR", secrets_dir.path().display());

            let path = jail.directory().join("geoprov.toml");
            let settings = load_settings(Some(&path)).unwrap();
            let secrets = resolve_secrets(&settings).unwrap();

            assert!(secrets.operator_user.is_none());
            assert!(secrets.operator_password.is_none());
            assert!(secrets.pg_password.is_none());
            Ok(())
        });
    }
}
