use geoprov_config::{Settings, redacted_toml, resolve_secrets};

use crate::error::CliError;

/// Print the effective settings as TOML, secrets masked.
pub fn handle(settings: &Settings) -> Result<(), CliError> {
    let secrets = resolve_secrets(settings)?;
    print!("{}", redacted_toml(settings, &secrets)?);
    Ok(())
}
