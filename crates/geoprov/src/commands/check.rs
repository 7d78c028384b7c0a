use geoprov_config::{Settings, resolve_secrets};
use geoprov_core::provision::preflight;

use crate::error::CliError;
use crate::output::{self, Tone};

/// Connectivity preflight only. Operator credentials, when resolvable,
/// serve as the fallback exactly as in a full run.
pub async fn handle(settings: &Settings) -> Result<(), CliError> {
    let secrets = resolve_secrets(settings)?;
    let config = settings.provision_config(&secrets);
    let operator = config.security.operator_credentials().ok();

    let client = super::bootstrap_client(settings)?;
    preflight(&client, &config.endpoint, operator.as_ref()).await?;

    output::banner(
        "geoprov: REST API reachable",
        &[format!("authenticated as: {}", client.username())],
        Tone::Success,
    );
    Ok(())
}
