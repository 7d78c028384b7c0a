use geoprov_config::{Settings, resolve_secrets};

use crate::error::CliError;
use crate::output::{self, Tone};

pub async fn handle(settings: &Settings) -> Result<(), CliError> {
    let secrets = resolve_secrets(settings)?;
    let config = settings.provision_config(&secrets);

    output::banner(
        "geoprov: provisioning GeoServer",
        &[
            format!("endpoint:   {}", config.endpoint),
            format!("workspaces: {}", config.workspaces.join(", ")),
            format!(
                "data store: {}/{} -> {}:{}",
                config.data_store.workspace,
                config.data_store.store.name,
                config.data_store.store.host,
                config.data_store.store.port
            ),
        ],
        Tone::Info,
    );

    let client = super::bootstrap_client(settings)?;
    geoprov_core::run(&client, &config).await?;

    output::banner("geoprov: provisioning complete", &[], Tone::Success);
    Ok(())
}
