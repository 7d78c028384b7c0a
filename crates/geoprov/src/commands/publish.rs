use geoprov_config::{Settings, resolve_secrets};
use geoprov_core::{FeatureLayer, publish_layer};

use crate::cli::PublishLayerArgs;
use crate::error::CliError;
use crate::output::{self, Tone};

/// Authenticates as the operator when its credentials resolve, else as the
/// bootstrap account.
pub async fn handle(args: PublishLayerArgs, settings: &Settings) -> Result<(), CliError> {
    let secrets = resolve_secrets(settings)?;
    let config = settings.provision_config(&secrets);

    let client = super::bootstrap_client(settings)?;
    if let Ok(operator) = config.security.operator_credentials() {
        client.use_credentials(operator);
    }

    let layer = FeatureLayer {
        title: args.title.unwrap_or_else(|| args.name.clone()),
        workspace: args.workspace,
        store: args.store,
        native_name: args.native_name,
        name: args.name,
        srs: args.srs,
    };

    publish_layer(&client, &config.endpoint, &layer).await?;

    output::banner(
        "geoprov: layer published",
        &[format!("{}:{} ({})", layer.workspace, layer.name, layer.srs)],
        Tone::Success,
    );
    Ok(())
}
