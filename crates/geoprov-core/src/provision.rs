// ── Provisioning pipeline ──
//
// Fixed, strictly sequential pipeline:
//
//   START → PREFLIGHT_OK → SECURITY_DONE → WORKSPACES_DONE → DATASTORE_DONE
//
// Every step is awaited before the next begins and the first error ends
// the run. Nothing is retried or rolled back; re-running is safe because
// each step is create-if-absent on the server side.

use geoprov_api::{CreateOutcome, Credentials, FeatureLayer};
use strum::Display;
use tracing::{debug, info, warn};

use crate::api::ManagementApi;
use crate::config::{DataStoreConfig, ProvisionConfig, SecurityConfig};
use crate::error::CoreError;

/// Pipeline stage, used for progress logging and error context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "connectivity preflight")]
    Preflight,
    #[strum(to_string = "security adaptation")]
    Security,
    #[strum(to_string = "workspace provisioning")]
    Workspaces,
    #[strum(to_string = "data store provisioning")]
    DataStore,
    #[strum(to_string = "layer publishing")]
    Publish,
}

/// Run the full pipeline against `client`.
///
/// Operator credentials are validated before the first call so a missing
/// secret never results in a half-hardened server.
pub async fn run<C>(client: &C, config: &ProvisionConfig) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    let operator = config.security.operator_credentials()?;

    preflight(client, &config.endpoint, Some(&operator)).await?;
    adapt_security(client, &config.security, &operator).await?;
    provision_workspaces(client, &config.workspaces).await?;

    if !config.workspaces.contains(&config.data_store.workspace) {
        warn!(
            workspace = %config.data_store.workspace,
            "data store workspace is not in the provisioned workspace list; \
             it must already exist on the server"
        );
    }
    provision_data_store(client, &config.data_store).await?;

    info!("provisioning complete");
    Ok(())
}

/// Verify the management API answers before anything is mutated.
///
/// The probe runs with the client's current credentials. When it fails
/// and `fallback` is given, the client is rebound to `fallback` and probed
/// once more: on a server hardened by an earlier run the default account
/// is already disabled, and only the operator can still authenticate.
pub async fn preflight<C>(
    client: &C,
    endpoint: &str,
    fallback: Option<&Credentials>,
) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    info!(endpoint, "checking management API connectivity");

    if client.connection_check().await {
        info!(stage = %Stage::Preflight, "management API reachable");
        return Ok(());
    }

    if let Some(operator) = fallback {
        debug!(
            username = %operator.username,
            "bootstrap probe failed, probing with operator credentials"
        );
        client.use_credentials(operator.clone());
        if client.connection_check().await {
            info!(
                stage = %Stage::Preflight,
                "management API reachable as operator (default account already disabled)"
            );
            return Ok(());
        }
    }

    Err(CoreError::Connectivity {
        url: endpoint.to_owned(),
    })
}

/// Create the operator account, grant it the admin role, and disable the
/// factory-default account. Afterwards the client authenticates as the
/// operator.
pub async fn adapt_security<C>(
    client: &C,
    security: &SecurityConfig,
    operator: &Credentials,
) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    let user = operator.username.as_str();

    match client
        .create_user(user, &operator.password)
        .await
        .map_err(CoreError::operation(
            Stage::Security,
            format!("create user '{user}'"),
        ))? {
        CreateOutcome::Created => info!(user, "operator account created"),
        CreateOutcome::AlreadyExists => info!(user, "operator account already exists"),
    }

    client
        .assign_role(user, &security.role)
        .await
        .map_err(CoreError::operation(
            Stage::Security,
            format!("assign role '{}' to '{user}'", security.role),
        ))?;
    info!(user, role = %security.role, "role assigned");

    client
        .update_user_enabled(&security.default_user, &security.default_password, false)
        .await
        .map_err(CoreError::operation(
            Stage::Security,
            format!("disable default account '{}'", security.default_user),
        ))?;
    info!(user = %security.default_user, "default account disabled");

    client.use_credentials(operator.clone());

    info!(stage = %Stage::Security, "security adaptation done");
    Ok(())
}

/// Create each workspace in order, one call at a time.
pub async fn provision_workspaces<C>(client: &C, names: &[String]) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    for name in names {
        match client
            .create_workspace(name)
            .await
            .map_err(CoreError::operation(
                Stage::Workspaces,
                format!("create workspace '{name}'"),
            ))? {
            CreateOutcome::Created => info!(workspace = %name, "workspace created"),
            CreateOutcome::AlreadyExists => {
                info!(workspace = %name, "workspace already exists");
            }
        }
    }

    info!(stage = %Stage::Workspaces, count = names.len(), "workspaces provisioned");
    Ok(())
}

/// Register the database-backed store. The target workspace is expected
/// to exist; ordering after [`provision_workspaces`] is what guarantees it.
pub async fn provision_data_store<C>(client: &C, config: &DataStoreConfig) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    let store = &config.store;

    let outcome = client
        .create_database_store(&config.workspace, store)
        .await
        .map_err(CoreError::operation(
            Stage::DataStore,
            format!(
                "create data store '{}' in workspace '{}'",
                store.name, config.workspace
            ),
        ))?;

    match outcome {
        CreateOutcome::Created => info!(
            workspace = %config.workspace,
            store = %store.name,
            host = %store.host,
            "data store created"
        ),
        CreateOutcome::AlreadyExists => info!(
            workspace = %config.workspace,
            store = %store.name,
            "data store already exists"
        ),
    }

    info!(stage = %Stage::DataStore, "data store provisioned");
    Ok(())
}

/// Preflight, then publish one feature type from an existing store.
///
/// Not part of [`run`]; the workspace and store must already exist.
pub async fn publish_layer<C>(
    client: &C,
    endpoint: &str,
    layer: &FeatureLayer,
) -> Result<(), CoreError>
where
    C: ManagementApi + ?Sized,
{
    preflight(client, endpoint, None).await?;

    client
        .publish_feature_layer(layer)
        .await
        .inspect_err(|e| {
            if e.status() == Some(404) {
                warn!(
                    workspace = %layer.workspace,
                    store = %layer.store,
                    "workspace or data store not found on the server"
                );
            }
        })
        .map_err(CoreError::operation(
            Stage::Publish,
            format!("publish layer '{}:{}'", layer.workspace, layer.name),
        ))?;

    info!(workspace = %layer.workspace, layer = %layer.name, "feature type published");
    Ok(())
}
