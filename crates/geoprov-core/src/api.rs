// ── Management API capability set ──
//
// The pipeline talks to the server only through this trait, so the real
// REST client and test fakes are interchangeable.

use async_trait::async_trait;
use secrecy::SecretString;

use geoprov_api::{
    CreateOutcome, Credentials, Error as ApiError, FeatureLayer, PostgisStore, RestClient,
};

/// Administrative operations the provisioning pipeline needs from the server.
///
/// Every method except [`use_credentials`](Self::use_credentials) is one
/// network round trip. Implementations must not retry.
#[async_trait]
pub trait ManagementApi: Send + Sync {
    /// Liveness probe with the current credentials. Fails closed.
    async fn connection_check(&self) -> bool;

    async fn create_user(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<CreateOutcome, ApiError>;

    /// Bind `role` to `name`. Re-binding a held role must succeed.
    async fn assign_role(&self, name: &str, role: &str) -> Result<(), ApiError>;

    async fn update_user_enabled(
        &self,
        name: &str,
        password: &SecretString,
        enabled: bool,
    ) -> Result<(), ApiError>;

    async fn create_workspace(&self, name: &str) -> Result<CreateOutcome, ApiError>;

    /// Register a database-backed store in `workspace`.
    ///
    /// No existence pre-check is performed; whatever the server answers for
    /// a duplicate is surfaced unchanged.
    async fn create_database_store(
        &self,
        workspace: &str,
        store: &PostgisStore,
    ) -> Result<CreateOutcome, ApiError>;

    async fn publish_feature_layer(&self, layer: &FeatureLayer) -> Result<(), ApiError>;

    /// Rebind the credentials used by subsequent calls. Local only.
    fn use_credentials(&self, credentials: Credentials);
}

#[async_trait]
impl ManagementApi for RestClient {
    async fn connection_check(&self) -> bool {
        self.exists().await
    }

    async fn create_user(
        &self,
        name: &str,
        password: &SecretString,
    ) -> Result<CreateOutcome, ApiError> {
        RestClient::create_user(self, name, password).await
    }

    async fn assign_role(&self, name: &str, role: &str) -> Result<(), ApiError> {
        self.associate_user_role(name, role).await
    }

    async fn update_user_enabled(
        &self,
        name: &str,
        password: &SecretString,
        enabled: bool,
    ) -> Result<(), ApiError> {
        self.update_user(name, password, enabled).await
    }

    async fn create_workspace(&self, name: &str) -> Result<CreateOutcome, ApiError> {
        RestClient::create_workspace(self, name).await
    }

    async fn create_database_store(
        &self,
        workspace: &str,
        store: &PostgisStore,
    ) -> Result<CreateOutcome, ApiError> {
        self.create_postgis_store(workspace, store).await?;
        Ok(CreateOutcome::Created)
    }

    async fn publish_feature_layer(&self, layer: &FeatureLayer) -> Result<(), ApiError> {
        self.publish_feature_type(layer).await
    }

    fn use_credentials(&self, credentials: Credentials) {
        RestClient::use_credentials(self, credentials);
    }
}
