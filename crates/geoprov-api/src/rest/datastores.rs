// REST API data store and feature type endpoints
//
// Store creation is not create-if-absent: a duplicate name is rejected by
// the server and surfaced to the caller unchanged.

use tracing::debug;

use crate::error::Error;
use crate::rest::client::RestClient;
use crate::rest::models::{FeatureLayer, PostgisStore};

impl RestClient {
    /// Register a PostGIS data store inside a workspace.
    ///
    /// `POST /rest/workspaces/{ws}/datastores`
    pub async fn create_postgis_store(
        &self,
        workspace: &str,
        store: &PostgisStore,
    ) -> Result<(), Error> {
        let url = self.rest_url(&["workspaces", workspace, "datastores"])?;
        debug!(workspace, store = %store.name, host = %store.host, "creating PostGIS store");
        self.post_json(url, &store.to_request_body()).await
    }

    /// Publish a feature type from an existing store.
    ///
    /// `POST /rest/workspaces/{ws}/datastores/{store}/featuretypes`
    pub async fn publish_feature_type(&self, layer: &FeatureLayer) -> Result<(), Error> {
        let url = self.rest_url(&[
            "workspaces",
            &layer.workspace,
            "datastores",
            &layer.store,
            "featuretypes",
        ])?;
        debug!(
            workspace = %layer.workspace,
            store = %layer.store,
            layer = %layer.name,
            "publishing feature type"
        );
        self.post_json(url, &layer.to_request_body()).await
    }
}
