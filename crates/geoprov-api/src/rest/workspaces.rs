// REST API workspace endpoints

use serde_json::json;
use tracing::debug;

use crate::error::Error;
use crate::rest::client::{RestClient, create_outcome};
use crate::rest::models::CreateOutcome;

impl RestClient {
    /// Create a workspace, reporting an existing one as
    /// [`CreateOutcome::AlreadyExists`].
    ///
    /// `POST /rest/workspaces` with `{"workspace": {"name": "..."}}`
    pub async fn create_workspace(&self, name: &str) -> Result<CreateOutcome, Error> {
        let url = self.rest_url(&["workspaces"])?;
        debug!(name, "creating workspace");
        create_outcome(self.post_json(url, &json!({ "workspace": { "name": name } })).await)
    }
}
