// REST API server information endpoints

use tracing::debug;

use crate::error::Error;
use crate::rest::client::{RestClient, preview};
use crate::rest::models::{AboutEnvelope, AboutResource};

impl RestClient {
    /// Fetch the component version list.
    ///
    /// `GET /rest/about/version.json`
    pub async fn about_version(&self) -> Result<Vec<AboutResource>, Error> {
        let url = self.rest_url(&["about", "version.json"])?;
        let body = self.get_text(url).await?;

        let envelope: AboutEnvelope =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body: body.clone(),
            })?;
        Ok(envelope.about.resource)
    }

    /// Liveness probe: `true` when the version endpoint answers with the
    /// current credentials.
    ///
    /// Fails closed: transport errors, rejected credentials, and malformed
    /// answers all yield `false`.
    pub async fn exists(&self) -> bool {
        match self.about_version().await {
            Ok(resources) => {
                let version = resources
                    .iter()
                    .find(|r| r.name.eq_ignore_ascii_case("GeoServer"))
                    .and_then(AboutResource::version_string);
                debug!(?version, "management API reachable");
                true
            }
            Err(e) => {
                debug!(error = %e, "management API probe failed");
                false
            }
        }
    }
}
