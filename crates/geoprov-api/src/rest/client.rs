// REST management API HTTP client
//
// Wraps `reqwest::Client` with `/rest/...` URL construction, Basic auth,
// and status mapping. Endpoint groups (about, security, workspaces,
// datastores) are implemented as inherent methods in sibling files so this
// module stays focused on transport mechanics.

use std::sync::{PoisonError, RwLock};

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::rest::models::CreateOutcome;
use crate::transport::TransportConfig;

/// Longest slice of an error body carried into [`Error::Api`].
const BODY_PREVIEW_CHARS: usize = 200;

/// HTTP client for the server's REST management API.
///
/// Every request carries HTTP Basic auth from the current [`Credentials`].
/// The credentials can be swapped at runtime with
/// [`use_credentials`](Self::use_credentials), e.g. once the bootstrap
/// account has been disabled and an operator account takes over.
pub struct RestClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: RwLock<Credentials>,
}

impl RestClient {
    /// Create a client from a `TransportConfig`.
    ///
    /// The `base_url` is the server's web root (e.g.
    /// `http://localhost:8080/geoserver`); REST paths are appended below
    /// `{base_url}/rest/`.
    pub fn new(
        base_url: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, base_url, credentials)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        if base_url.cannot_be_a_base() {
            return Err(Error::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }
        Ok(Self {
            http,
            base_url,
            credentials: RwLock::new(credentials),
        })
    }

    /// Username of the credentials currently attached to requests.
    pub fn username(&self) -> String {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .username
            .clone()
    }

    // ── Credential management ───────────────────────────────────────

    /// Replace the credentials used for all subsequent requests.
    pub fn use_credentials(&self, credentials: Credentials) {
        debug!(username = %credentials.username, "switching REST credentials");
        *self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner) = credentials;
    }

    /// Apply the current credentials to a request builder.
    fn apply_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let guard = self
            .credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        guard.apply(builder)
    }

    // ── URL builder ─────────────────────────────────────────────────

    /// Build `{base}/rest/{segments...}` with each segment percent-encoded.
    ///
    /// Segments are pushed individually, so user, role and workspace names
    /// containing `/` or spaces cannot escape their position in the path.
    pub(crate) fn rest_url(&self, segments: &[&str]) -> Result<Url, Error> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::UnsupportedBaseUrl {
                url: self.base_url.to_string(),
            })?
            .pop_if_empty()
            .push("rest")
            .extend(segments);
        Ok(url)
    }

    // ── Request helpers ─────────────────────────────────────────────

    /// Send a GET request and return the response body.
    pub(crate) async fn get_text(&self, url: Url) -> Result<String, Error> {
        debug!("GET {}", url);

        let builder = self.apply_auth(self.http.get(url));
        let resp = builder.send().await?;
        let resp = check_status(resp).await?;

        Ok(resp.text().await?)
    }

    /// Send a POST request with a JSON body.
    pub(crate) async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<(), Error> {
        debug!("POST {}", url);

        let builder = self.apply_auth(self.http.post(url).json(body));
        let resp = builder.send().await?;
        check_status(resp).await?;

        Ok(())
    }

    /// Send a POST request without a body.
    pub(crate) async fn post_empty(&self, url: Url) -> Result<(), Error> {
        debug!("POST {}", url);

        let builder = self.apply_auth(self.http.post(url));
        let resp = builder.send().await?;
        check_status(resp).await?;

        Ok(())
    }
}

/// Map a response to `Ok` on 2xx, or to the matching [`Error`] otherwise.
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    trace!(%status, "response received");

    if status.is_success() {
        return Ok(resp);
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(Error::Authentication {
            message: "credentials rejected (HTTP 401)".into(),
        });
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api {
        status: status.as_u16(),
        message: preview(&body),
    })
}

/// Truncate a response body to a log-friendly preview on a char boundary.
pub(crate) fn preview(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_PREVIEW_CHARS {
        return trimmed.to_owned();
    }
    let mut out: String = trimmed.chars().take(BODY_PREVIEW_CHARS).collect();
    out.push('…');
    out
}

/// Fold a duplicate-resource rejection into [`CreateOutcome::AlreadyExists`].
pub(crate) fn create_outcome(result: Result<(), Error>) -> Result<CreateOutcome, Error> {
    match result {
        Ok(()) => Ok(CreateOutcome::Created),
        Err(e) if e.is_conflict() => {
            debug!(error = %e, "resource already exists");
            Ok(CreateOutcome::AlreadyExists)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use secrecy::SecretString;
    use url::Url;

    use super::{RestClient, preview};
    use crate::auth::Credentials;

    fn client(base: &str) -> RestClient {
        RestClient::with_client(
            reqwest::Client::new(),
            Url::parse(base).unwrap(),
            Credentials::new("admin", SecretString::from("geoserver")),
        )
        .unwrap()
    }

    #[test]
    fn rest_url_appends_below_base_path() {
        let c = client("http://localhost:8080/geoserver");
        let url = c.rest_url(&["workspaces"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/geoserver/rest/workspaces");

        let c = client("http://localhost:8080/geoserver/");
        let url = c.rest_url(&["about", "version.json"]).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/geoserver/rest/about/version.json"
        );
    }

    #[test]
    fn rest_url_encodes_segments() {
        let c = client("http://gs.local");
        let url = c
            .rest_url(&["security", "usergroup", "user", "ops team/1"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://gs.local/rest/security/usergroup/user/ops%20team%2F1"
        );
    }

    #[test]
    fn cannot_be_a_base_is_rejected() {
        let result = RestClient::with_client(
            reqwest::Client::new(),
            Url::parse("mailto:ops@example.com").unwrap(),
            Credentials::new("admin", SecretString::from("geoserver")),
        );
        assert!(result.is_err());
    }

    #[test]
    fn use_credentials_swaps_username() {
        let c = client("http://gs.local");
        assert_eq!(c.username(), "admin");
        c.use_credentials(Credentials::new("ops", SecretString::from("s3cret")));
        assert_eq!(c.username(), "ops");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let long = "é".repeat(300);
        let p = preview(&long);
        assert_eq!(p.chars().count(), 201);
        assert!(p.ends_with('…'));
        assert_eq!(preview("  short  "), "short");
    }
}
