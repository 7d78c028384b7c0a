use thiserror::Error;

/// Top-level error type for the `geoprov-api` crate.
///
/// Covers every failure mode of the REST management API: authentication,
/// transport, URL construction, and non-success HTTP answers.
/// `geoprov-core` wraps these into step-scoped provisioning errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Credentials rejected (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The base URL cannot carry path segments (e.g. `mailto:`).
    #[error("Base URL cannot be used for REST paths: {url}")]
    UnsupportedBaseUrl { url: String },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── REST API ────────────────────────────────────────────────────
    /// Non-success HTTP answer from the management API.
    #[error("REST API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the server rejected the credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }

    /// Returns `true` if the server reported that the resource already exists.
    ///
    /// The REST API answers duplicate creations with 409 on most resources,
    /// but the user/group service reports them as a 4xx/5xx with an
    /// "already exists" message.
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Api { status: 409, .. } => true,
            Self::Api { message, .. } => message.to_ascii_lowercase().contains("already exists"),
            _ => false,
        }
    }

    /// HTTP status code, if the error came from an HTTP answer.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Authentication { .. } => Some(401),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
