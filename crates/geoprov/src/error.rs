//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text. Every fatal error exits with the same code.

use miette::Diagnostic;
use thiserror::Error;

use geoprov_config::ConfigError;
use geoprov_core::{CoreError, Stage};

pub mod exit_code {
    pub const FAILURE: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Configuration ────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(geoprov::config),
        help(
            "Check the GSINIT_* environment variables and the --config file.\n\
             Run: geoprov config"
        )
    )]
    Config(#[from] ConfigError),

    #[error("{message}")]
    #[diagnostic(
        code(geoprov::missing_credentials),
        help(
            "Mount geoserver_user and geoserver_password in the secrets directory\n\
             or set GSINIT_NEW_USER and GSINIT_NEW_PASSWORD."
        )
    )]
    Configuration { message: String },

    // ── Connectivity ─────────────────────────────────────────────────
    #[error("GeoServer REST API at {url} is not reachable")]
    #[diagnostic(
        code(geoprov::connectivity),
        help(
            "Check that GeoServer is running and GSINIT_URL points at it.\n\
             The bootstrap account (GSINIT_USER / GSINIT_PASSWORD) or the operator\n\
             account must be able to authenticate."
        )
    )]
    Connectivity { url: String },

    // ── Operations ───────────────────────────────────────────────────
    #[error("{stage}: {operation} failed")]
    #[diagnostic(
        code(geoprov::operation),
        help(
            "Nothing was rolled back. Fix the cause and re-run;\n\
             completed steps are skipped as already present."
        )
    )]
    Operation {
        stage: Stage,
        operation: String,
        #[source]
        source: geoprov_api::Error,
    },

    #[error(transparent)]
    #[diagnostic(code(geoprov::client))]
    Client(#[from] geoprov_api::Error),
}

impl CliError {
    /// Exit code for process termination.
    #[allow(clippy::unused_self)]
    pub fn exit_code(&self) -> i32 {
        exit_code::FAILURE
    }

    /// One-line class of the failure for the fatal banner. The detail is
    /// left to the diagnostic report.
    pub fn title(&self) -> String {
        match self {
            Self::Config(_) | Self::Configuration { .. } => "configuration error".into(),
            Self::Connectivity { .. } => "GeoServer unreachable".into(),
            Self::Operation { stage, .. } => format!("{stage} failed"),
            Self::Client(_) => "REST client error".into(),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Configuration { message } => Self::Configuration { message },
            CoreError::Connectivity { url } => Self::Connectivity { url },
            CoreError::Operation {
                stage,
                operation,
                source,
            } => Self::Operation {
                stage,
                operation,
                source,
            },
        }
    }
}
