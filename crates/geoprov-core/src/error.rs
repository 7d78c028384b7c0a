// ── Core error types ──
//
// Three classes, all fatal: configuration problems found before any call,
// a failed connectivity preflight, and a failed administrative operation.
// Operation errors keep the underlying `geoprov_api::Error` as their source.

use thiserror::Error;

use crate::provision::Stage;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Management API at {url} is not reachable")]
    Connectivity { url: String },

    #[error("{stage}: {operation} failed")]
    Operation {
        stage: Stage,
        operation: String,
        #[source]
        source: geoprov_api::Error,
    },
}

impl CoreError {
    /// The pipeline stage the error was raised in.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Configuration { .. } => None,
            Self::Connectivity { .. } => Some(Stage::Preflight),
            Self::Operation { stage, .. } => Some(*stage),
        }
    }

    pub(crate) fn operation(
        stage: Stage,
        operation: impl Into<String>,
    ) -> impl FnOnce(geoprov_api::Error) -> Self {
        let operation = operation.into();
        move |source| Self::Operation {
            stage,
            operation,
            source,
        }
    }
}
