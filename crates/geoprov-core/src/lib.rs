//! Provisioning pipeline between `geoprov-api` and the `geoprov` binary.
//!
//! - **[`ManagementApi`]** — The capability set the pipeline needs from the
//!   server. [`geoprov_api::RestClient`] implements it; tests substitute a
//!   recording fake.
//!
//! - **[`provision::run`]** — The ordered pipeline: connectivity preflight,
//!   security adaptation, workspace provisioning, data store provisioning.
//!   Stops at the first error; every step is idempotent on the server side.
//!   [`provision::publish_layer`] publishes a layer outside the pipeline.
//!
//! - **[`ProvisionConfig`]** — Explicit configuration, built once at
//!   startup and passed by reference into every step.
//!
//! - **[`CoreError`]** — Configuration, connectivity, and operation errors.

pub mod api;
pub mod config;
pub mod error;
pub mod provision;

// ── Primary re-exports ──────────────────────────────────────────────
pub use api::ManagementApi;
pub use config::{ADMIN_ROLE, DataStoreConfig, ProvisionConfig, SecurityConfig, parse_name_list};
pub use error::CoreError;
pub use provision::{Stage, publish_layer, run};

pub use geoprov_api::{CreateOutcome, Credentials, FeatureLayer, PostgisStore};
