// geoprov-api: Async Rust client for the GeoServer REST management API

pub mod auth;
pub mod error;
pub mod rest;
pub mod transport;

pub use auth::Credentials;
pub use error::Error;
pub use rest::client::RestClient;
pub use rest::models::{AboutResource, CreateOutcome, FeatureLayer, PostgisStore};
pub use transport::{TlsMode, TransportConfig};
