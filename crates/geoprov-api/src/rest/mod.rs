// REST management API client
//
// Base path: `{base_url}/rest/`
// Auth: HTTP Basic

pub mod about;
pub mod client;
pub mod datastores;
pub mod models;
pub mod security;
pub mod workspaces;
