//! Command handlers. Each one takes the loaded settings and resolves
//! secrets itself, so `config` can run without a reachable server.

pub mod check;
pub mod config_cmd;
pub mod publish;
pub mod run;

use geoprov_api::{Credentials, RestClient};
use geoprov_config::Settings;

use crate::cli::Command;
use crate::error::CliError;

pub async fn dispatch(command: Command, settings: &Settings) -> Result<(), CliError> {
    match command {
        Command::Run => run::handle(settings).await,
        Command::Check => check::handle(settings).await,
        Command::PublishLayer(args) => publish::handle(args, settings).await,
        Command::Config => config_cmd::handle(settings),
        // Handled in main before settings are loaded.
        Command::Completions(_) => Ok(()),
    }
}

/// A REST client authenticated as the factory-default account.
fn bootstrap_client(settings: &Settings) -> Result<RestClient, CliError> {
    let credentials = Credentials::new(settings.user.clone(), settings.bootstrap_password());
    Ok(RestClient::new(
        settings.base_url()?,
        credentials,
        &settings.transport(),
    )?)
}
