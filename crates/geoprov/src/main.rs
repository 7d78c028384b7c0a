mod cli;
mod commands;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output::Tone;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        output::banner(&format!("geoprov: {}", err.title()), &[], Tone::Failure);
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// `RUST_LOG` wins; otherwise info, debug with `-v` or `GSINIT_VERBOSE`,
/// trace with `-vv`.
fn init_tracing(verbosity: u8, verbose_setting: bool) {
    let filter = match (verbosity, verbose_setting) {
        (0, false) => "info",
        (0 | 1, _) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let command = cli.command.unwrap_or(Command::Run);

    // Completions need neither settings nor a server.
    if let Command::Completions(args) = command {
        let mut cmd = Cli::command();
        clap_complete::generate(args.shell, &mut cmd, "geoprov", &mut std::io::stdout());
        return Ok(());
    }

    let settings = geoprov_config::load_settings(cli.global.config.as_deref());
    init_tracing(
        cli.global.verbose,
        settings.as_ref().is_ok_and(|s| s.verbose),
    );
    let settings = settings?;

    tracing::debug!(command = ?command, "dispatching command");
    commands::dispatch(command, &settings).await
}
