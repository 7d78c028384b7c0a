//! Clap derive structures for the `geoprov` CLI.
//!
//! Everything the pipeline needs comes from `GSINIT_*` variables and
//! mounted secrets; the flags here only pick the action and log level.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// geoprov -- one-shot bootstrap provisioning for GeoServer
#[derive(Debug, Parser)]
#[command(
    name = "geoprov",
    version,
    about = "Bootstrap a GeoServer instance through its REST API",
    long_about = "Idempotent, one-shot provisioning of a GeoServer instance:\n\
        hardens the admin accounts, creates workspaces, and registers a\n\
        PostGIS data store. Safe to re-run; stops at the first failure.\n\n\
        Settings come from GSINIT_* environment variables or a TOML file.\n\
        Credentials are read from mounted secret files first.",
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Action to perform (default: run)
    #[command(subcommand)]
    pub command: Option<Command>,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// TOML settings file (environment variables still take priority)
    #[arg(long, env = "GSINIT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full provisioning pipeline
    Run,

    /// Only run the connectivity preflight against the REST API
    Check,

    /// Publish a feature type from an existing data store
    PublishLayer(PublishLayerArgs),

    /// Print the effective settings with secrets masked
    Config,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct PublishLayerArgs {
    /// Workspace holding the data store
    #[arg(long)]
    pub workspace: String,

    /// Data store to publish from
    #[arg(long)]
    pub store: String,

    /// Table or view name in the database
    #[arg(long)]
    pub native_name: String,

    /// Published layer name
    #[arg(long)]
    pub name: String,

    /// Human-readable title (defaults to the layer name)
    #[arg(long)]
    pub title: Option<String>,

    /// Declared spatial reference system
    #[arg(long, default_value = "EPSG:4326")]
    pub srs: String,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
