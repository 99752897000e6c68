use crate::commands::Commands;

use confesh_config::BackendKind;

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "confesh")]
#[command(about = "HCDC Confesh Wall: post and browse confessions")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub(crate) command: Commands,

    /// Config directory (defaults to $CONFESH_CONFIG_DIR, then ./.confesh)
    #[arg(long, global = true)]
    pub(crate) config_dir: Option<PathBuf>,

    /// Backend to talk to, overriding the config file
    #[arg(long, global = true, value_parser = parse_backend_kind)]
    pub(crate) backend: Option<BackendKind>,
}

fn parse_backend_kind(value: &str) -> Result<BackendKind, String> {
    value
        .parse::<BackendKind>()
        .map_err(|_| format!("unknown backend '{value}' (expected firebase or memory)"))
}
