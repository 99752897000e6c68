//! confesh - HCDC Confesh Wall CLI
//!
//! # Examples
//!
//! ```bash
//! # Sign in once; the session is kept in the config directory
//! confesh sign-in --email maria@hcdc.edu.ph --password '...'
//!
//! # Read and post
//! confesh list
//! confesh post "I never returned that library book" --anonymous
//!
//! # Try everything offline
//! confesh --backend memory shell
//! ```

use confesh_cli::Cli;

use std::process::ExitCode;

use clap::Parser;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    confesh_cli::run(Cli::parse()).await
}
