//! confesh-cli
//!
//! Command-line front end for the confession wall: one-shot commands and an
//! interactive shell over the same controller.

pub(crate) mod cli;
pub(crate) mod commands;
pub(crate) mod error;
pub(crate) mod logger;
pub(crate) mod runner;
pub(crate) mod session_store;
pub(crate) mod shell;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use error::{CliError, Result as CliResult};
pub use runner::run;
pub use session_store::{LoadedSession, SessionStore};
