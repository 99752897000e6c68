use crate::cli::Cli;
use crate::commands;
use crate::error::Result as CliResult;
use crate::logger;
use crate::session_store::SessionStore;

use confesh_app::WallController;
use confesh_client::{Session, WallClient};
use confesh_config::{BackendKind, Config};

use std::process::ExitCode;

use chrono::Utc;
use log::{info, warn};
use tokio::io::BufReader;

/// Run a parsed command line to completion.
///
/// Exit code 0 on success, 1 on startup errors or when the action produced
/// an error notice.
pub async fn run(cli: Cli) -> ExitCode {
    match try_run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn try_run(cli: Cli) -> CliResult<bool> {
    let config_dir = match cli.config_dir {
        Some(dir) => dir,
        None => Config::config_dir()?,
    };

    let mut config = Config::load_from(&config_dir)?;
    if let Some(kind) = cli.backend {
        config.backend.kind = kind;
    }
    config.validate()?;

    logger::initialize(&config.logging)?;
    config.log_summary();

    let client = WallClient::new(confesh_client::connect(&config.backend));

    // The in-memory backend forgets its accounts on exit, so only managed sessions persist.
    let store = (config.backend.kind == BackendKind::Firebase)
        .then(|| SessionStore::new(&config_dir));
    let restored = match store {
        Some(ref store) => restore_session(store, &client)?,
        None => None,
    };

    let mut controller = WallController::new(client.clone());
    controller.start().await;

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let outcome = commands::execute(
        cli.command,
        &mut controller,
        &config.wall.title,
        &mut input,
        &mut out,
    )
    .await?;
    controller.shutdown();

    if let Some(ref store) = store {
        store.sync(restored.as_ref(), client.session().as_ref())?;
    }

    let notices = controller.drain_notices();
    for notice in &notices {
        eprintln!("{notice}");
    }

    Ok(commands::succeeded(outcome, &notices))
}

/// Hand a stored, unexpired session to the client.
fn restore_session(store: &SessionStore, client: &WallClient) -> CliResult<Option<Session>> {
    let loaded = store.load()?;

    if let Some(err) = loaded.corruption_error {
        warn!("Ignoring unreadable session file ({err}); starting signed out");
        store.backup_corrupted()?;
    }

    match loaded.session {
        Some(session) if session.is_expired(Utc::now()) => {
            warn!(
                "Stored session for {} has expired; sign in again",
                session.identity.id
            );
            store.clear()?;
            Ok(None)
        }
        Some(session) => {
            info!("Restoring session for {}", session.identity.id);
            client.restore_session(session.clone());
            Ok(Some(session))
        }
        None => Ok(None),
    }
}
