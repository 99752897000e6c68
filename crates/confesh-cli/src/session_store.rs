use crate::error::{CliError, Result as CliResult};

use confesh_client::Session;
use confesh_config::{Config, SESSION_FILENAME};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Result of loading the session file; distinguishes "absent" from "unreadable".
#[derive(Debug, Default)]
pub struct LoadedSession {
    pub session: Option<Session>,
    /// Present if the file exists but does not parse.
    pub corruption_error: Option<String>,
}

/// The signed-in session, kept as JSON in the config directory between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
    path: PathBuf,
}

impl SessionStore {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            dir: config_dir.to_path_buf(),
            path: Config::session_path(config_dir),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored session.
    ///
    /// A missing file is a signed-out start; a corrupted one is reported in
    /// `corruption_error` and otherwise treated the same.
    pub fn load(&self) -> CliResult<LoadedSession> {
        if !self.path.exists() {
            debug!("No session file at {:?}", self.path);
            return Ok(LoadedSession::default());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| CliError::file_read(self.path.clone(), e))?;

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                info!("Loaded session for {}", session.identity.id);
                Ok(LoadedSession {
                    session: Some(session),
                    corruption_error: None,
                })
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                Ok(LoadedSession {
                    session: None,
                    corruption_error: Some(e.to_string()),
                })
            }
        }
    }

    /// Write the session with the temp file, fsync, rename sequence.
    pub fn save(&self, session: &Session) -> CliResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| CliError::dir_creation(self.dir.clone(), e))?;

        let temp_path = self
            .dir
            .join(format!("{SESSION_FILENAME}.tmp.{}", std::process::id()));
        let json = serde_json::to_string_pretty(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| CliError::file_write(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| CliError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| CliError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            CliError::atomic_rename(temp_path, self.path.clone(), e)
        })?;

        info!("Saved session for {}", session.identity.id);
        Ok(())
    }

    /// Bring the file in line with the client's session after a command ran.
    ///
    /// Writes only when the session changed; removes the file once signed out.
    pub fn sync(&self, previous: Option<&Session>, current: Option<&Session>) -> CliResult<()> {
        match current {
            Some(session) if previous != Some(session) => self.save(session),
            Some(_) => Ok(()),
            None => self.clear(),
        }
    }

    /// Forget the stored session. Removing an absent file is not an error.
    pub fn clear(&self) -> CliResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CliError::file_write(self.path.clone(), e)),
        }
    }

    /// Move a corrupted session file aside as `session.json.corrupted.{timestamp}`.
    pub fn backup_corrupted(&self) -> CliResult<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self
            .dir
            .join(format!("{SESSION_FILENAME}.corrupted.{timestamp}"));

        fs::rename(&self.path, &backup_path)
            .map_err(|e| CliError::atomic_rename(self.path.clone(), backup_path.clone(), e))?;

        warn!("Backed up corrupted session to {backup_path:?}");
        Ok(Some(backup_path))
    }
}
