use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

/// Every failure a wall action can surface to the user.
#[derive(Error, Debug)]
pub enum WallError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Authentication required: {message} {location}")]
    AuthRequired {
        message: String,
        location: ErrorLocation,
    },

    #[error("Authentication failed: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    #[error("Backend unavailable: {message} {location}")]
    BackendUnavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl WallError {
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        WallError::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth_required<S: Into<String>>(message: S) -> Self {
        WallError::AuthRequired {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        WallError::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn backend_unavailable<S: Into<String>>(message: S) -> Self {
        WallError::BackendUnavailable {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Short machine-readable name of the error class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::AuthRequired { .. } => "AUTH_REQUIRED",
            Self::Auth { .. } => "AUTH_ERROR",
            Self::BackendUnavailable { .. } => "BACKEND_UNAVAILABLE",
        }
    }

    /// Message without the source location, suitable for display.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation { message, .. }
            | Self::AuthRequired { message, .. }
            | Self::Auth { message, .. }
            | Self::BackendUnavailable { message, .. } => message,
        }
    }
}

pub type Result<T> = StdResult<T, WallError>;
