//! Unified application error type.
//! All modules (api, core, session, export, cli) return AppError to keep the
//! error handling consistent and easy to surface to the user.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Local session store
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Remote gateway
    // ---------------------------
    #[error("Connection error with the server: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Remote(String),

    #[error("Incomplete response from the server")]
    IncompleteResponse,

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time zone: {0}")]
    InvalidTimeZone(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    // ---------------------------
    // Session / logic errors
    // ---------------------------
    #[error("No user is logged in. Run `shifttrack login` first")]
    NotLoggedIn,

    #[error("A shift is already in progress (started {0})")]
    ShiftAlreadyActive(String),

    #[error("No shift is in progress")]
    NoActiveShift,

    #[error("Operation reserved to the '{0}' role")]
    Forbidden(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("No data to export with the current filters")]
    NothingToExport,

    #[error("Export error: {0}")]
    Export(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Failure to show as a framed alert rather than an inline message.
    #[error("{0}")]
    Alert(Box<AppError>),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Short message meant for the person at the terminal: the remote
    /// message when the gateway supplied one, a generic connection notice for
    /// transport failures, the error text otherwise.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Http(_) => "Connection error with the server.".to_string(),
            AppError::Alert(inner) => inner.user_message(),
            other => other.to_string(),
        }
    }

    /// Mark the error for framed display.
    pub fn alert(self) -> Self {
        match self {
            AppError::Alert(_) => self,
            other => AppError::Alert(Box::new(other)),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
