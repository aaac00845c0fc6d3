//! Error types shared across mosaic.
//!
//! Subsystems report through their own enums (`EditorError`, `LockError`,
//! `DatabaseError`, `AIError`); everything converts into [`AppError`] so
//! operations can return [`AppResult`] and propagate with `?`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents specific error cases that can occur when interacting with external editors.
///
/// Each variant captures the editor command and, where available, the
/// underlying I/O error.
///
/// # Examples
///
/// ```
/// use mosaic::errors::EditorError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "command not found");
/// let error = EditorError::CommandNotFound {
///     command: "vim".to_string(),
///     source: io_error,
/// };
///
/// assert!(format!("{}", error).contains("not found"));
/// assert!(format!("{}", error).contains("vim"));
/// ```
#[derive(Debug, Error)]
pub enum EditorError {
    /// Error when the specified editor command cannot be found.
    #[error("Editor command '{command}' not found: {source}. Please check that the editor is installed and available in your PATH.")]
    CommandNotFound {
        /// The editor command that was not found
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when permission is denied to execute the editor command.
    #[error("Permission denied when trying to execute editor '{command}': {source}. Please check file permissions or try running with appropriate access rights.")]
    PermissionDenied {
        /// The editor command that had permission denied
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor command fails to execute due to other I/O errors.
    #[error("Failed to execute editor '{command}': {source}. Please check system resources, disk space, or editor installation.")]
    ExecutionFailed {
        /// The editor command that failed to execute
        command: String,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Error when the editor exits with a non-zero status code.
    #[error("Editor '{command}' exited with non-zero status code: {status_code}. The entry was left unchanged.")]
    NonZeroExit {
        /// The editor command that exited with a non-zero status
        command: String,
        /// The exit status code
        status_code: i32,
    },
}

/// Represents errors that can occur when locking a daily entry for editing.
///
/// # Examples
///
/// ```
/// use mosaic::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::EntryBusy {
///     path: PathBuf::from("/data/.locks/2024-01-15.lock"),
/// };
///
/// assert!(format!("{}", error).contains("currently being edited"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the entry is already locked by another process.
    #[error("Entry is currently being edited by another process: {path}. Please wait for the other editor to close or check for existing mosaic processes.")]
    EntryBusy {
        /// The path to the lock file that is held
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the data directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur during database operations.
///
/// # Examples
///
/// ```
/// use mosaic::errors::DatabaseError;
///
/// let error = DatabaseError::from(rusqlite::Error::QueryReturnedNoRows);
/// assert!(format!("{}", error).starts_with("Database error"));
/// ```
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLite database error.
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error.
    #[error("Failed to get connection from pool: {0}\n\nThis may indicate database connection issues. Try closing other mosaic instances.")]
    Pool(#[from] r2d2::Error),

    /// A stored collage could not be encoded or decoded.
    #[error("Failed to (de)serialize stored collage: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Represents specific error cases that can occur during AI operations.
///
/// # Examples
///
/// ```
/// use mosaic::errors::AIError;
///
/// let error = AIError::ModelNotFound("llama3.2:3b".to_string());
/// assert!(format!("{}", error).contains("llama3.2:3b"));
/// ```
#[derive(Debug, Error)]
pub enum AIError {
    /// Ollama API is not reachable.
    #[error("Ollama API error: {0}. Is Ollama running? Try: ollama serve")]
    OllamaOffline(#[source] reqwest::Error),

    /// Requested model not found in Ollama.
    #[error("Model not found: {0}. Try: ollama pull {0}")]
    ModelNotFound(String),

    /// Invalid or unexpected response from Ollama API.
    #[error("Invalid response from Ollama: {0}")]
    InvalidResponse(String),

    /// The model answered, but with too few usable phrases.
    #[error("Extraction returned only {found} usable phrase(s), need at least {required}")]
    SparseResponse {
        /// Usable phrases found
        found: usize,
        /// Minimum accepted
        required: usize,
    },
}

/// Represents all possible errors that can occur in the mosaic application.
///
/// Not `Clone`, since it can carry `std::io::Error` and other sources.
///
/// # Examples
///
/// ```
/// use mosaic::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal entry logic (e.g., invalid date formats, empty entries).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors in collage construction (e.g., an invalid pool index).
    #[error("Collage error: {0}")]
    Collage(String),

    /// Errors when interacting with the text editor.
    #[error("Editor error: {0}")]
    Editor(#[from] EditorError),

    /// Errors related to entry locking.
    #[error("Entry locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to database operations.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Errors related to AI operations.
    #[error("AI error: {0}")]
    AI(#[from] AIError),
}

/// Result alias used by every fallible mosaic function.
///
/// ```
/// use mosaic::errors::{AppError, AppResult};
///
/// fn non_blank(text: &str) -> AppResult<&str> {
///     if text.trim().is_empty() {
///         return Err(AppError::Journal("entry is empty".to_string()));
///     }
///     Ok(text)
/// }
///
/// assert!(non_blank("  ").is_err());
/// ```
pub type AppResult<T> = Result<T, AppError>;
