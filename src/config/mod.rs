//! Configuration management for the mosaic application.
//!
//! Settings come from environment variables with sensible defaults.
//!
//! # Environment Variables
//!
//! - `MOSAIC_DIR`: Data directory holding the database and lock files
//!   (defaults to ~/Documents/mosaic)
//! - `MOSAIC_EDITOR`: Editor to use for daily entries
//! - `EDITOR`: Fallback editor if MOSAIC_EDITOR is not set (defaults to "vim")
//! - `MOSAIC_OLLAMA_URL`: Ollama server (defaults to http://127.0.0.1:11434)
//! - `MOSAIC_TEXT_MODEL`: Chat model for phrase extraction and keywords
//! - `MOSAIC_IMAGE_MODEL`: Image model; when unset, collages use the
//!   fallback gallery
//! - `HOME`: Used for expanding the default data directory path

use crate::constants::{
    DATABASE_FILENAME, DEFAULT_DATA_SUBDIR, DEFAULT_EDITOR_COMMAND, DEFAULT_OLLAMA_URL,
    DEFAULT_TEXT_MODEL, EDITOR_FORBIDDEN_CHARS, ENV_VAR_EDITOR, ENV_VAR_HOME,
    ENV_VAR_IMAGE_MODEL, ENV_VAR_MOSAIC_DIR, ENV_VAR_MOSAIC_EDITOR, ENV_VAR_OLLAMA_URL,
    ENV_VAR_TEXT_MODEL, LOCK_SUBDIR, REDACTED_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Runtime configuration.
///
/// # Examples
///
/// ```
/// use mosaic::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     data_dir: PathBuf::from("/tmp/mosaic"),
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.db_path(), PathBuf::from("/tmp/mosaic/mosaic.db"));
/// ```
#[derive(Clone)]
pub struct Config {
    /// Editor command: MOSAIC_EDITOR, then EDITOR, then "vim".
    pub editor: String,

    /// Directory holding the database and lock files.
    pub data_dir: PathBuf,

    pub ollama_url: String,

    /// Chat model used for phrase extraction and illustration keywords.
    pub text_model: String,

    /// Image model. `None` disables synthesis.
    pub image_model: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("editor", &REDACTED_PLACEHOLDER)
            .field("data_dir", &REDACTED_PLACEHOLDER)
            .field("ollama_url", &self.ollama_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            editor: DEFAULT_EDITOR_COMMAND.to_string(),
            data_dir: PathBuf::from(""),
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: None,
        }
    }
}

impl Config {
    /// Validates an editor command string.
    ///
    /// Rejects empty commands, commands with spaces, and shell
    /// metacharacters.
    fn validate_editor_command(editor_cmd: &str) -> AppResult<&str> {
        if editor_cmd.is_empty() {
            return Err(AppError::Config(
                "Editor command cannot be empty".to_string(),
            ));
        }

        if editor_cmd.contains(' ') {
            return Err(AppError::Config(
                "Editor command cannot contain spaces. Use a wrapper script or shell alias for editors requiring arguments".to_string(),
            ));
        }

        if let Some(ch) = editor_cmd.chars().find(|c| EDITOR_FORBIDDEN_CHARS.contains(c)) {
            return Err(AppError::Config(format!(
                "Editor command cannot contain shell metacharacters: '{}'. Use a wrapper script or shell alias instead",
                ch
            )));
        }

        Ok(editor_cmd)
    }

    /// Loads configuration from environment variables.
    ///
    /// The data directory is expanded with `shellexpand`, so `~` and
    /// `$VARS` work.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if path expansion fails or the editor
    /// command fails validation.
    pub fn load() -> AppResult<Self> {
        let editor_raw = env::var(ENV_VAR_MOSAIC_EDITOR)
            .or_else(|_| env::var(ENV_VAR_EDITOR))
            .unwrap_or_else(|_| DEFAULT_EDITOR_COMMAND.to_string());
        let editor = Config::validate_editor_command(&editor_raw)?;

        let data_dir_str = env::var(ENV_VAR_MOSAIC_DIR).unwrap_or_else(|_| {
            let home = env::var(ENV_VAR_HOME).unwrap_or_default();
            format!("{}/{}", home, DEFAULT_DATA_SUBDIR)
        });

        let expanded_path = shellexpand::full(&data_dir_str)
            .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
        let data_dir = PathBuf::from(expanded_path.into_owned());

        if data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        let ollama_url = non_empty_var(ENV_VAR_OLLAMA_URL)
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        let text_model = non_empty_var(ENV_VAR_TEXT_MODEL)
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());

        Ok(Config {
            editor: editor.to_string(),
            data_dir,
            ollama_url,
            text_model,
            image_model: non_empty_var(ENV_VAR_IMAGE_MODEL),
        })
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the data directory is empty or relative,
    /// the editor is empty, or the Ollama URL is not http(s).
    pub fn validate(&self) -> AppResult<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Data directory path is empty".to_string()));
        }

        if self.editor.is_empty() {
            return Err(AppError::Config("Editor command is empty".to_string()));
        }

        if !self.data_dir.is_absolute() {
            return Err(AppError::Config(
                "Data directory must be an absolute path".to_string(),
            ));
        }

        if !(self.ollama_url.starts_with("http://") || self.ollama_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "Ollama URL must start with http:// or https://, got '{}'",
                self.ollama_url
            )));
        }

        Ok(())
    }

    /// Location of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILENAME)
    }

    /// Directory for per-date edit locks.
    pub fn lock_dir(&self) -> PathBuf {
        self.data_dir.join(LOCK_SUBDIR)
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
