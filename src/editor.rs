//! Editor abstraction for writing daily entries.
//!
//! The write operation hands a scratch file to an [`Editor`] and reads it
//! back afterwards. Tests substitute an editor that writes the file directly.

use crate::errors::{AppResult, EditorError};
use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Opens a file for the user to edit and returns once editing is done.
///
/// # Examples
///
/// ```
/// use mosaic::editor::Editor;
/// use mosaic::errors::AppResult;
/// use std::path::Path;
///
/// struct TypingEditor(&'static str);
///
/// impl Editor for TypingEditor {
///     fn edit(&self, path: &Path) -> AppResult<()> {
///         std::fs::write(path, self.0)?;
///         Ok(())
///     }
/// }
///
/// let dir = tempfile::tempdir()?;
/// let file = dir.path().join("entry.md");
/// TypingEditor("晚风").edit(&file)?;
/// assert_eq!(std::fs::read_to_string(&file)?, "晚风");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Editor {
    /// Blocks until the user has finished editing `path`.
    ///
    /// # Errors
    ///
    /// Implementations return `AppError::Editor` when the editor cannot run
    /// or reports failure.
    fn edit(&self, path: &Path) -> AppResult<()>;
}

/// Launches an external editor process.
///
/// # Examples
///
/// ```no_run
/// use mosaic::editor::{Editor, SystemEditor};
/// use std::path::Path;
///
/// let editor = SystemEditor::new("vim");
/// editor.edit(Path::new("/tmp/entry.md"))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct SystemEditor {
    /// The command to run (e.g., "vim", "code", "nano").
    pub editor_cmd: String,
}

impl SystemEditor {
    pub fn new(editor_cmd: impl Into<String>) -> Self {
        Self {
            editor_cmd: editor_cmd.into(),
        }
    }
}

impl Editor for SystemEditor {
    fn edit(&self, path: &Path) -> AppResult<()> {
        debug!("Launching editor '{}' for {:?}", self.editor_cmd, path);

        let status = Command::new(&self.editor_cmd)
            .arg(path)
            .status()
            .map_err(|source| {
                let command = self.editor_cmd.clone();
                match source.kind() {
                    ErrorKind::NotFound => EditorError::CommandNotFound { command, source },
                    ErrorKind::PermissionDenied => {
                        EditorError::PermissionDenied { command, source }
                    }
                    _ => EditorError::ExecutionFailed { command, source },
                }
            })?;

        if !status.success() {
            return Err(EditorError::NonZeroExit {
                command: self.editor_cmd.clone(),
                status_code: status.code().unwrap_or(-1),
            }
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use std::cell::RefCell;
    use std::path::PathBuf;
    use tempfile::tempdir;

    struct RecordingEditor {
        edited: RefCell<Vec<PathBuf>>,
    }

    impl Editor for RecordingEditor {
        fn edit(&self, path: &Path) -> AppResult<()> {
            self.edited.borrow_mut().push(path.to_path_buf());
            Ok(())
        }
    }

    #[test]
    fn test_mock_editor_records_path() {
        let editor = RecordingEditor {
            edited: RefCell::new(Vec::new()),
        };

        editor.edit(Path::new("entry.md")).unwrap();

        assert_eq!(*editor.edited.borrow(), vec![PathBuf::from("entry.md")]);
    }

    #[test]
    fn test_missing_editor_command() {
        let dir = tempdir().unwrap();
        let editor = SystemEditor::new("mosaic-editor-that-does-not-exist");

        let result = editor.edit(&dir.path().join("entry.md"));

        match result {
            Err(AppError::Editor(EditorError::CommandNotFound { command, .. })) => {
                assert_eq!(command, "mosaic-editor-that-does-not-exist");
            }
            other => panic!("Expected CommandNotFound, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_editor_exit() {
        let dir = tempdir().unwrap();
        let editor = SystemEditor::new("true");
        assert!(editor.edit(&dir.path().join("entry.md")).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_editor_exit() {
        let dir = tempdir().unwrap();
        let editor = SystemEditor::new("false");

        let result = editor.edit(&dir.path().join("entry.md"));

        assert!(matches!(
            result,
            Err(AppError::Editor(EditorError::NonZeroExit { status_code: 1, .. }))
        ));
    }
}
