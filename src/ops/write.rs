//! Writing daily entries.

use crate::config::Config;
use crate::editor::Editor;
use crate::errors::{AppError, AppResult, LockError};
use crate::journal::EntryStore;
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Exclusive advisory lock on one date's entry, released on drop.
#[derive(Debug)]
pub struct EntryLock {
    file: File,
    path: PathBuf,
}

impl EntryLock {
    /// Takes the lock for `date` under `lock_dir` without blocking.
    ///
    /// # Errors
    ///
    /// Returns `LockError::EntryBusy` if another process holds it and
    /// `LockError::AcquisitionFailed` for any other failure.
    pub fn acquire(lock_dir: &Path, date: NaiveDate) -> AppResult<Self> {
        fs::create_dir_all(lock_dir)?;
        let path = lock_dir.join(format!("{}.lock", date));

        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)
            .map_err(|source| LockError::AcquisitionFailed {
                path: path.clone(),
                source,
            })?;

        if let Err(source) = FileExt::try_lock_exclusive(&file) {
            if source.kind() == fs2::lock_contended_error().kind() {
                return Err(LockError::EntryBusy { path }.into());
            }
            return Err(LockError::AcquisitionFailed { path, source }.into());
        }

        debug!("Acquired entry lock {:?}", path);
        Ok(Self { file, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for EntryLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release entry lock {:?}: {}", self.path, e);
        }
    }
}

/// Opens the entry for `date` in `editor` and stores the result.
///
/// The current text is copied into a scratch file, the date is locked while
/// the editor runs, and the store is only written when the text changed.
/// A blank buffer counts as no change.
/// Returns whether anything was saved.
///
/// # Errors
///
/// Returns an error if the date is locked by another process, the editor
/// fails, or the store cannot be read or written.
pub fn write_entry(
    config: &Config,
    store: &dyn EntryStore,
    editor: &dyn Editor,
    date: NaiveDate,
) -> AppResult<bool> {
    let _lock = EntryLock::acquire(&config.lock_dir(), date)?;

    let existing = store.get(date)?.unwrap_or_default();

    let mut scratch = tempfile::Builder::new()
        .prefix(&format!("mosaic-{}-", date))
        .suffix(".md")
        .tempfile()?;
    scratch.write_all(existing.as_bytes())?;
    scratch.flush()?;

    editor.edit(scratch.path())?;

    let edited = fs::read_to_string(scratch.path())?;
    if edited == existing {
        info!("Entry for {} unchanged", date);
        return Ok(false);
    }
    if edited.trim().is_empty() {
        warn!("Editor left an empty entry for {}; keeping the stored text", date);
        return Ok(false);
    }

    store.put(date, &edited)?;
    info!("Entry for {} saved", date);
    Ok(true)
}

/// Stores `text` as the entry for `date` without an editor.
///
/// # Errors
///
/// Returns `AppError::Journal` for blank text, or a store error.
pub fn save_text(store: &dyn EntryStore, date: NaiveDate, text: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::Journal(format!(
            "Refusing to save an empty entry for {}",
            date
        )));
    }
    store.put(date, text)?;
    info!("Entry for {} saved", date);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EditorError;
    use crate::journal::MemoryEntryStore;
    use tempfile::{tempdir, TempDir};

    struct TypingEditor(&'static str);

    impl Editor for TypingEditor {
        fn edit(&self, path: &Path) -> AppResult<()> {
            let mut text = fs::read_to_string(path)?;
            text.push_str(self.0);
            fs::write(path, text)?;
            Ok(())
        }
    }

    struct ClearingEditor;

    impl Editor for ClearingEditor {
        fn edit(&self, path: &Path) -> AppResult<()> {
            fs::write(path, "  \n\n")?;
            Ok(())
        }
    }

    struct FailingEditor;

    impl Editor for FailingEditor {
        fn edit(&self, _path: &Path) -> AppResult<()> {
            Err(EditorError::NonZeroExit {
                command: "vim".to_string(),
                status_code: 1,
            }
            .into())
        }
    }

    fn test_config() -> (TempDir, Config) {
        let dir = tempdir().unwrap();
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        (dir, config)
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_write_entry_saves_new_text() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();

        let saved = write_entry(&config, &store, &TypingEditor("晚风很轻"), date()).unwrap();

        assert!(saved);
        assert_eq!(store.get(date()).unwrap().as_deref(), Some("晚风很轻"));
    }

    #[test]
    fn test_write_entry_appends_to_existing() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();
        store.put(date(), "今天下雨了。").unwrap();

        write_entry(&config, &store, &TypingEditor("猫睡着了。"), date()).unwrap();

        assert_eq!(
            store.get(date()).unwrap().as_deref(),
            Some("今天下雨了。猫睡着了。")
        );
    }

    #[test]
    fn test_write_entry_unchanged() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();
        store.put(date(), "旧书").unwrap();

        let saved = write_entry(&config, &store, &TypingEditor(""), date()).unwrap();

        assert!(!saved);
    }

    #[test]
    fn test_write_entry_ignores_blank_buffer() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();

        assert!(!write_entry(&config, &store, &ClearingEditor, date()).unwrap());
        assert!(store.get(date()).unwrap().is_none());

        store.put(date(), "旧书").unwrap();
        assert!(!write_entry(&config, &store, &ClearingEditor, date()).unwrap());
        assert_eq!(store.get(date()).unwrap().as_deref(), Some("旧书"));
    }

    #[test]
    fn test_write_entry_editor_failure_keeps_entry() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();
        store.put(date(), "旧书").unwrap();

        let result = write_entry(&config, &store, &FailingEditor, date());

        assert!(matches!(result, Err(AppError::Editor(_))));
        assert_eq!(store.get(date()).unwrap().as_deref(), Some("旧书"));
    }

    #[test]
    fn test_entry_lock_is_exclusive() {
        let dir = tempdir().unwrap();

        let held = EntryLock::acquire(dir.path(), date()).unwrap();
        assert!(held.path().ends_with("2024-06-01.lock"));

        match EntryLock::acquire(dir.path(), date()) {
            Err(AppError::Lock(LockError::EntryBusy { path })) => {
                assert_eq!(path, held.path());
            }
            other => panic!("Expected EntryBusy, got {:?}", other),
        }

        drop(held);
        assert!(EntryLock::acquire(dir.path(), date()).is_ok());
    }

    #[test]
    fn test_write_entry_rejects_locked_date() {
        let (_dir, config) = test_config();
        let store = MemoryEntryStore::new();
        let _held = EntryLock::acquire(&config.lock_dir(), date()).unwrap();

        let result = write_entry(&config, &store, &TypingEditor("晚风"), date());

        assert!(matches!(
            result,
            Err(AppError::Lock(LockError::EntryBusy { .. }))
        ));
        assert!(store.get(date()).unwrap().is_none());
    }

    #[test]
    fn test_save_text() {
        let store = MemoryEntryStore::new();

        save_text(&store, date(), "街角的灯亮了").unwrap();
        assert_eq!(store.get(date()).unwrap().as_deref(), Some("街角的灯亮了"));

        assert!(matches!(
            save_text(&store, date(), "   "),
            Err(AppError::Journal(_))
        ));
    }
}
