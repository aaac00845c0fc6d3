//! Daily entries and the store that keeps them.
//!
//! Entries are keyed by calendar date. Stores keep only the
//! [`ENTRY_RETENTION_DAYS`] most recent dates: writing a new date evicts the
//! oldest once the limit is exceeded.

use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, ENTRY_RETENTION_DAYS};
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Raw journal text for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    pub content: String,
}

/// Date-keyed persistence for daily entries.
///
/// Implementations must apply the retention policy on [`put`](Self::put) and
/// return [`list`](Self::list) newest first.
pub trait EntryStore {
    /// Returns the entry text for `date`, if any.
    fn get(&self, date: NaiveDate) -> AppResult<Option<String>>;

    /// Stores `text` for `date`, replacing any previous text.
    fn put(&self, date: NaiveDate, text: &str) -> AppResult<()>;

    /// All retained entries, newest first.
    fn list(&self) -> AppResult<Vec<DailyEntry>>;
}

/// Parses a date in `YYYY-MM-DD` or `YYYYMMDD` format.
///
/// # Examples
///
/// ```
/// use mosaic::journal::parse_date;
///
/// assert_eq!(parse_date("2024-01-15").unwrap(), parse_date("20240115").unwrap());
/// assert!(parse_date("15/01/2024").is_err());
/// ```
pub fn parse_date(date_str: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date_str, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(date_str, DATE_FORMAT_COMPACT))
        .map_err(|e| AppError::Journal(format!("Invalid date format '{}': {}", date_str, e)))
}

/// In-memory store, mainly for tests and offline experiments.
#[derive(Debug, Default)]
pub struct MemoryEntryStore {
    entries: std::sync::Mutex<BTreeMap<NaiveDate, String>>,
    retention: usize,
}

impl MemoryEntryStore {
    pub fn new() -> Self {
        Self::with_retention(ENTRY_RETENTION_DAYS)
    }

    /// A store keeping at most `retention` dates.
    pub fn with_retention(retention: usize) -> Self {
        Self {
            entries: Default::default(),
            retention,
        }
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, BTreeMap<NaiveDate, String>>> {
        self.entries
            .lock()
            .map_err(|_| AppError::Journal("entry store lock poisoned".to_string()))
    }
}

impl EntryStore for MemoryEntryStore {
    fn get(&self, date: NaiveDate) -> AppResult<Option<String>> {
        Ok(self.lock()?.get(&date).cloned())
    }

    fn put(&self, date: NaiveDate, text: &str) -> AppResult<()> {
        let mut entries = self.lock()?;
        entries.insert(date, text.to_string());
        while entries.len() > self.retention {
            if let Some((&oldest, _)) = entries.iter().next() {
                debug!("Evicting entry for {}", oldest);
                entries.remove(&oldest);
            }
        }
        Ok(())
    }

    fn list(&self) -> AppResult<Vec<DailyEntry>> {
        Ok(self
            .lock()?
            .iter()
            .rev()
            .map(|(date, content)| DailyEntry {
                date: *date,
                content: content.clone(),
            })
            .collect())
    }
}
