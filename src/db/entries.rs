//! Entry persistence.
//!
//! One row per date. Each write stores a BLAKE3 checksum of the content so
//! unchanged saves can be skipped, and retention pruning drops everything
//! older than the newest N dates.

use crate::errors::{AppResult, DatabaseError};
use crate::journal::DailyEntry;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::debug;

/// Hex BLAKE3 digest of `content`.
pub fn checksum(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Inserts or replaces the entry for `date`.
///
/// Returns `false` without touching the row when the stored checksum already
/// matches `content`.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub fn upsert_entry(conn: &Connection, date: NaiveDate, content: &str) -> AppResult<bool> {
    let checksum = checksum(content);

    if get_entry_checksum(conn, date)?.as_deref() == Some(checksum.as_str()) {
        debug!("Entry for {} unchanged, skipping write", date);
        return Ok(false);
    }

    debug!("Upserting entry for date {} with checksum {}", date, checksum);
    conn.execute(
        r#"
        INSERT INTO entries (date, content, checksum, updated_at)
        VALUES (?1, ?2, ?3, CURRENT_TIMESTAMP)
        ON CONFLICT(date) DO UPDATE SET
            content = excluded.content,
            checksum = excluded.checksum,
            updated_at = CURRENT_TIMESTAMP
        "#,
        params![date.to_string(), content, checksum],
    )
    .map_err(DatabaseError::Sqlite)?;

    Ok(true)
}

/// Retrieves the entry text for a date.
///
/// Returns `Ok(None)` if no entry exists for the given date.
pub fn get_entry(conn: &Connection, date: NaiveDate) -> AppResult<Option<String>> {
    let result = conn.query_row(
        "SELECT content FROM entries WHERE date = ?1",
        params![date.to_string()],
        |row| row.get(0),
    );

    match result {
        Ok(content) => Ok(Some(content)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Gets the stored checksum for a date.
pub fn get_entry_checksum(conn: &Connection, date: NaiveDate) -> AppResult<Option<String>> {
    let result = conn.query_row(
        "SELECT checksum FROM entries WHERE date = ?1",
        params![date.to_string()],
        |row| row.get(0),
    );

    match result {
        Ok(checksum) => Ok(Some(checksum)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// All entries, newest date first.
pub fn list_entries(conn: &Connection) -> AppResult<Vec<DailyEntry>> {
    let mut stmt = conn
        .prepare("SELECT date, content FROM entries ORDER BY date DESC")
        .map_err(DatabaseError::Sqlite)?;

    let rows = stmt
        .query_map([], |row| {
            let date: String = row.get(0)?;
            Ok(DailyEntry {
                date: NaiveDate::parse_from_str(&date, "%Y-%m-%d").map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        0,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?,
                content: row.get(1)?,
            })
        })
        .map_err(DatabaseError::Sqlite)?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| DatabaseError::Sqlite(e).into())
}

/// Deletes all but the `keep` most recent dates. Returns the number removed.
pub fn prune_entries(conn: &Connection, keep: usize) -> AppResult<usize> {
    let removed = conn
        .execute(
            r#"
            DELETE FROM entries WHERE date NOT IN (
                SELECT date FROM entries ORDER BY date DESC LIMIT ?1
            )
            "#,
            params![keep as i64],
        )
        .map_err(DatabaseError::Sqlite)?;

    if removed > 0 {
        debug!("Pruned {} entries beyond retention", removed);
    }
    Ok(removed)
}
