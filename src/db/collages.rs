//! Saved collage poems.
//!
//! Poems are stored whole as JSON. A date can accumulate several poems (each
//! `generate` and `compose` adds one); readers usually want the latest.

use crate::collage::CollagePoem;
use crate::errors::{AppResult, DatabaseError};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::debug;

/// Stores `poem` under its id and date.
pub fn save_collage(conn: &Connection, poem: &CollagePoem) -> AppResult<()> {
    let json = serde_json::to_string(poem).map_err(DatabaseError::Serialization)?;

    conn.execute(
        r#"
        INSERT INTO collages (id, date, poem_json, created_at)
        VALUES (?1, ?2, ?3, strftime('%Y-%m-%d %H:%M:%f', 'now'))
        ON CONFLICT(id) DO UPDATE SET poem_json = excluded.poem_json
        "#,
        params![poem.id, poem.date.to_string(), json],
    )
    .map_err(DatabaseError::Sqlite)?;

    debug!("Saved collage {} for {}", poem.id, poem.date);
    Ok(())
}

/// The most recently saved poem for `date`.
///
/// Returns `Ok(None)` when nothing has been generated for that date.
pub fn latest_collage(conn: &Connection, date: NaiveDate) -> AppResult<Option<CollagePoem>> {
    let result: Result<String, _> = conn.query_row(
        r#"
        SELECT poem_json FROM collages
        WHERE date = ?1
        ORDER BY created_at DESC, rowid DESC
        LIMIT 1
        "#,
        params![date.to_string()],
        |row| row.get(0),
    );

    match result {
        Ok(json) => {
            let poem = serde_json::from_str(&json).map_err(DatabaseError::Serialization)?;
            Ok(Some(poem))
        }
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(DatabaseError::Sqlite(e).into()),
    }
}

/// Number of poems saved for `date`.
pub fn count_collages(conn: &Connection, date: NaiveDate) -> AppResult<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM collages WHERE date = ?1",
            params![date.to_string()],
            |row| row.get(0),
        )
        .map_err(DatabaseError::Sqlite)?;
    Ok(count as usize)
}
