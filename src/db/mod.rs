//! SQLite storage for entries and collages.
//!
//! Uses connection pooling via r2d2. [`Database`] implements
//! [`EntryStore`](crate::journal::EntryStore) and also keeps every generated
//! collage.
//!
//! # Module Structure
//!
//! - `schema`: Table definitions and schema initialization
//! - `entries`: Entry upsert, lookup and retention pruning
//! - `collages`: Poem persistence as JSON
//!
//! # Example
//!
//! ```no_run
//! use mosaic::db::Database;
//! use mosaic::journal::EntryStore;
//! use std::path::Path;
//!
//! let db = Database::open(Path::new("/tmp/mosaic.db"))?;
//! db.initialize_schema()?;
//! for entry in db.list()? {
//!     println!("{}", entry.date);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod collages;
pub mod entries;
pub mod schema;

use crate::collage::CollagePoem;
use crate::constants::ENTRY_RETENTION_DAYS;
use crate::errors::{AppResult, DatabaseError};
use crate::journal::{DailyEntry, EntryStore};
use chrono::NaiveDate;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use tracing::{debug, info};

/// Type alias for a pooled SQLite connection.
pub type PooledConnection = r2d2::PooledConnection<SqliteConnectionManager>;

/// Database handle with connection pooling.
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    retention: usize,
}

impl Database {
    /// Opens or creates the SQLite database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or the pool cannot be
    /// initialized.
    pub fn open(db_path: &Path) -> AppResult<Self> {
        debug!("Opening database at: {:?}", db_path);

        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(5)
            .connection_customizer(Box::new(ConnectionConfig))
            .build(manager)
            .map_err(DatabaseError::Pool)?;

        let conn = pool.get().map_err(DatabaseError::Pool)?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i32>(0))
            .map_err(DatabaseError::Sqlite)?;
        drop(conn);

        info!("Database opened successfully");
        Ok(Database {
            pool,
            retention: ENTRY_RETENTION_DAYS,
        })
    }

    /// Overrides how many dates [`EntryStore::put`] retains.
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    /// Gets a connection from the pool.
    pub fn get_conn(&self) -> AppResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| DatabaseError::Pool(e).into())
    }

    /// Creates all tables if they don't exist.
    pub fn initialize_schema(&self) -> AppResult<()> {
        let conn = self.get_conn()?;
        schema::create_tables(&conn)?;
        info!("Database schema initialized");
        Ok(())
    }

    /// Persists a generated or recomposed poem.
    pub fn save_collage(&self, poem: &CollagePoem) -> AppResult<()> {
        let conn = self.get_conn()?;
        collages::save_collage(&conn, poem)
    }

    /// The most recent poem saved for `date`, if any.
    pub fn latest_collage(&self, date: NaiveDate) -> AppResult<Option<CollagePoem>> {
        let conn = self.get_conn()?;
        collages::latest_collage(&conn, date)
    }
}

impl EntryStore for Database {
    fn get(&self, date: NaiveDate) -> AppResult<Option<String>> {
        let conn = self.get_conn()?;
        entries::get_entry(&conn, date)
    }

    fn put(&self, date: NaiveDate, text: &str) -> AppResult<()> {
        let conn = self.get_conn()?;
        if entries::upsert_entry(&conn, date, text)? {
            entries::prune_entries(&conn, self.retention)?;
        }
        Ok(())
    }

    fn list(&self) -> AppResult<Vec<DailyEntry>> {
        let conn = self.get_conn()?;
        entries::list_entries(&conn)
    }
}

/// Per-connection pragmas.
#[derive(Debug)]
struct ConnectionConfig;

impl r2d2::CustomizeConnection<Connection, rusqlite::Error> for ConnectionConfig {
    fn on_acquire(&self, conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        Ok(())
    }

    fn on_release(&self, _conn: Connection) {}
}
