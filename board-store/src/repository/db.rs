//! Database Connection and Setup
//!
//! Manages the SQLite connection and migrations.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::{DomainError, DomainResult};

/// Shared connection slot, empty until the database is initialized
pub type SharedConnection = Arc<Mutex<Option<Connection>>>;

/// Database state wrapper
#[derive(Clone, Default)]
pub struct DbState {
    pub conn: SharedConnection,
}

/// Open the database at `db_path` and run migrations.
///
/// `:memory:` opens a private in-memory database.
pub async fn init_db(db_path: &Path) -> DomainResult<DbState> {
    let conn = Connection::open(db_path)?;
    run_migrations(&conn)?;

    log::info!("board database ready at {}", db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(Some(conn))),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kanban_boards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER NOT NULL UNIQUE,
            board_data TEXT NOT NULL
        )",
        [],
    )?;

    // Added after the first release
    if !column_exists(conn, "kanban_boards", "updated_at")? {
        conn.execute(
            "ALTER TABLE kanban_boards ADD COLUMN updated_at INTEGER NOT NULL DEFAULT 0",
            [],
        )
        .map_err(|e| DomainError::Internal(format!("Failed to add updated_at: {}", e)))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrations_are_repeatable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("boards.db");

        let first = init_db(&path).await.unwrap();
        assert!(first.conn.lock().await.is_some());
        drop(first);

        let second = init_db(&path).await.unwrap();
        let guard = second.conn.lock().await;
        let conn = guard.as_ref().unwrap();
        assert!(column_exists(conn, "kanban_boards", "updated_at").unwrap());
        assert!(!column_exists(conn, "kanban_boards", "position").unwrap());
    }

    #[tokio::test]
    async fn test_uninitialized_state() {
        let state = DbState::default();
        assert!(state.conn.lock().await.is_none());
    }
}
