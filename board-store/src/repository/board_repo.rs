//! SQLite Board Repository
//!
//! One row per user in `kanban_boards`, the board kept as a JSON document in
//! `board_data`. Queries run on the blocking pool while the connection lock
//! is held.

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use super::db::{DbState, SharedConnection};
use super::traits::BoardStore;
use crate::domain::{Board, DomainError, DomainResult, UserId};

pub struct SqliteBoardStore {
    conn: SharedConnection,
}

impl SqliteBoardStore {
    pub fn new(conn: SharedConnection) -> Self {
        Self { conn }
    }

    pub fn from_state(state: &DbState) -> Self {
        Self::new(state.conn.clone())
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> DomainResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> DomainResult<T> + Send + 'static,
    {
        let guard = self.conn.clone().lock_owned().await;
        tokio::task::spawn_blocking(move || {
            let conn = guard
                .as_ref()
                .ok_or_else(|| DomainError::Internal("Database not initialized".to_string()))?;
            f(conn)
        })
        .await
        .map_err(|e| DomainError::Internal(format!("Database task failed: {}", e)))?
    }
}

#[async_trait]
impl BoardStore for SqliteBoardStore {
    async fn load(&self, user_id: UserId) -> DomainResult<Option<Board>> {
        let data: Option<String> = self
            .with_conn(move |conn| {
                let data = conn
                    .query_row(
                        "SELECT board_data FROM kanban_boards WHERE user_id = ?",
                        params![user_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                Ok(data)
            })
            .await?;

        match data {
            Some(json) => {
                let board = Board::from_json(&json)?;
                log::debug!(
                    "loaded board for user {}: {} columns, {} tasks",
                    user_id,
                    board.columns.len(),
                    board.tasks.len()
                );
                Ok(Some(board))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: UserId, board: &Board) -> DomainResult<()> {
        let json = board.to_json()?;

        self.with_conn(move |conn| {
            conn.execute(
                "INSERT INTO kanban_boards (user_id, board_data, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(user_id) DO UPDATE SET board_data = excluded.board_data, updated_at = excluded.updated_at",
                params![user_id, json, chrono::Utc::now().timestamp_millis()],
            )?;
            Ok(())
        })
        .await
    }
}
