//! In-Memory Board Repository
//!
//! Nothing is written to disk. Boards are stored serialized so a load goes
//! through the same JSON path as the SQLite store.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::traits::BoardStore;
use crate::domain::{Board, DomainResult, UserId};

#[derive(Default)]
pub struct InMemoryBoardStore {
    boards: RwLock<HashMap<UserId, String>>,
}

impl InMemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardStore for InMemoryBoardStore {
    async fn load(&self, user_id: UserId) -> DomainResult<Option<Board>> {
        match self.boards.read().await.get(&user_id) {
            Some(json) => Ok(Some(Board::from_json(json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, user_id: UserId, board: &Board) -> DomainResult<()> {
        let json = board.to_json()?;
        self.boards.write().await.insert(user_id, json);
        Ok(())
    }
}
