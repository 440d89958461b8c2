//! Repository Layer - Core Traits
//!
//! Defines the abstract interface for board persistence.
//! Implementations can use SQLite, in-memory, etc.

use async_trait::async_trait;
use crate::domain::{Board, DomainResult, UserId};

/// Durable storage holding one board document per user
///
/// `save` always receives the full board, so repeated saves are idempotent
/// and the last completed save is the stored state.
#[async_trait]
pub trait BoardStore: Send + Sync {
    /// Load the user's board, `None` if nothing was ever saved
    async fn load(&self, user_id: UserId) -> DomainResult<Option<Board>>;

    /// Replace the user's board
    async fn save(&self, user_id: UserId, board: &Board) -> DomainResult<()>;
}
