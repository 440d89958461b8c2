//! Care Board
//!
//! Per-user Kanban board for tracking treatment tasks:
//! - store: board state manager and the task reorder algorithm
//! - context: the per-user session wiring state, drag handling and saving
//! - sync: debounced persistence to a `BoardStore`
//! - models: render snapshots for the presentation layer
//! - config: TOML configuration, store and logging setup

pub mod config;
pub mod context;
pub mod models;
pub mod reorder;
pub mod store;
pub mod sync;

pub use board_dragdrop::{DragController, DragIntent, DragPhase, EntityKind, EntityRef};
pub use board_store::{
    parse_due_date, Board, BoardStore, Column, ColumnId, ColumnKind, DomainError, DomainResult,
    InMemoryBoardStore, SqliteBoardStore, Task, TaskId, UserId,
};
pub use config::{open_store, BoardConfig, ConfigError};
pub use context::{BoardEntity, BoardSession};
pub use models::{BoardView, ColumnView, DragOverlay};
pub use store::{BoardState, IdGenerator};
pub use sync::PersistenceSync;
