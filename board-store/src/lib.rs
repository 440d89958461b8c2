//! Board Store
//!
//! Layered architecture:
//! - domain: board entities and error types
//! - repository: the `BoardStore` abstraction and its SQLite / in-memory
//!   implementations

pub mod domain;
pub mod repository;

pub use domain::{
    parse_due_date, Board, Column, ColumnId, ColumnKind, DomainError, DomainResult, Task, TaskId,
    UserId,
};
pub use repository::{init_db, BoardStore, DbState, InMemoryBoardStore, SqliteBoardStore};
