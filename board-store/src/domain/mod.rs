//! Domain Layer
//!
//! Contains the board entities and core abstractions.
//! This layer has no storage dependencies beyond serde for serialization.

mod board;
mod column;
mod error;
mod task;

pub use board::{Board, UserId};
pub use column::{Column, ColumnId, ColumnKind};
pub use error::{DomainError, DomainResult};
pub use task::{parse_due_date, Task, TaskId};
