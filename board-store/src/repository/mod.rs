//! Repository Layer
//!
//! Board persistence abstraction and implementations.

mod board_repo;
mod db;
mod memory_repo;
mod traits;


pub use board_repo::SqliteBoardStore;
pub use db::{init_db, DbState, SharedConnection};
pub use memory_repo::InMemoryBoardStore;
pub use traits::BoardStore;
