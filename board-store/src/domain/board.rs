//! Board Document
//!
//! The complete column + task state for one user, stored as a single JSON
//! document.

use serde::{Deserialize, Serialize};

use super::column::{Column, ColumnId};
use super::error::DomainResult;
use super::task::Task;

pub type UserId = u32;

/// One user's board
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Board {
    pub fn new(columns: Vec<Column>, tasks: Vec<Task>) -> Self {
        Self { columns, tasks }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty() && self.tasks.is_empty()
    }

    /// Tasks of one column, in board order
    pub fn tasks_in(&self, column_id: ColumnId) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |t| t.column_id == column_id)
    }

    /// Largest id used by any column or task
    pub fn max_id(&self) -> Option<u32> {
        self.columns
            .iter()
            .map(|c| c.id)
            .chain(self.tasks.iter().map(|t| t.id))
            .max()
    }

    pub fn to_json(&self) -> DomainResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
