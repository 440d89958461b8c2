//! Board State Manager
//!
//! Holds the authoritative columns and tasks of one board and applies every
//! mutation synchronously. Operations that target a missing id, or are given
//! empty task content, change nothing and report it through their return
//! value instead of an error.
//!
//! Observers registered with [`BoardState::on_commit`] run after every
//! operation that changed the board.

use std::fmt;

use board_store::{Board, Column, ColumnId, Task, TaskId};
use chrono::{DateTime, Utc};

use crate::reorder::array_move;

type CommitHook = Box<dyn Fn(&Board) + Send + Sync>;

/// Monotonic id source shared by columns and tasks
#[derive(Debug, Clone)]
pub struct IdGenerator {
    /// `None` once every id has been handed out
    next: Option<u32>,
}

impl IdGenerator {
    /// Start above every id already present on the board
    pub fn for_board(board: &Board) -> Self {
        Self {
            next: board.max_id().map_or(Some(1), |max| max.checked_add(1)),
        }
    }

    pub fn next_id(&mut self) -> Option<u32> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

pub struct BoardState {
    board: Board,
    ids: IdGenerator,
    hooks: Vec<CommitHook>,
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("board", &self.board)
            .field("ids", &self.ids)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl BoardState {
    pub fn new(board: Board) -> Self {
        let ids = IdGenerator::for_board(&board);
        Self {
            board,
            ids,
            hooks: Vec::new(),
        }
    }

    /// Register an observer called with the committed board after each change
    pub fn on_commit(&mut self, hook: impl Fn(&Board) + Send + Sync + 'static) {
        self.hooks.push(Box::new(hook));
    }

    // ========================
    // Rendered state
    // ========================

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn columns(&self) -> &[Column] {
        &self.board.columns
    }

    pub fn tasks(&self) -> &[Task] {
        &self.board.tasks
    }

    /// Tasks of one column, in board order
    pub fn tasks_in(&self, column_id: ColumnId) -> impl Iterator<Item = &Task> + '_ {
        self.board.tasks_in(column_id)
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.board.columns.iter().find(|c| c.id == id)
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.board.tasks.iter().find(|t| t.id == id)
    }

    fn column_index(&self, id: ColumnId) -> Option<usize> {
        self.board.columns.iter().position(|c| c.id == id)
    }

    fn task_index(&self, id: TaskId) -> Option<usize> {
        self.board.tasks.iter().position(|t| t.id == id)
    }

    fn commit(&self) {
        for hook in &self.hooks {
            hook(&self.board);
        }
    }

    // ========================
    // Columns
    // ========================

    /// Append a column. Creates nothing once ids are exhausted.
    pub fn add_column(&mut self, title: impl Into<String>) -> Option<Column> {
        let Some(id) = self.ids.next_id() else {
            tracing::warn!("board ids exhausted, column not added");
            return None;
        };
        let column = Column::new(id, title.into());
        self.board.columns.push(column.clone());
        tracing::debug!(id = column.id, title = %column.title, "column added");
        self.commit();
        Some(column)
    }

    /// Remove a column and every task in it
    pub fn remove_column(&mut self, id: ColumnId) -> bool {
        let Some(index) = self.column_index(id) else {
            return false;
        };
        self.board.columns.remove(index);
        self.board.tasks.retain(|t| t.column_id != id);
        tracing::debug!(id, "column removed");
        self.commit();
        true
    }

    pub fn rename_column(&mut self, id: ColumnId, title: impl Into<String>) -> bool {
        let Some(index) = self.column_index(id) else {
            return false;
        };
        self.board.columns[index].title = title.into();
        self.commit();
        true
    }

    /// Move column `active_id` to the slot held by `over_id`
    pub fn reorder_columns(&mut self, active_id: ColumnId, over_id: ColumnId) -> bool {
        if active_id == over_id {
            return false;
        }
        let (Some(active), Some(over)) = (self.column_index(active_id), self.column_index(over_id)) else {
            return false;
        };
        array_move(&mut self.board.columns, active, over as isize);
        tracing::debug!(active_id, over_id, "columns reordered");
        self.commit();
        true
    }

    // ========================
    // Tasks
    // ========================

    /// Append a task to the board. Empty content, an unknown column or
    /// exhausted ids create nothing.
    pub fn add_task(
        &mut self,
        column_id: ColumnId,
        content: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Option<Task> {
        let content = content.into();
        if content.is_empty() || self.column_index(column_id).is_none() {
            return None;
        }
        let Some(id) = self.ids.next_id() else {
            tracing::warn!(column_id, "board ids exhausted, task not added");
            return None;
        };
        let task = Task::new(id, column_id, content).with_due_date(due_date);
        self.board.tasks.push(task.clone());
        tracing::debug!(id = task.id, column_id, "task added");
        self.commit();
        Some(task)
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.task_index(id) else {
            return false;
        };
        self.board.tasks.remove(index);
        self.commit();
        true
    }

    pub fn update_task_content(&mut self, id: TaskId, content: impl Into<String>) -> bool {
        let Some(index) = self.task_index(id) else {
            return false;
        };
        self.board.tasks[index].content = content.into();
        self.commit();
        true
    }

    /// Reorder or move a task while it is dragged.
    ///
    /// * over a task in another column: the task joins that column and is
    ///   moved to `over_index - 1` (the last slot when `over_index` is 0)
    /// * over a task in the same column: moved to `over_index`
    /// * over a column: joins it, keeping its place in the sequence
    ///
    /// Runs identically for drag-over previews and the final drop.
    pub fn move_task(&mut self, active_id: TaskId, over_id: u32, over_is_column: bool) -> bool {
        if active_id == over_id {
            return false;
        }
        let Some(active) = self.task_index(active_id) else {
            return false;
        };

        if over_is_column {
            if self.column_index(over_id).is_none() || self.board.tasks[active].column_id == over_id {
                return false;
            }
            self.board.tasks[active].column_id = over_id;
            tracing::trace!(active_id, column_id = over_id, "task moved to column");
            self.commit();
            return true;
        }

        let Some(over) = self.task_index(over_id) else {
            return false;
        };

        let over_column = self.board.tasks[over].column_id;
        if self.board.tasks[active].column_id != over_column {
            self.board.tasks[active].column_id = over_column;
            array_move(&mut self.board.tasks, active, over as isize - 1);
        } else {
            array_move(&mut self.board.tasks, active, over as isize);
        }
        tracing::trace!(active_id, over_id, "task reordered");
        self.commit();
        true
    }
}
