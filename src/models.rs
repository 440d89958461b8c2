//! Render Models
//!
//! Snapshot handed to the presentation layer: columns in order, each with its
//! tasks in board order, plus whatever is currently being dragged.

use board_store::{Column, Task};
use serde::Serialize;

use crate::store::BoardState;

/// One column and its tasks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnView {
    pub column: Column,
    pub tasks: Vec<Task>,
}

/// Drag overlay content
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DragOverlay {
    Column(ColumnView),
    Task(Task),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
    pub overlay: Option<DragOverlay>,
}

impl ColumnView {
    pub fn of(state: &BoardState, column: &Column) -> Self {
        Self {
            column: column.clone(),
            tasks: state.tasks_in(column.id).cloned().collect(),
        }
    }
}

impl BoardView {
    pub fn of(state: &BoardState) -> Self {
        Self {
            columns: state.columns().iter().map(|c| ColumnView::of(state, c)).collect(),
            overlay: None,
        }
    }

    pub fn with_overlay(mut self, overlay: Option<DragOverlay>) -> Self {
        self.overlay = overlay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::Board;

    #[test]
    fn test_view_groups_tasks_under_columns() {
        let state = BoardState::new(Board::new(
            vec![Column::new(1, "Medicines".into()), Column::new(2, "Scanning".into())],
            vec![
                Task::new(3, 2, "MRI".into()),
                Task::new(4, 1, "Letrozole".into()),
                Task::new(5, 2, "Ultrasound".into()),
            ],
        ));

        let view = BoardView::of(&state);
        assert_eq!(view.columns.len(), 2);
        assert_eq!(view.columns[0].tasks, vec![Task::new(4, 1, "Letrozole".into())]);
        let scanning: Vec<_> = view.columns[1].tasks.iter().map(|t| t.id).collect();
        assert_eq!(scanning, vec![3, 5]);
        assert!(view.overlay.is_none());
    }

    #[test]
    fn test_overlay_serializes_tagged() {
        let overlay = DragOverlay::Task(Task::new(3, 2, "MRI".into()));
        let json = serde_json::to_value(&overlay).unwrap();
        assert_eq!(json["type"], "task");
        assert_eq!(json["columnId"], 2);
    }
}
