//! Board Session
//!
//! Explicitly owned state for the active user's board: the state manager, the
//! drag controller and the save worker, wired together. One session per
//! signed-in user; hand out `&mut BoardSession` instead of global lookups.

use std::sync::Arc;

use board_dragdrop::{DragController, DragIntent, EntityRef};
use board_store::{Board, BoardStore, Column, ColumnId, DomainResult, Task, TaskId, UserId};
use chrono::{DateTime, Utc};
use tokio::task::JoinHandle;

use crate::config::BoardConfig;
use crate::models::{BoardView, ColumnView, DragOverlay};
use crate::store::BoardState;
use crate::sync::PersistenceSync;

pub type BoardEntity = EntityRef<u32>;

pub struct BoardSession {
    user_id: UserId,
    state: BoardState,
    drag: DragController<u32>,
    sync: PersistenceSync,
    worker: JoinHandle<()>,
}

impl BoardSession {
    /// Load the user's board (empty if none was saved) and start syncing it
    pub async fn open(user_id: UserId, store: Arc<dyn BoardStore>, config: &BoardConfig) -> DomainResult<Self> {
        let board = store.load(user_id).await?.unwrap_or_default();
        tracing::info!(
            user_id,
            columns = board.columns.len(),
            tasks = board.tasks.len(),
            "board session opened"
        );

        let (sync, worker) = PersistenceSync::spawn(user_id, store, config.sync.debounce());

        let mut state = BoardState::new(board);
        let handle = sync.clone();
        state.on_commit(move |board: &Board| handle.schedule(board.clone()));

        Ok(Self {
            user_id,
            state,
            drag: DragController::new(config.drag.activation_distance_px),
            sync,
            worker,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn drag(&self) -> &DragController<u32> {
        &self.drag
    }

    // ========================
    // Board operations
    // ========================

    pub fn add_column(&mut self, title: impl Into<String>) -> Option<Column> {
        self.state.add_column(title)
    }

    pub fn remove_column(&mut self, id: ColumnId) -> bool {
        self.state.remove_column(id)
    }

    pub fn rename_column(&mut self, id: ColumnId, title: impl Into<String>) -> bool {
        self.state.rename_column(id, title)
    }

    pub fn add_task(
        &mut self,
        column_id: ColumnId,
        content: impl Into<String>,
        due_date: Option<DateTime<Utc>>,
    ) -> Option<Task> {
        self.state.add_task(column_id, content, due_date)
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        self.state.remove_task(id)
    }

    pub fn update_task_content(&mut self, id: TaskId, content: impl Into<String>) -> bool {
        self.state.update_task_content(id, content)
    }

    // ========================
    // Pointer / drag events
    // ========================

    pub fn pointer_down(&mut self, entity: BoardEntity, x: f64, y: f64) {
        self.drag.pointer_down(entity, x, y);
    }

    /// Returns the entity whose drag started on this move
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<BoardEntity> {
        self.drag.pointer_move(x, y)
    }

    /// Returns the clicked entity when the press never became a drag
    pub fn pointer_up(&mut self) -> Option<BoardEntity> {
        self.drag.pointer_up()
    }

    pub fn drag_start(&mut self, entity: BoardEntity) {
        self.drag.drag_start(entity);
    }

    /// Returns whether the board changed
    pub fn drag_over(&mut self, active: BoardEntity, over: Option<BoardEntity>) -> bool {
        let intent = self.drag.drag_over(active, over);
        self.apply(intent)
    }

    /// Returns whether the board changed
    pub fn drag_end(&mut self, active: BoardEntity, over: Option<BoardEntity>) -> bool {
        let intent = self.drag.drag_end(active, over);
        self.apply(intent)
    }

    pub fn drag_cancel(&mut self) {
        self.drag.cancel();
    }

    fn apply(&mut self, intent: Option<DragIntent<u32>>) -> bool {
        match intent {
            Some(DragIntent::ReorderColumns { active, over }) => self.state.reorder_columns(active, over),
            Some(DragIntent::MoveTask { active, over, over_is_column }) => {
                self.state.move_task(active, over, over_is_column)
            }
            None => false,
        }
    }

    // ========================
    // Rendered state
    // ========================

    pub fn active_column(&self) -> Option<&Column> {
        self.drag.active_column().and_then(|id| self.state.column(id))
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.drag.active_task().and_then(|id| self.state.task(id))
    }

    pub fn view(&self) -> BoardView {
        let overlay = match (self.active_column(), self.active_task()) {
            (Some(column), _) => Some(DragOverlay::Column(ColumnView::of(&self.state, column))),
            (_, Some(task)) => Some(DragOverlay::Task(task.clone())),
            _ => None,
        };
        BoardView::of(&self.state).with_overlay(overlay)
    }

    /// Wait for pending saves
    pub async fn flush(&self) {
        self.sync.flush().await;
    }

    /// Flush pending saves and stop the save worker
    pub async fn close(self) {
        let Self { state, sync, worker, .. } = self;
        sync.flush().await;
        // the commit hook holds the last sender clone
        drop(state);
        drop(sync);
        if let Err(e) = worker.await {
            tracing::warn!(error = %e, "save worker ended abnormally");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use board_store::InMemoryBoardStore;

    const TODO: ColumnId = 1;
    const DOING: ColumnId = 2;

    fn fast_config() -> BoardConfig {
        let mut config = BoardConfig::default();
        config.sync.debounce_ms = 0;
        config
    }

    async fn scenario_session() -> (Arc<InMemoryBoardStore>, BoardSession) {
        let store = Arc::new(InMemoryBoardStore::new());
        let board = Board::new(
            vec![Column::new(TODO, "Todo".into()), Column::new(DOING, "Doing".into())],
            vec![
                Task::new(11, TODO, "T1".into()),
                Task::new(12, TODO, "T2".into()),
                Task::new(13, DOING, "T3".into()),
            ],
        );
        store.save(7, &board).await.unwrap();
        let session = BoardSession::open(7, store.clone(), &fast_config()).await.unwrap();
        (store, session)
    }

    fn order(session: &BoardSession) -> Vec<TaskId> {
        session.state().tasks().iter().map(|t| t.id).collect()
    }

    #[tokio::test]
    async fn test_open_without_saved_board_is_empty() {
        let store = Arc::new(InMemoryBoardStore::new());
        let session = BoardSession::open(3, store.clone(), &fast_config()).await.unwrap();

        assert!(session.state().board().is_empty());
        assert!(session.view().columns.is_empty());
        session.close().await;
        assert!(store.load(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_task_drag_across_columns_is_persisted() {
        let (store, mut session) = scenario_session().await;

        session.pointer_down(BoardEntity::task(11), 0.0, 0.0);
        assert_eq!(session.pointer_move(0.0, 12.0), Some(BoardEntity::task(11)));
        assert_eq!(session.active_task().map(|t| t.id), Some(11));

        assert!(session.drag_over(BoardEntity::task(11), Some(BoardEntity::task(13))));
        // released over itself, where the preview put it
        assert!(!session.drag_end(BoardEntity::task(11), Some(BoardEntity::task(11))));
        assert!(session.active_task().is_none());

        assert_eq!(order(&session), vec![12, 11, 13]);
        assert_eq!(session.state().task(11).unwrap().column_id, DOING);

        session.close().await;
        let stored = store.load(7).await.unwrap().unwrap();
        assert_eq!(stored.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![12, 11, 13]);
        assert_eq!(stored.tasks[1].column_id, DOING);
    }

    #[tokio::test]
    async fn test_drop_outside_keeps_last_preview() {
        let (store, mut session) = scenario_session().await;

        session.drag_start(BoardEntity::task(11));
        session.drag_over(BoardEntity::task(11), Some(BoardEntity::column(DOING)));
        session.drag_over(BoardEntity::task(11), None);
        assert!(!session.drag_end(BoardEntity::task(11), None));

        assert_eq!(session.state().task(11).unwrap().column_id, DOING);
        assert_eq!(order(&session), vec![11, 12, 13]);

        session.flush().await;
        let stored = store.load(7).await.unwrap().unwrap();
        assert_eq!(stored.tasks[0].column_id, DOING);
    }

    #[tokio::test]
    async fn test_column_drag_only_applies_on_drop() {
        let (_store, mut session) = scenario_session().await;

        session.drag_start(BoardEntity::column(TODO));
        assert_eq!(session.active_column().map(|c| c.id), Some(TODO));
        assert!(matches!(session.view().overlay, Some(DragOverlay::Column(ref v)) if v.tasks.len() == 2));

        assert!(!session.drag_over(BoardEntity::column(TODO), Some(BoardEntity::column(DOING))));
        let columns: Vec<_> = session.state().columns().iter().map(|c| c.id).collect();
        assert_eq!(columns, vec![TODO, DOING]);

        assert!(session.drag_end(BoardEntity::column(TODO), Some(BoardEntity::column(DOING))));
        let columns: Vec<_> = session.state().columns().iter().map(|c| c.id).collect();
        assert_eq!(columns, vec![DOING, TODO]);
        assert!(session.view().overlay.is_none());
    }

    #[tokio::test]
    async fn test_click_does_not_drag() {
        let (_store, mut session) = scenario_session().await;

        session.pointer_down(BoardEntity::task(12), 50.0, 50.0);
        assert_eq!(session.pointer_move(53.0, 54.0), None);
        assert_eq!(session.pointer_up(), Some(BoardEntity::task(12)));
        assert!(!session.drag().is_dragging());
        assert!(!session.drag_over(BoardEntity::task(12), Some(BoardEntity::task(11))));
        assert_eq!(order(&session), vec![11, 12, 13]);
    }

    #[tokio::test]
    async fn test_board_operations_are_saved() {
        let (store, mut session) = scenario_session().await;

        let column = session.add_column("Screening Schedule").unwrap();
        let task = session.add_task(column.id, "Colonoscopy", None).unwrap();
        assert!(session.add_task(column.id, "", None).is_none());
        session.update_task_content(task.id, "Colonoscopy (fasting)");
        session.rename_column(TODO, "Medicines");
        session.remove_task(12);
        session.remove_column(DOING);
        session.flush().await;

        let stored = store.load(7).await.unwrap().unwrap();
        assert_eq!(&stored, session.state().board());
        assert_eq!(stored.columns.len(), 2);
        assert_eq!(stored.columns[0].title, "Medicines");
        let ids: Vec<_> = stored.tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![11, task.id]);
        assert_eq!(stored.tasks[1].content, "Colonoscopy (fasting)");
    }

    #[tokio::test]
    async fn test_reopen_continues_ids() {
        let (store, mut session) = scenario_session().await;
        let first = session.add_column("Done").unwrap();
        session.close().await;

        let mut session = BoardSession::open(7, store.clone(), &fast_config()).await.unwrap();
        let second = session.add_column("Archive").unwrap();
        assert!(second.id > first.id);
        session.close().await;
    }
}
