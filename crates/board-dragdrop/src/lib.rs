//! Board DragDrop Utilities
//!
//! Drag state machine for a column/task board.
//! Uses a movement threshold to distinguish click from drag, and turns
//! drag-over / drag-end events into intents the board applies.

use std::fmt::Debug;

/// Movement in logical pixels required before a press becomes a drag
pub const DEFAULT_ACTIVATION_DISTANCE_PX: f64 = 10.0;

/// What kind of entity is being dragged or hovered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Column,
    Task,
}

/// Reference to a draggable / droppable entity
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntityRef<Id> {
    pub id: Id,
    pub kind: EntityKind,
}

impl<Id> EntityRef<Id> {
    pub fn column(id: Id) -> Self {
        Self { id, kind: EntityKind::Column }
    }

    pub fn task(id: Id) -> Self {
        Self { id, kind: EntityKind::Task }
    }
}

/// Board operation resolved from a drag event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragIntent<Id> {
    /// Move column `active` to the position of column `over`
    ReorderColumns { active: Id, over: Id },
    /// Move task `active` relative to `over` (a task, or a column when
    /// `over_is_column`)
    MoveTask { active: Id, over: Id, over_is_column: bool },
}

/// Controller state
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragPhase<Id> {
    Idle,
    /// Pointer is down on an entity but hasn't moved far enough yet
    Pending { entity: EntityRef<Id>, origin: (f64, f64) },
    DraggingColumn(Id),
    DraggingTask(Id),
}

/// Tracks the dragged entity and resolves drag events
#[derive(Clone, Debug)]
pub struct DragController<Id> {
    phase: DragPhase<Id>,
    activation_distance: f64,
}

impl<Id: Copy + PartialEq + Debug> Default for DragController<Id> {
    fn default() -> Self {
        Self::new(DEFAULT_ACTIVATION_DISTANCE_PX)
    }
}

impl<Id: Copy + PartialEq + Debug> DragController<Id> {
    pub fn new(activation_distance: f64) -> Self {
        Self {
            phase: DragPhase::Idle,
            activation_distance: activation_distance.max(0.0),
        }
    }

    pub fn phase(&self) -> DragPhase<Id> {
        self.phase
    }

    pub fn activation_distance(&self) -> f64 {
        self.activation_distance
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::DraggingColumn(_) | DragPhase::DraggingTask(_))
    }

    /// Entity currently being dragged
    pub fn active(&self) -> Option<EntityRef<Id>> {
        match self.phase {
            DragPhase::DraggingColumn(id) => Some(EntityRef::column(id)),
            DragPhase::DraggingTask(id) => Some(EntityRef::task(id)),
            _ => None,
        }
    }

    /// Column shown in the drag overlay
    pub fn active_column(&self) -> Option<Id> {
        match self.phase {
            DragPhase::DraggingColumn(id) => Some(id),
            _ => None,
        }
    }

    /// Task shown in the drag overlay
    pub fn active_task(&self) -> Option<Id> {
        match self.phase {
            DragPhase::DraggingTask(id) => Some(id),
            _ => None,
        }
    }

    /// Record a press on an entity; the drag starts once the pointer has
    /// moved far enough
    pub fn pointer_down(&mut self, entity: EntityRef<Id>, x: f64, y: f64) {
        if self.is_dragging() {
            return;
        }
        self.phase = DragPhase::Pending { entity, origin: (x, y) };
    }

    /// Returns the entity whose drag just started, if this move crossed the
    /// activation distance
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<EntityRef<Id>> {
        let DragPhase::Pending { entity, origin } = self.phase else {
            return None;
        };

        let distance = (x - origin.0).hypot(y - origin.1);
        if distance >= self.activation_distance {
            self.drag_start(entity);
            Some(entity)
        } else {
            None
        }
    }

    /// Release without a drag is a click; returns the clicked entity
    pub fn pointer_up(&mut self) -> Option<EntityRef<Id>> {
        match self.phase {
            DragPhase::Pending { entity, .. } => {
                self.phase = DragPhase::Idle;
                Some(entity)
            }
            _ => None,
        }
    }

    pub fn drag_start(&mut self, entity: EntityRef<Id>) {
        self.phase = match entity.kind {
            EntityKind::Column => DragPhase::DraggingColumn(entity.id),
            EntityKind::Task => DragPhase::DraggingTask(entity.id),
        };
        tracing::debug!(?entity, "drag started");
    }

    /// Live preview while a task is dragged. Column drags have no preview.
    pub fn drag_over(&mut self, active: EntityRef<Id>, over: Option<EntityRef<Id>>) -> Option<DragIntent<Id>> {
        match self.phase {
            DragPhase::DraggingTask(id) if id == active.id && active.kind == EntityKind::Task => {
                Self::task_intent(active, over?)
            }
            _ => None,
        }
    }

    /// Finish the drag. Always returns to idle; `over == None` drops the
    /// commit but leaves any preview already applied.
    pub fn drag_end(&mut self, active: EntityRef<Id>, over: Option<EntityRef<Id>>) -> Option<DragIntent<Id>> {
        let phase = std::mem::replace(&mut self.phase, DragPhase::Idle);

        let Some(over) = over else {
            tracing::debug!(?active, "drag ended outside any drop target");
            return None;
        };

        match phase {
            DragPhase::DraggingColumn(id) if id == active.id && active.kind == EntityKind::Column => {
                if over.kind != EntityKind::Column || over.id == active.id {
                    return None;
                }
                Some(DragIntent::ReorderColumns { active: active.id, over: over.id })
            }
            DragPhase::DraggingTask(id) if id == active.id && active.kind == EntityKind::Task => {
                Self::task_intent(active, over)
            }
            _ => None,
        }
    }

    /// Abort the drag without an intent
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
    }

    fn task_intent(active: EntityRef<Id>, over: EntityRef<Id>) -> Option<DragIntent<Id>> {
        if active.id == over.id {
            return None;
        }
        Some(DragIntent::MoveTask {
            active: active.id,
            over: over.id,
            over_is_column: over.kind == EntityKind::Column,
        })
    }
}
