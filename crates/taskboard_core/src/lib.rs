//! Core state management for a four-stage task board.
//! This crate is the single source of truth for board invariants; rendering
//! lives outside it and talks to `TaskBoardApp` through intents.

pub mod app;
pub mod logging;
pub mod model;
pub mod session;
pub mod store;

pub use app::{AppError, BoardObserver, Intent, IntentOutcome, TaskBoardApp};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::board::{Board, BoardInvariantError, Column, ColumnId};
pub use model::draft::{DraftField, DraftFieldError, TaskDraft};
pub use model::task::{PriorityTone, Task, TaskId, TaskPriority, TaskStatus, TaskValidationError};
pub use session::editor::{EditorMode, EditorSession, EditorState, SaveOutcome, SessionError};
pub use store::board_store::BoardStore;
pub use store::transform::{add_task, remove_task, update_task, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
