//! Presentation-facing board controller.
//!
//! # Responsibility
//! - Own the `BoardStore` and `EditorSession` for one board.
//! - Map the presentation layer's intents onto store/session operations.
//! - Push state changes to registered `BoardObserver`s.
//!
//! # Invariants
//! - Delete goes straight to the store; it never touches the editor draft.
//! - Observers hear about the board only after it actually changed.
//! - No intent panics or terminates the process; failures come back as `AppError`.

use crate::model::board::{Board, ColumnId};
use crate::model::draft::{DraftField, DraftFieldError};
use crate::model::task::{Task, TaskId};
use crate::session::editor::{EditorMode, EditorSession, SaveOutcome, SessionError};
use crate::store::board_store::BoardStore;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Receives state after intents are handled.
pub trait BoardObserver {
    /// Called with the new committed board after it changed.
    fn board_changed(&mut self, board: &Board);

    /// Called after the editor session changed state or draft.
    fn session_changed(&mut self, _session: &EditorSession) {}
}

/// User intents a presentation layer can emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    AddTask(ColumnId),
    EditTask(Task),
    EditTaskById(TaskId),
    DeleteTask(TaskId),
    UpdateDraftField(DraftField),
    Save,
    Cancel,
}

/// What handling one intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    EditorOpened(EditorMode),
    /// `applied == false` when no draft was open.
    DraftUpdated { applied: bool },
    Deleted { task_id: TaskId, removed: bool },
    Saved(SaveOutcome),
    /// `discarded == false` when nothing was open.
    Cancelled { discarded: bool },
}

/// Errors surfaced to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Session(SessionError),
    Draft(DraftFieldError),
    TaskNotFound(TaskId),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Session(err) => write!(f, "{err}"),
            Self::Draft(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Session(err) => Some(err),
            Self::Draft(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<SessionError> for AppError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

impl From<DraftFieldError> for AppError {
    fn from(value: DraftFieldError) -> Self {
        Self::Draft(value)
    }
}

/// Single-threaded board controller.
#[derive(Default)]
pub struct TaskBoardApp {
    store: BoardStore,
    session: EditorSession,
    observers: Vec<Box<dyn BoardObserver>>,
}

impl TaskBoardApp {
    pub fn new(board: Board) -> Self {
        Self {
            store: BoardStore::new(board),
            session: EditorSession::new(),
            observers: Vec::new(),
        }
    }

    /// App over `Board::seed()`.
    pub fn seeded() -> Self {
        Self::new(Board::seed())
    }

    pub fn board(&self) -> &Board {
        self.store.board()
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    /// Registers an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn BoardObserver>) {
        self.observers.push(observer);
    }

    pub fn request_add_task(&mut self, column_id: ColumnId) {
        self.session.open_for_new(column_id);
        self.notify_session();
    }

    pub fn request_edit_task(&mut self, task: &Task) {
        self.session.open_for_edit(task);
        self.notify_session();
    }

    /// Opens the editor on the board's current copy of `task_id`.
    pub fn request_edit_task_by_id(&mut self, task_id: &TaskId) -> Result<(), AppError> {
        let task = self
            .store
            .board()
            .find_task(task_id)
            .map(|(_, task)| task.clone())
            .ok_or_else(|| AppError::TaskNotFound(task_id.clone()))?;
        self.request_edit_task(&task);
        Ok(())
    }

    /// Removes a task. Unknown ids are a logged no-op.
    pub fn request_delete_task(&mut self, task_id: &TaskId) -> bool {
        let removed = self.store.remove_task(task_id);
        if removed {
            info!("event=task_delete module=app status=ok task_id={task_id}");
            self.notify_board();
        } else {
            warn!("event=task_delete module=app status=noop reason=not_found task_id={task_id}");
        }
        removed
    }

    pub fn update_draft_field(&mut self, field: DraftField) -> bool {
        let applied = self.session.update_draft_field(field);
        if applied {
            self.notify_session();
        }
        applied
    }

    /// String-keyed variant of `update_draft_field` for form inputs.
    pub fn update_draft_field_str(&mut self, name: &str, value: &str) -> Result<bool, AppError> {
        let field = DraftField::parse(name, value)?;
        Ok(self.update_draft_field(field))
    }

    /// Commits the open draft.
    ///
    /// # Errors
    /// - `AppError::Session` when nothing is open, the title is blank, or the
    ///   store refuses the task. The editor stays open in the latter two cases.
    pub fn request_save(&mut self) -> Result<SaveOutcome, AppError> {
        let outcome = match self.session.save(&mut self.store) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!("event=task_save module=app status=rejected reason={err}");
                return Err(err.into());
            }
        };
        match &outcome {
            SaveOutcome::Created(task_id) => {
                info!("event=task_save module=app status=ok action=create task_id={task_id}");
            }
            SaveOutcome::Updated { task_id, matched } => {
                info!(
                    "event=task_save module=app status=ok action=update task_id={task_id} matched={matched}"
                );
            }
        }
        if !matches!(outcome, SaveOutcome::Updated { matched: false, .. }) {
            self.notify_board();
        }
        self.notify_session();
        Ok(outcome)
    }

    pub fn request_cancel(&mut self) -> bool {
        let discarded = self.session.cancel();
        if discarded {
            self.notify_session();
        }
        discarded
    }

    /// Routes one intent to its handler.
    pub fn dispatch(&mut self, intent: Intent) -> Result<IntentOutcome, AppError> {
        match intent {
            Intent::AddTask(column_id) => {
                self.request_add_task(column_id);
                Ok(IntentOutcome::EditorOpened(self.session.mode()))
            }
            Intent::EditTask(task) => {
                self.request_edit_task(&task);
                Ok(IntentOutcome::EditorOpened(self.session.mode()))
            }
            Intent::EditTaskById(task_id) => {
                self.request_edit_task_by_id(&task_id)?;
                Ok(IntentOutcome::EditorOpened(self.session.mode()))
            }
            Intent::DeleteTask(task_id) => {
                let removed = self.request_delete_task(&task_id);
                Ok(IntentOutcome::Deleted { task_id, removed })
            }
            Intent::UpdateDraftField(field) => Ok(IntentOutcome::DraftUpdated {
                applied: self.update_draft_field(field),
            }),
            Intent::Save => self.request_save().map(IntentOutcome::Saved),
            Intent::Cancel => Ok(IntentOutcome::Cancelled {
                discarded: self.request_cancel(),
            }),
        }
    }

    fn notify_board(&mut self) {
        let board = self.store.board();
        for observer in &mut self.observers {
            observer.board_changed(board);
        }
    }

    fn notify_session(&mut self) {
        let session = &self.session;
        for observer in &mut self.observers {
            observer.session_changed(session);
        }
    }
}
