//! Owner of the canonical board value.
//!
//! # Responsibility
//! - Hold the single committed `Board` for one board session.
//! - Apply pure transforms and swap in the result only on success.
//!
//! # Invariants
//! - A failed operation leaves the held board unchanged.
//! - Callers only ever see the board through `&Board`.

use crate::model::board::{Board, ColumnId};
use crate::model::draft::TaskDraft;
use crate::model::task::{Task, TaskId};
use crate::store::transform::{self, StoreResult};

/// Board store facade over the pure transform functions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardStore {
    board: Board,
}

impl BoardStore {
    pub fn new(board: Board) -> Self {
        Self { board }
    }

    /// Store preloaded with `Board::seed()`.
    pub fn seeded() -> Self {
        Self::new(Board::seed())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Swaps in `board` wholesale and returns the previous value.
    pub fn replace(&mut self, board: Board) -> Board {
        std::mem::replace(&mut self.board, board)
    }

    /// Appends a task built from `draft` to `column_id`.
    pub fn add_task(&mut self, column_id: ColumnId, draft: TaskDraft) -> StoreResult<TaskId> {
        let (next, task_id) = transform::add_task(&self.board, column_id, draft)?;
        self.board = next;
        Ok(task_id)
    }

    /// Replaces a task by id.
    ///
    /// Returns `false` when no task matched and the board was left as is.
    pub fn update_task(&mut self, task: Task) -> StoreResult<bool> {
        let matched = self.board.contains_task(&task.id);
        let next = transform::update_task(&self.board, task)?;
        self.board = next;
        Ok(matched)
    }

    /// Removes a task by id. Returns whether anything was removed.
    pub fn remove_task(&mut self, task_id: &TaskId) -> bool {
        let removed = self.board.contains_task(task_id);
        self.board = transform::remove_task(&self.board, task_id);
        removed
    }
}
