//! Board domain model.
//!
//! # Responsibility
//! - Define the task/column/board records rendered by presentation layers.
//! - Define the partial `TaskDraft` used while a task is being edited.
//!
//! # Invariants
//! - Records are plain values; all board mutation goes through `crate::store`.
//! - Wire field names follow the board's external schema (`dueDate`, `in-progress`).

pub mod board;
pub mod draft;
pub mod task;
