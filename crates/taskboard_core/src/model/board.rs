//! Board and column aggregates.
//!
//! # Responsibility
//! - Define the fixed four-stage column layout and the seed board.
//! - Provide read-only lookups used by the store and presentation layers.
//!
//! # Invariants
//! - A board always has exactly one column per `TaskStatus`, in `TaskStatus::ALL` order.
//! - Every task in a column has `status == column.id`.
//! - A task id appears at most once across all columns.

use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Column ids are the workflow stages themselves.
pub type ColumnId = TaskStatus;

/// Named workflow stage holding tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    /// Creates an empty column with the stage's default label.
    pub fn new(id: ColumnId) -> Self {
        Self {
            id,
            title: id.default_title().to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.tasks.iter().any(|task| &task.id == task_id)
    }
}

/// Root aggregate: the ordered list of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub columns: Vec<Column>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Four empty columns in stage order.
    pub fn empty() -> Self {
        Self {
            columns: TaskStatus::ALL.into_iter().map(Column::new).collect(),
        }
    }

    /// Board shown on first launch: one high-priority task in `todo`.
    pub fn seed() -> Self {
        let mut board = Self::empty();
        let seed_task = Task {
            id: TaskId("1".to_string()),
            title: "Create ERD Diagram".to_string(),
            description: Some("Design database schema for the project".to_string()),
            status: TaskStatus::Todo,
            priority: TaskPriority::High,
            assignee: Some("John".to_string()),
            due_date: Some("2024-02-20".to_string()),
        };
        if let Some(column) = board.column_mut(TaskStatus::Todo) {
            column.tasks.push(seed_task);
        }
        board
    }

    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.iter().find(|column| column.id == id)
    }

    pub(crate) fn column_mut(&mut self, id: ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|column| column.id == id)
    }

    /// Finds the first task with `task_id` and the column holding it.
    pub fn find_task(&self, task_id: &TaskId) -> Option<(ColumnId, &Task)> {
        self.columns.iter().find_map(|column| {
            column
                .tasks
                .iter()
                .find(|task| &task.id == task_id)
                .map(|task| (column.id, task))
        })
    }

    pub fn contains_task(&self, task_id: &TaskId) -> bool {
        self.columns.iter().any(|column| column.contains(task_id))
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|column| column.tasks.len()).sum()
    }

    /// Reports the first structural defect found, if any.
    ///
    /// Checks column layout, status/column agreement and id uniqueness.
    pub fn check_invariants(&self) -> Result<(), BoardInvariantError> {
        let layout: Vec<ColumnId> = self.columns.iter().map(|column| column.id).collect();
        if layout.as_slice() != TaskStatus::ALL.as_slice() {
            return Err(BoardInvariantError::ColumnLayout { found: layout });
        }

        let mut seen = HashSet::new();
        for column in &self.columns {
            for task in &column.tasks {
                if task.status != column.id {
                    return Err(BoardInvariantError::StatusMismatch {
                        task_id: task.id.clone(),
                        column: column.id,
                        status: task.status,
                    });
                }
                if !seen.insert(&task.id) {
                    return Err(BoardInvariantError::DuplicateTaskId(task.id.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Structural defects a well-behaved store never produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardInvariantError {
    /// Columns are missing, duplicated or out of stage order.
    ColumnLayout { found: Vec<ColumnId> },
    /// Task sits in a column that disagrees with its status.
    StatusMismatch {
        task_id: TaskId,
        column: ColumnId,
        status: TaskStatus,
    },
    /// Task id appears more than once.
    DuplicateTaskId(TaskId),
}

impl Display for BoardInvariantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ColumnLayout { found } => {
                let ids: Vec<&str> = found.iter().map(|id| id.as_str()).collect();
                write!(f, "unexpected column layout: [{}]", ids.join(", "))
            }
            Self::StatusMismatch {
                task_id,
                column,
                status,
            } => write!(
                f,
                "task {task_id} has status `{status}` but sits in column `{column}`"
            ),
            Self::DuplicateTaskId(task_id) => write!(f, "task id appears twice: {task_id}"),
        }
    }
}

impl Error for BoardInvariantError {}
