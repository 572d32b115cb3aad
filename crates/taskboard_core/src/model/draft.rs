//! Partial task records under edit.
//!
//! # Responsibility
//! - Hold the uncommitted field values of one task while it is composed.
//! - Convert a draft into a full `Task` only after the title check passes.
//!
//! # Invariants
//! - A draft never produces a `Task` with a blank title.
//! - `id` and `status` are not editable through `DraftField`.

use crate::model::task::{Task, TaskId, TaskPriority, TaskStatus, TaskValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Task fields where every value may still be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    /// Present only when editing a task that already exists.
    pub id: Option<TaskId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
}

impl TaskDraft {
    /// Empty draft for a new task in `status`, priority preset to medium.
    pub fn for_column(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            priority: Some(TaskPriority::Medium),
            ..Self::default()
        }
    }

    /// Merges one field value into the draft.
    pub fn apply(&mut self, field: DraftField) {
        match field {
            DraftField::Title(value) => self.title = Some(value),
            DraftField::Description(value) => self.description = value,
            DraftField::Priority(value) => self.priority = Some(value),
            DraftField::Assignee(value) => self.assignee = value,
            DraftField::DueDate(value) => self.due_date = value,
        }
    }

    /// Checks the one field required before a draft can be committed.
    pub fn validate_title(&self) -> Result<(), TaskValidationError> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(TaskValidationError::EmptyTitle),
        }
    }

    /// Builds a full task.
    ///
    /// `fallback_id` is only called when the draft has no id of its own.
    /// Missing status falls back to `todo`, missing priority to `medium`.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyTitle` when the title is missing or blank.
    pub fn into_task(
        self,
        fallback_id: impl FnOnce() -> TaskId,
    ) -> Result<Task, TaskValidationError> {
        self.validate_title()?;
        let title = self.title.unwrap_or_default();
        let task = Task {
            id: self.id.unwrap_or_else(fallback_id),
            title,
            description: self.description,
            status: self.status.unwrap_or(TaskStatus::Todo),
            priority: self.priority.unwrap_or_default(),
            assignee: self.assignee,
            due_date: self.due_date,
        };
        task.validate()?;
        Ok(task)
    }
}

impl From<Task> for TaskDraft {
    fn from(task: Task) -> Self {
        Self {
            id: Some(task.id),
            title: Some(task.title),
            description: task.description,
            status: Some(task.status),
            priority: Some(task.priority),
            assignee: task.assignee,
            due_date: task.due_date,
        }
    }
}

/// One editable field with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftField {
    Title(String),
    Description(Option<String>),
    Priority(TaskPriority),
    Assignee(Option<String>),
    DueDate(Option<String>),
}

impl DraftField {
    /// Parses a string-keyed field update as emitted by form inputs.
    ///
    /// Accepted names: `title`, `description`, `priority`, `assignee`,
    /// `dueDate` (or `due_date`). An empty value clears an optional field.
    pub fn parse(name: &str, value: &str) -> Result<Self, DraftFieldError> {
        match name.trim() {
            "title" => Ok(Self::Title(value.to_string())),
            "description" => Ok(Self::Description(optional_text(value))),
            "priority" => TaskPriority::parse(value)
                .map(Self::Priority)
                .ok_or_else(|| DraftFieldError::InvalidPriority(value.trim().to_string())),
            "assignee" => Ok(Self::Assignee(optional_text(value))),
            "dueDate" | "due_date" => Ok(Self::DueDate(optional_text(value.trim()))),
            other => Err(DraftFieldError::UnknownField(other.to_string())),
        }
    }

    /// Field name in wire spelling.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Description(_) => "description",
            Self::Priority(_) => "priority",
            Self::Assignee(_) => "assignee",
            Self::DueDate(_) => "dueDate",
        }
    }
}

fn optional_text(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Errors from string-keyed draft updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftFieldError {
    UnknownField(String),
    InvalidPriority(String),
}

impl Display for DraftFieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(f, "unknown draft field: `{name}`"),
            Self::InvalidPriority(value) => {
                write!(f, "invalid priority `{value}`; expected low|medium|high")
            }
        }
    }
}

impl Error for DraftFieldError {}
