//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered as one card on the board.
//! - Own the closed vocabularies for workflow status and priority.
//!
//! # Invariants
//! - `id` is never empty and never reassigned once a task exists.
//! - `title` is never blank for a task that lives on a board.
//! - `status` equals the id of the column holding the task (enforced by the
//!   store, see `crate::store`).

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque stable identifier of one task.
///
/// Ids generated by core are 32 lowercase hex chars; ids supplied by callers
/// (seed data, presentation layers) only need to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(pub(crate) String);

impl TaskId {
    /// Generates a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Wraps a caller-provided id.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyId` when `value` is blank.
    pub fn parse(value: impl Into<String>) -> Result<Self, TaskValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskId {
    type Error = TaskValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

/// Workflow stage of a task. Doubles as the id of the column holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Review,
    Done,
}

impl TaskStatus {
    /// All stages in board order.
    pub const ALL: [TaskStatus; 4] = [Self::Todo, Self::InProgress, Self::Review, Self::Done];

    /// Stable wire string (`todo|in-progress|review|done`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Review => "review",
            Self::Done => "done",
        }
    }

    /// Parses a wire string. Surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "review" => Some(Self::Review),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    /// Column label used when the board is built with default columns.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Review => "Review",
            Self::Done => "Done",
        }
    }
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task urgency. New tasks start at `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// Display tone a presentation layer should use for a priority chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityTone {
    Success,
    Warning,
    Danger,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses `low|medium|high`, case-insensitive.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn tone(self) -> PriorityTone {
        match self {
            Self::Low => PriorityTone::Success,
            Self::Medium => PriorityTone::Warning,
            Self::High => PriorityTone::Danger,
        }
    }
}

impl Display for TaskPriority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation failures for task records and drafts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is missing or blank after trim.
    EmptyTitle,
    /// Task id is blank.
    EmptyId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::EmptyId => write!(f, "task id must not be empty"),
        }
    }
}

impl Error for TaskValidationError {}

/// One unit of work shown as a card.
///
/// Field names on the wire follow the board's external schema (`dueDate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    /// ISO date string (`YYYY-MM-DD`); not parsed by core.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

impl Task {
    /// Creates a task with a generated id and default priority.
    ///
    /// # Errors
    /// - Returns `TaskValidationError::EmptyTitle` for a blank title.
    pub fn new(title: impl Into<String>, status: TaskStatus) -> Result<Self, TaskValidationError> {
        Self::with_id(TaskId::generate(), title, status)
    }

    /// Creates a task with a caller-provided id.
    ///
    /// Used for seed data and for callers that already own an identity.
    pub fn with_id(
        id: TaskId,
        title: impl Into<String>,
        status: TaskStatus,
    ) -> Result<Self, TaskValidationError> {
        let task = Self {
            id,
            title: title.into(),
            description: None,
            status,
            priority: TaskPriority::default(),
            assignee: None,
            due_date: None,
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.as_str().trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }
}
