//! Task entity - a card on a project's board

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Workflow status of a task (a board column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backlog => "BACKLOG",
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::InReview => "IN_REVIEW",
            Self::Done => "DONE",
        }
    }

    /// Parse from the database / wire representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BACKLOG" => Some(Self::Backlog),
            "TODO" => Some(Self::Todo),
            "IN_PROGRESS" => Some(Self::InProgress),
            "IN_REVIEW" => Some(Self::InReview),
            "DONE" => Some(Self::Done),
            _ => None,
        }
    }

    /// All statuses in board order
    pub fn all() -> [TaskStatus; 5] {
        [
            Self::Backlog,
            Self::Todo,
            Self::InProgress,
            Self::InReview,
            Self::Done,
        ]
    }
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Backlog
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: Snowflake,
    pub project_id: Snowflake,
    pub organization_id: Snowflake,
    pub name: String,
    pub description: Option<String>,
    pub assignee_id: Option<Snowflake>,
    pub due_date: Option<DateTime<Utc>>,
    pub status: TaskStatus,
    /// Sparse ordering key within (project, status); see `value_objects::position`
    pub position: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new Task
    pub fn new(
        id: Snowflake,
        project_id: Snowflake,
        organization_id: Snowflake,
        name: String,
        status: TaskStatus,
        position: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            project_id,
            organization_id,
            name,
            description: None,
            assignee_id: None,
            due_date: None,
            status,
            position,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if the task is assigned to the given user
    #[inline]
    pub fn is_assigned_to(&self, user_id: Snowflake) -> bool {
        self.assignee_id == Some(user_id)
    }

    /// Check if the task is overdue relative to `now`
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != TaskStatus::Done && self.due_date.is_some_and(|due| due < now)
    }

    /// Move the task to a new column at a given position
    pub fn move_to(&mut self, status: TaskStatus, position: i32) {
        self.status = status;
        self.position = position;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_task() -> Task {
        Task::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "Ship it".to_string(),
            TaskStatus::Todo,
            1000,
        )
    }

    #[test]
    fn test_status_roundtrip() {
        for status in TaskStatus::all() {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("SHIPPED"), None);
    }

    #[test]
    fn test_status_default_is_backlog() {
        assert_eq!(TaskStatus::default(), TaskStatus::Backlog);
    }

    #[test]
    fn test_is_assigned_to() {
        let mut task = sample_task();
        assert!(!task.is_assigned_to(Snowflake::new(42)));

        task.assignee_id = Some(Snowflake::new(42));
        assert!(task.is_assigned_to(Snowflake::new(42)));
        assert!(!task.is_assigned_to(Snowflake::new(43)));
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        let mut task = sample_task();
        assert!(!task.is_overdue(now));

        task.due_date = Some(now - Duration::hours(1));
        assert!(task.is_overdue(now));

        // Done tasks are never overdue
        task.status = TaskStatus::Done;
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn test_move_to() {
        let mut task = sample_task();
        task.move_to(TaskStatus::InProgress, 3000);
        assert_eq!(task.status, TaskStatus::InProgress);
        assert_eq!(task.position, 3000);
    }
}
