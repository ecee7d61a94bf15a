//! Task change log - append-only per-field audit trail of task mutations

use chrono::{DateTime, Utc};

use crate::entities::Task;
use crate::value_objects::Snowflake;

/// One recorded field change on a task.
///
/// Rows are immutable once written; there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChangeLog {
    pub id: Snowflake,
    pub task_id: Snowflake,
    pub organization_id: Snowflake,
    pub field_name: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: Snowflake,
    pub created_at: DateTime<Utc>,
}

/// A field-level difference between two versions of a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field_name: &'static str,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

impl FieldChange {
    fn new(field_name: &'static str, old_value: Option<String>, new_value: Option<String>) -> Self {
        Self {
            field_name,
            old_value,
            new_value,
        }
    }
}

/// Diff two versions of a task, field by field.
///
/// Covers name, description, status, assignee, and due date. Identity
/// columns (id, organization, project) and `position` are excluded:
/// position churns on every drag and would drown the log.
pub fn diff_tasks(old: &Task, new: &Task) -> Vec<FieldChange> {
    let mut changes = Vec::new();

    if old.name != new.name {
        changes.push(FieldChange::new(
            "name",
            Some(old.name.clone()),
            Some(new.name.clone()),
        ));
    }

    if old.description != new.description {
        changes.push(FieldChange::new(
            "description",
            old.description.clone(),
            new.description.clone(),
        ));
    }

    if old.status != new.status {
        changes.push(FieldChange::new(
            "status",
            Some(old.status.as_str().to_string()),
            Some(new.status.as_str().to_string()),
        ));
    }

    if old.assignee_id != new.assignee_id {
        changes.push(FieldChange::new(
            "assignee_id",
            old.assignee_id.map(|id| id.to_string()),
            new.assignee_id.map(|id| id.to_string()),
        ));
    }

    if old.due_date != new.due_date {
        changes.push(FieldChange::new(
            "due_date",
            old.due_date.map(|d| d.to_rfc3339()),
            new.due_date.map(|d| d.to_rfc3339()),
        ));
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::TaskStatus;
    use chrono::Duration;

    fn sample_task() -> Task {
        Task::new(
            Snowflake::new(1),
            Snowflake::new(2),
            Snowflake::new(3),
            "Write docs".to_string(),
            TaskStatus::Todo,
            1000,
        )
    }

    #[test]
    fn test_identical_tasks_produce_no_changes() {
        let task = sample_task();
        assert!(diff_tasks(&task, &task).is_empty());
    }

    #[test]
    fn test_name_change() {
        let old = sample_task();
        let mut new = old.clone();
        new.name = "Write better docs".to_string();

        let changes = diff_tasks(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field_name, "name");
        assert_eq!(changes[0].old_value.as_deref(), Some("Write docs"));
        assert_eq!(changes[0].new_value.as_deref(), Some("Write better docs"));
    }

    #[test]
    fn test_status_change_uses_wire_names() {
        let old = sample_task();
        let mut new = old.clone();
        new.status = TaskStatus::InProgress;

        let changes = diff_tasks(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field_name, "status");
        assert_eq!(changes[0].old_value.as_deref(), Some("TODO"));
        assert_eq!(changes[0].new_value.as_deref(), Some("IN_PROGRESS"));
    }

    #[test]
    fn test_assignee_set_and_cleared() {
        let old = sample_task();
        let mut new = old.clone();
        new.assignee_id = Some(Snowflake::new(77));

        let changes = diff_tasks(&old, &new);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].field_name, "assignee_id");
        assert_eq!(changes[0].old_value, None);
        assert_eq!(changes[0].new_value.as_deref(), Some("77"));

        // Cleared again
        let cleared = diff_tasks(&new, &old);
        assert_eq!(cleared[0].old_value.as_deref(), Some("77"));
        assert_eq!(cleared[0].new_value, None);
    }

    #[test]
    fn test_position_change_is_not_audited() {
        let old = sample_task();
        let mut new = old.clone();
        new.position = 99_000;
        assert!(diff_tasks(&old, &new).is_empty());
    }

    #[test]
    fn test_multiple_changes_produce_one_entry_each() {
        let old = sample_task();
        let mut new = old.clone();
        new.name = "Renamed".to_string();
        new.status = TaskStatus::Done;
        new.due_date = Some(Utc::now() + Duration::days(7));

        let changes = diff_tasks(&old, &new);
        let fields: Vec<_> = changes.iter().map(|c| c.field_name).collect();
        assert_eq!(fields, vec!["name", "status", "due_date"]);
    }
}
