//! Task entity <-> model mapper

use trellis_core::entities::{Task, TaskStatus};
use trellis_core::value_objects::Snowflake;

use crate::models::TaskModel;

impl From<TaskModel> for Task {
    fn from(model: TaskModel) -> Self {
        Task {
            id: Snowflake::new(model.id),
            project_id: Snowflake::new(model.project_id),
            organization_id: Snowflake::new(model.organization_id),
            name: model.name,
            description: model.description,
            assignee_id: model.assignee_id.map(Snowflake::new),
            due_date: model.due_date,
            status: TaskStatus::parse(&model.status).unwrap_or_default(),
            position: model.position,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
