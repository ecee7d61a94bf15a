//! Task service
//!
//! Task CRUD plus the two board behaviors: position assignment and
//! per-field change auditing.

use tracing::{info, instrument};
use trellis_core::entities::{diff_tasks, Task};
use trellis_core::traits::{TaskPositionUpdate, TaskQuery};
use trellis_core::value_objects::{is_valid_position, next_position, position_for_index};
use trellis_core::{DomainError, Permissions, Snowflake};

use crate::dto::requests::{
    CreateTaskRequest, MoveTaskRequest, ReorderTasksRequest, UpdateTaskRequest,
};
use crate::dto::responses::{ChangeLogResponse, TaskResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;
use super::project::ProjectService;

/// Task service
pub struct TaskService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TaskService<'a> {
    /// Create a new TaskService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a task at the bottom of its column
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_task(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        request: CreateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        let project = ProjectService::new(self.ctx)
            .load_for_member(project_id, user_id)
            .await?;

        PermissionService::new(self.ctx)
            .require_permission(project.organization_id, user_id, Permissions::MANAGE_TASKS)
            .await?;

        let status = request.status.unwrap_or_default();

        let assignee_id = match request.assignee_id {
            Some(raw) => Some(self.parse_assignee(project.organization_id, &raw).await?),
            None => None,
        };

        let highest = self.ctx.task_repo().max_position(project_id, status).await?;
        let position = next_position(highest);

        let mut task = Task::new(
            self.ctx.generate_id(),
            project_id,
            project.organization_id,
            request.name,
            status,
            position,
        );
        task.description = request.description;
        task.assignee_id = assignee_id;
        task.due_date = request.due_date;

        self.ctx.task_repo().create(&task).await?;

        info!(task_id = %task.id, project_id = %project_id, status = %status, "Task created");

        Ok(TaskResponse::from(&task))
    }

    /// Get a task (members of its organization only)
    #[instrument(skip(self))]
    pub async fn get_task(
        &self,
        task_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<TaskResponse> {
        let task = self.load_for_member(task_id, user_id).await?;
        Ok(TaskResponse::from(&task))
    }

    /// List tasks in a project with optional filters
    #[instrument(skip(self, query))]
    pub async fn list_tasks(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        query: TaskQuery,
    ) -> ServiceResult<Vec<TaskResponse>> {
        ProjectService::new(self.ctx)
            .load_for_member(project_id, user_id)
            .await?;

        let tasks = self.ctx.task_repo().find_by_project(project_id, query).await?;
        Ok(tasks.iter().map(TaskResponse::from).collect())
    }

    /// Update task fields, recording one audit row per changed field
    #[instrument(skip(self, request))]
    pub async fn update_task(
        &self,
        task_id: Snowflake,
        user_id: Snowflake,
        request: UpdateTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        let old = self.load_for_member(task_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(old.organization_id, user_id, Permissions::MANAGE_TASKS)
            .await?;

        let mut updated = old.clone();

        if let Some(name) = request.name {
            updated.name = name;
        }
        if let Some(description) = request.description {
            updated.description = Some(description);
        }
        if let Some(status) = request.status {
            updated.status = status;
        }
        if let Some(raw) = request.assignee_id {
            updated.assignee_id = Some(self.parse_assignee(old.organization_id, &raw).await?);
        }
        if let Some(due_date) = request.due_date {
            updated.due_date = Some(due_date);
        }

        self.persist_with_log(&old, updated, user_id).await
    }

    /// Move a task to a column position (the kanban drag target).
    ///
    /// The destination index maps to `min((index + 1) * 1000, 1_000_000)`.
    #[instrument(skip(self))]
    pub async fn move_task(
        &self,
        task_id: Snowflake,
        user_id: Snowflake,
        request: MoveTaskRequest,
    ) -> ServiceResult<TaskResponse> {
        let old = self.load_for_member(task_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(old.organization_id, user_id, Permissions::MANAGE_TASKS)
            .await?;

        let mut updated = old.clone();
        updated.status = request.status;
        updated.position = position_for_index(request.index);

        self.persist_with_log(&old, updated, user_id).await
    }

    /// Apply a batch of position/status updates after a drag.
    ///
    /// The client sends only the rows whose computed position or status
    /// actually changed; all rows land in a single transaction.
    #[instrument(skip(self, request))]
    pub async fn reorder_tasks(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        request: ReorderTasksRequest,
    ) -> ServiceResult<()> {
        let project = ProjectService::new(self.ctx)
            .load_for_member(project_id, user_id)
            .await?;

        PermissionService::new(self.ctx)
            .require_permission(project.organization_id, user_id, Permissions::MANAGE_TASKS)
            .await?;

        let mut updates = Vec::with_capacity(request.tasks.len());
        for entry in &request.tasks {
            let task_id = entry
                .task_id
                .parse::<Snowflake>()
                .map_err(|_| ServiceError::validation("Invalid task_id format"))?;

            if !is_valid_position(entry.position) {
                return Err(ServiceError::from(DomainError::InvalidPosition(
                    entry.position,
                )));
            }

            updates.push(TaskPositionUpdate {
                task_id,
                status: entry.status,
                position: entry.position,
            });
        }

        self.ctx
            .task_repo()
            .update_positions(project_id, &updates)
            .await?;

        info!(
            project_id = %project_id,
            moved = updates.len(),
            "Board positions updated"
        );

        Ok(())
    }

    /// Delete a task
    #[instrument(skip(self))]
    pub async fn delete_task(&self, task_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let task = self.load_for_member(task_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(task.organization_id, user_id, Permissions::MANAGE_TASKS)
            .await?;

        self.ctx.task_repo().delete(task_id).await?;

        info!(task_id = %task_id, "Task deleted");

        Ok(())
    }

    /// List a task's change log, newest first
    #[instrument(skip(self))]
    pub async fn get_change_log(
        &self,
        task_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
        before: Option<Snowflake>,
    ) -> ServiceResult<Vec<ChangeLogResponse>> {
        self.load_for_member(task_id, user_id).await?;

        let entries = self
            .ctx
            .change_log_repo()
            .find_by_task(task_id, limit, before)
            .await?;

        Ok(entries.iter().map(ChangeLogResponse::from).collect())
    }

    /// Diff, persist, and audit a task mutation
    async fn persist_with_log(
        &self,
        old: &Task,
        updated: Task,
        user_id: Snowflake,
    ) -> ServiceResult<TaskResponse> {
        let changes = diff_tasks(old, &updated);

        if changes.is_empty() && updated.position == old.position {
            return Ok(TaskResponse::from(&updated));
        }

        let log_ids: Vec<Snowflake> = changes.iter().map(|_| self.ctx.generate_id()).collect();

        self.ctx
            .task_repo()
            .update_with_log(&updated, &changes, user_id, &log_ids)
            .await?;

        info!(
            task_id = %updated.id,
            changed_fields = changes.len(),
            "Task updated"
        );

        Ok(TaskResponse::from(&updated))
    }

    /// Resolve an assignee ID string and require org membership
    async fn parse_assignee(
        &self,
        organization_id: Snowflake,
        raw: &str,
    ) -> ServiceResult<Snowflake> {
        let assignee_id = raw
            .parse::<Snowflake>()
            .map_err(|_| ServiceError::validation("Invalid assignee_id format"))?;

        let is_member = self
            .ctx
            .member_repo()
            .is_member(organization_id, assignee_id)
            .await?;
        if !is_member {
            return Err(ServiceError::validation(
                "Assignee must be an organization member",
            ));
        }

        Ok(assignee_id)
    }

    /// Load a task and verify the caller can see it
    async fn load_for_member(
        &self,
        task_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Task> {
        let task = self
            .ctx
            .task_repo()
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", task_id.to_string()))?;

        let is_member = self
            .ctx
            .member_repo()
            .is_member(task.organization_id, user_id)
            .await?;
        if !is_member {
            return Err(ServiceError::not_found("Task", task_id.to_string()));
        }

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::value_objects::{position_for_index, POSITION_MAX};

    #[test]
    fn test_drop_position_formula() {
        // destination index 0 -> first slot, capped at the board maximum
        assert_eq!(position_for_index(0), 1000);
        assert_eq!(position_for_index(4), 5000);
        assert_eq!(position_for_index(usize::MAX / 2000), POSITION_MAX);
    }
}
