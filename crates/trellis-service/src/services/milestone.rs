//! Milestone service
//!
//! Milestone CRUD plus the task association surface.

use tracing::{info, instrument};
use trellis_core::entities::Milestone;
use trellis_core::{DomainError, Permissions, Snowflake};

use crate::dto::mappers::MilestoneWithCounts;
use crate::dto::requests::{CreateMilestoneRequest, UpdateMilestoneRequest};
use crate::dto::responses::{MilestoneResponse, MilestoneWithCountsResponse, TaskResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;
use super::project::ProjectService;

/// Milestone service
pub struct MilestoneService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MilestoneService<'a> {
    /// Create a new MilestoneService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a milestone in a project
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_milestone(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        request: CreateMilestoneRequest,
    ) -> ServiceResult<MilestoneResponse> {
        let project = ProjectService::new(self.ctx)
            .load_for_member(project_id, user_id)
            .await?;

        PermissionService::new(self.ctx)
            .require_permission(
                project.organization_id,
                user_id,
                Permissions::MANAGE_MILESTONES,
            )
            .await?;

        let mut milestone = Milestone::new(
            self.ctx.generate_id(),
            project_id,
            project.organization_id,
            request.name,
            user_id,
        );
        milestone.description = request.description;
        milestone.target_date = request.target_date;
        if let Some(status) = request.status {
            milestone.status = status;
        }

        self.ctx.milestone_repo().create(&milestone).await?;

        info!(milestone_id = %milestone.id, project_id = %project_id, "Milestone created");

        Ok(MilestoneResponse::from(&milestone))
    }

    /// Get a milestone with its task progress counts
    #[instrument(skip(self))]
    pub async fn get_milestone(
        &self,
        milestone_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<MilestoneWithCountsResponse> {
        let milestone = self.load_for_member(milestone_id, user_id).await?;

        let (task_count, done_count) =
            self.ctx.milestone_repo().task_counts(milestone_id).await?;

        Ok(MilestoneWithCountsResponse::from(MilestoneWithCounts {
            milestone,
            task_count,
            done_count,
        }))
    }

    /// List milestones in a project
    #[instrument(skip(self))]
    pub async fn list_milestones(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<MilestoneResponse>> {
        ProjectService::new(self.ctx)
            .load_for_member(project_id, user_id)
            .await?;

        let milestones = self.ctx.milestone_repo().find_by_project(project_id).await?;
        Ok(milestones.iter().map(MilestoneResponse::from).collect())
    }

    /// Update a milestone
    #[instrument(skip(self, request))]
    pub async fn update_milestone(
        &self,
        milestone_id: Snowflake,
        user_id: Snowflake,
        request: UpdateMilestoneRequest,
    ) -> ServiceResult<MilestoneResponse> {
        let mut milestone = self.load_for_member(milestone_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(
                milestone.organization_id,
                user_id,
                Permissions::MANAGE_MILESTONES,
            )
            .await?;

        let mut changed = false;

        if let Some(name) = request.name {
            milestone.name = name;
            changed = true;
        }
        if let Some(description) = request.description {
            milestone.description = Some(description);
            changed = true;
        }
        if let Some(target_date) = request.target_date {
            milestone.target_date = Some(target_date);
            changed = true;
        }
        if let Some(status) = request.status {
            milestone.set_status(status);
            changed = true;
        }

        if changed {
            self.ctx.milestone_repo().update(&milestone).await?;
            info!(milestone_id = %milestone_id, "Milestone updated");
        }

        Ok(MilestoneResponse::from(&milestone))
    }

    /// Delete a milestone (its task links go with it; tasks survive)
    #[instrument(skip(self))]
    pub async fn delete_milestone(
        &self,
        milestone_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let milestone = self.load_for_member(milestone_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(
                milestone.organization_id,
                user_id,
                Permissions::MANAGE_MILESTONES,
            )
            .await?;

        self.ctx.milestone_repo().delete(milestone_id).await?;

        info!(milestone_id = %milestone_id, "Milestone deleted");

        Ok(())
    }

    /// Attach a task to a milestone (same project required)
    #[instrument(skip(self))]
    pub async fn attach_task(
        &self,
        milestone_id: Snowflake,
        task_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let milestone = self.load_for_member(milestone_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(
                milestone.organization_id,
                user_id,
                Permissions::MANAGE_MILESTONES,
            )
            .await?;

        let task = self
            .ctx
            .task_repo()
            .find_by_id(task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Task", task_id.to_string()))?;

        if task.project_id != milestone.project_id {
            return Err(ServiceError::from(DomainError::ProjectMismatch));
        }

        self.ctx
            .milestone_repo()
            .attach_task(milestone_id, task_id)
            .await?;

        info!(milestone_id = %milestone_id, task_id = %task_id, "Task attached to milestone");

        Ok(())
    }

    /// Detach a task from a milestone
    #[instrument(skip(self))]
    pub async fn detach_task(
        &self,
        milestone_id: Snowflake,
        task_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let milestone = self.load_for_member(milestone_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(
                milestone.organization_id,
                user_id,
                Permissions::MANAGE_MILESTONES,
            )
            .await?;

        self.ctx
            .milestone_repo()
            .detach_task(milestone_id, task_id)
            .await?;

        info!(milestone_id = %milestone_id, task_id = %task_id, "Task detached from milestone");

        Ok(())
    }

    /// List tasks attached to a milestone
    #[instrument(skip(self))]
    pub async fn list_tasks(
        &self,
        milestone_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<TaskResponse>> {
        self.load_for_member(milestone_id, user_id).await?;

        let tasks = self.ctx.milestone_repo().find_tasks(milestone_id).await?;
        Ok(tasks.iter().map(TaskResponse::from).collect())
    }

    /// Load a milestone and verify the caller can see it
    async fn load_for_member(
        &self,
        milestone_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Milestone> {
        let milestone = self
            .ctx
            .milestone_repo()
            .find_by_id(milestone_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Milestone", milestone_id.to_string()))?;

        let is_member = self
            .ctx
            .member_repo()
            .is_member(milestone.organization_id, user_id)
            .await?;
        if !is_member {
            return Err(ServiceError::not_found(
                "Milestone",
                milestone_id.to_string(),
            ));
        }

        Ok(milestone)
    }
}
