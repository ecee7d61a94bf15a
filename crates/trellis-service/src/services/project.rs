//! Project service
//!
//! Handles project creation, listing, updates, and deletion within an
//! organization.

use tracing::{info, instrument};
use trellis_core::entities::Project;
use trellis_core::{Permissions, Snowflake};

use crate::dto::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::dto::responses::ProjectResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Project service
pub struct ProjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProjectService<'a> {
    /// Create a new ProjectService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a project in an organization
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_project(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        request: CreateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        PermissionService::new(self.ctx)
            .require_permission(organization_id, user_id, Permissions::MANAGE_PROJECTS)
            .await?;

        let mut project = Project::new(self.ctx.generate_id(), organization_id, request.name);
        project.image = request.image;
        project.description = request.description;

        self.ctx.project_repo().create(&project).await?;

        info!(project_id = %project.id, organization_id = %organization_id, "Project created");

        Ok(ProjectResponse::from(&project))
    }

    /// Get a project (members of its organization only)
    #[instrument(skip(self))]
    pub async fn get_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<ProjectResponse> {
        let project = self.load_for_member(project_id, user_id).await?;
        Ok(ProjectResponse::from(&project))
    }

    /// List projects in an organization
    #[instrument(skip(self))]
    pub async fn list_projects(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        limit: i64,
        after: Option<Snowflake>,
    ) -> ServiceResult<Vec<ProjectResponse>> {
        PermissionService::new(self.ctx)
            .require_member(organization_id, user_id)
            .await?;

        let projects = self
            .ctx
            .project_repo()
            .find_by_organization(organization_id, limit, after)
            .await?;

        Ok(projects.iter().map(ProjectResponse::from).collect())
    }

    /// Update a project
    #[instrument(skip(self, request))]
    pub async fn update_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
        request: UpdateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        let mut project = self.load_for_member(project_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(project.organization_id, user_id, Permissions::MANAGE_PROJECTS)
            .await?;

        let mut changed = false;

        if let Some(name) = request.name {
            project.set_name(name);
            changed = true;
        }

        if let Some(image) = request.image {
            project.set_image(Some(image));
            changed = true;
        }

        if let Some(description) = request.description {
            project.set_description(Some(description));
            changed = true;
        }

        if changed {
            self.ctx.project_repo().update(&project).await?;
            info!(project_id = %project_id, "Project updated");
        }

        Ok(ProjectResponse::from(&project))
    }

    /// Delete a project (cascades to its tasks and milestones)
    #[instrument(skip(self))]
    pub async fn delete_project(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        let project = self.load_for_member(project_id, user_id).await?;

        PermissionService::new(self.ctx)
            .require_permission(project.organization_id, user_id, Permissions::MANAGE_PROJECTS)
            .await?;

        self.ctx.project_repo().delete(project_id).await?;

        info!(project_id = %project_id, "Project deleted");

        Ok(())
    }

    /// Load a project and verify the caller can see it.
    ///
    /// A project in a foreign organization is indistinguishable from a
    /// missing one.
    pub(crate) async fn load_for_member(
        &self,
        project_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Project> {
        let project = self
            .ctx
            .project_repo()
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Project", project_id.to_string()))?;

        let is_member = self
            .ctx
            .member_repo()
            .is_member(project.organization_id, user_id)
            .await?;
        if !is_member {
            return Err(ServiceError::not_found("Project", project_id.to_string()));
        }

        Ok(project)
    }
}
