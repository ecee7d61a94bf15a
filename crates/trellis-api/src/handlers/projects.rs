//! Project handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{
    CreateProjectRequest, ProjectResponse, ProjectService, UpdateProjectRequest,
};

use crate::extractors::{AuthUser, OrganizationIdPath, Pagination, ProjectIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a project in an organization
///
/// POST /organizations/{organization_id}/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    ValidatedJson(request): ValidatedJson<CreateProjectRequest>,
) -> ApiResult<Created<Json<ProjectResponse>>> {
    let organization_id = path.organization_id()?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .create_project(organization_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List projects in an organization
///
/// GET /organizations/{organization_id}/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ProjectResponse>>> {
    let organization_id = path.organization_id()?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .list_projects(
            organization_id,
            auth.user_id,
            i64::from(pagination.limit),
            pagination.after,
        )
        .await?;
    Ok(Json(response))
}

/// Get project by ID
///
/// GET /projects/{project_id}
pub async fn get_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = path.project_id()?;

    let service = ProjectService::new(state.service_context());
    let response = service.get_project(project_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a project
///
/// PATCH /projects/{project_id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateProjectRequest>,
) -> ApiResult<Json<ProjectResponse>> {
    let project_id = path.project_id()?;

    let service = ProjectService::new(state.service_context());
    let response = service
        .update_project(project_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a project
///
/// DELETE /projects/{project_id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
) -> ApiResult<NoContent> {
    let project_id = path.project_id()?;

    let service = ProjectService::new(state.service_context());
    service.delete_project(project_id, auth.user_id).await?;
    Ok(NoContent)
}
