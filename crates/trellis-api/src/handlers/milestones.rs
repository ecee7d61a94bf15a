//! Milestone handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{
    CreateMilestoneRequest, MilestoneResponse, MilestoneService, MilestoneWithCountsResponse,
    TaskResponse, UpdateMilestoneRequest,
};

use crate::extractors::{AuthUser, MilestoneIdPath, MilestoneTaskPath, ProjectIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a milestone in a project
///
/// POST /projects/{project_id}/milestones
pub async fn create_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
    ValidatedJson(request): ValidatedJson<CreateMilestoneRequest>,
) -> ApiResult<Created<Json<MilestoneResponse>>> {
    let project_id = path.project_id()?;

    let service = MilestoneService::new(state.service_context());
    let response = service
        .create_milestone(project_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List milestones in a project
///
/// GET /projects/{project_id}/milestones
pub async fn list_milestones(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
) -> ApiResult<Json<Vec<MilestoneResponse>>> {
    let project_id = path.project_id()?;

    let service = MilestoneService::new(state.service_context());
    let response = service.list_milestones(project_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Get milestone with task progress counts
///
/// GET /milestones/{milestone_id}
pub async fn get_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneIdPath>,
) -> ApiResult<Json<MilestoneWithCountsResponse>> {
    let milestone_id = path.milestone_id()?;

    let service = MilestoneService::new(state.service_context());
    let response = service.get_milestone(milestone_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update a milestone
///
/// PATCH /milestones/{milestone_id}
pub async fn update_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateMilestoneRequest>,
) -> ApiResult<Json<MilestoneResponse>> {
    let milestone_id = path.milestone_id()?;

    let service = MilestoneService::new(state.service_context());
    let response = service
        .update_milestone(milestone_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Delete a milestone
///
/// DELETE /milestones/{milestone_id}
pub async fn delete_milestone(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneIdPath>,
) -> ApiResult<NoContent> {
    let milestone_id = path.milestone_id()?;

    let service = MilestoneService::new(state.service_context());
    service.delete_milestone(milestone_id, auth.user_id).await?;
    Ok(NoContent)
}

/// List tasks attached to a milestone
///
/// GET /milestones/{milestone_id}/tasks
pub async fn list_milestone_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneIdPath>,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let milestone_id = path.milestone_id()?;

    let service = MilestoneService::new(state.service_context());
    let response = service.list_tasks(milestone_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Attach a task to a milestone
///
/// PUT /milestones/{milestone_id}/tasks/{task_id}
pub async fn attach_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneTaskPath>,
) -> ApiResult<NoContent> {
    let milestone_id = path.milestone_id()?;
    let task_id = path.task_id()?;

    let service = MilestoneService::new(state.service_context());
    service
        .attach_task(milestone_id, task_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Detach a task from a milestone
///
/// DELETE /milestones/{milestone_id}/tasks/{task_id}
pub async fn detach_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MilestoneTaskPath>,
) -> ApiResult<NoContent> {
    let milestone_id = path.milestone_id()?;
    let task_id = path.task_id()?;

    let service = MilestoneService::new(state.service_context());
    service
        .detach_task(milestone_id, task_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
