//! Task handlers
//!
//! Task CRUD, board moves, batch reordering, and the change log.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use trellis_core::entities::TaskStatus;
use trellis_core::traits::TaskQuery;
use trellis_service::{
    ChangeLogResponse, CreateTaskRequest, MoveTaskRequest, ReorderTasksRequest, TaskResponse,
    TaskService, UpdateTaskRequest,
};

use crate::extractors::{AuthUser, Pagination, ProjectIdPath, TaskIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Task list filter query parameters
#[derive(Debug, Deserialize)]
pub struct TaskFilterParams {
    /// Filter by board column
    pub status: Option<String>,
    /// Filter by assignee (Snowflake as string)
    pub assignee_id: Option<String>,
    /// Only tasks due before this instant (RFC 3339)
    pub due_before: Option<chrono::DateTime<chrono::Utc>>,
}

/// Create a task in a project
///
/// POST /projects/{project_id}/tasks
pub async fn create_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
    ValidatedJson(request): ValidatedJson<CreateTaskRequest>,
) -> ApiResult<Created<Json<TaskResponse>>> {
    let project_id = path.project_id()?;

    let service = TaskService::new(state.service_context());
    let response = service
        .create_task(project_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List tasks in a project with optional filters
///
/// GET /projects/{project_id}/tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
    Query(filters): Query<TaskFilterParams>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<TaskResponse>>> {
    let project_id = path.project_id()?;

    let status = filters
        .status
        .map(|s| {
            TaskStatus::parse(&s).ok_or_else(|| ApiError::invalid_query("Unknown task status"))
        })
        .transpose()?;

    let assignee_id = filters
        .assignee_id
        .map(|s| {
            s.parse()
                .map_err(|_| ApiError::invalid_query("Invalid assignee_id format"))
        })
        .transpose()?;

    let query = TaskQuery {
        status,
        assignee_id,
        due_before: filters.due_before,
        after: pagination.after,
        limit: i64::from(pagination.limit),
    };

    let service = TaskService::new(state.service_context());
    let response = service.list_tasks(project_id, auth.user_id, query).await?;
    Ok(Json(response))
}

/// Batch-apply board positions after a drag
///
/// PATCH /projects/{project_id}/tasks/reorder
pub async fn reorder_tasks(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<ProjectIdPath>,
    ValidatedJson(request): ValidatedJson<ReorderTasksRequest>,
) -> ApiResult<NoContent> {
    let project_id = path.project_id()?;

    let service = TaskService::new(state.service_context());
    service
        .reorder_tasks(project_id, auth.user_id, request)
        .await?;
    Ok(NoContent)
}

/// Get task by ID
///
/// GET /tasks/{task_id}
pub async fn get_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TaskIdPath>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = path.task_id()?;

    let service = TaskService::new(state.service_context());
    let response = service.get_task(task_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Update task fields (audited per changed field)
///
/// PATCH /tasks/{task_id}
pub async fn update_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TaskIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = path.task_id()?;

    let service = TaskService::new(state.service_context());
    let response = service.update_task(task_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Move a task to a column position
///
/// PATCH /tasks/{task_id}/move
pub async fn move_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TaskIdPath>,
    ValidatedJson(request): ValidatedJson<MoveTaskRequest>,
) -> ApiResult<Json<TaskResponse>> {
    let task_id = path.task_id()?;

    let service = TaskService::new(state.service_context());
    let response = service.move_task(task_id, auth.user_id, request).await?;
    Ok(Json(response))
}

/// Delete a task
///
/// DELETE /tasks/{task_id}
pub async fn delete_task(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TaskIdPath>,
) -> ApiResult<NoContent> {
    let task_id = path.task_id()?;

    let service = TaskService::new(state.service_context());
    service.delete_task(task_id, auth.user_id).await?;
    Ok(NoContent)
}

/// List a task's change log, newest first
///
/// GET /tasks/{task_id}/changelog
pub async fn get_change_log(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<TaskIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<ChangeLogResponse>>> {
    let task_id = path.task_id()?;

    let service = TaskService::new(state.service_context());
    let response = service
        .get_change_log(
            task_id,
            auth.user_id,
            i64::from(pagination.limit),
            pagination.before,
        )
        .await?;
    Ok(Json(response))
}
