//! Organization member handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{MemberResponse, MemberService, UpdateMemberRoleRequest};

use crate::extractors::{AuthUser, MemberPath, OrganizationIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List organization members
///
/// GET /organizations/{organization_id}/members
pub async fn list_members(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<Vec<MemberResponse>>> {
    let organization_id = path.organization_id()?;

    let service = MemberService::new(state.service_context());
    let response = service
        .list_members(
            organization_id,
            auth.user_id,
            i64::from(pagination.limit),
            pagination.after,
        )
        .await?;
    Ok(Json(response))
}

/// Get a single member
///
/// GET /organizations/{organization_id}/members/{user_id}
pub async fn get_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberPath>,
) -> ApiResult<Json<MemberResponse>> {
    let organization_id = path.organization_id()?;
    let user_id = path.user_id()?;

    let service = MemberService::new(state.service_context());
    let response = service
        .get_member(organization_id, user_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Change a member's role
///
/// PATCH /organizations/{organization_id}/members/{user_id}
pub async fn update_member_role(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRoleRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let organization_id = path.organization_id()?;
    let user_id = path.user_id()?;

    let service = MemberService::new(state.service_context());
    let response = service
        .update_member_role(organization_id, user_id, auth.user_id, request.role)
        .await?;
    Ok(Json(response))
}

/// Remove a member from the organization
///
/// DELETE /organizations/{organization_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MemberPath>,
) -> ApiResult<NoContent> {
    let organization_id = path.organization_id()?;
    let user_id = path.user_id()?;

    let service = MemberService::new(state.service_context());
    service
        .remove_member(organization_id, user_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Leave the organization
///
/// DELETE /organizations/{organization_id}/members/@me
pub async fn leave_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
) -> ApiResult<NoContent> {
    let organization_id = path.organization_id()?;

    let service = MemberService::new(state.service_context());
    service
        .leave_organization(organization_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
