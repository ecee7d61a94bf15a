//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{
    CurrentUserResponse, InvitationResponse, InvitationService, OrganizationResponse,
    OrganizationService, UpdateUserRequest, UserResponse, UserService,
};

use crate::extractors::{AuthUser, UserIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the authenticated user
///
/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.get_current_user(auth.user_id).await?;
    Ok(Json(response))
}

/// Update the authenticated user
///
/// PATCH /users/@me
pub async fn update_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.update_current_user(auth.user_id, request).await?;
    Ok(Json(response))
}

/// List the authenticated user's organizations
///
/// GET /users/@me/organizations
pub async fn get_current_user_organizations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<OrganizationResponse>>> {
    let service = OrganizationService::new(state.service_context());
    let response = service.get_user_organizations(auth.user_id).await?;
    Ok(Json(response))
}

/// List pending invitations addressed to the authenticated user
///
/// GET /users/@me/invitations
pub async fn get_current_user_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let service = InvitationService::new(state.service_context());
    let response = service.list_my_invitations(auth.user_id).await?;
    Ok(Json(response))
}

/// Get a user's public profile
///
/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = path.user_id()?;

    let service = UserService::new(state.service_context());
    let response = service.get_user(user_id).await?;
    Ok(Json(response))
}
