//! Invitation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{CreateInvitationRequest, InvitationResponse, InvitationService};

use crate::extractors::{
    AuthUser, InvitationIdPath, OrganizationIdPath, OrganizationInvitationPath, ValidatedJson,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Invite an email address into the organization
///
/// POST /organizations/{organization_id}/invitations
pub async fn create_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    ValidatedJson(request): ValidatedJson<CreateInvitationRequest>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let organization_id = path.organization_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service
        .create_invitation(organization_id, auth.user_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// List pending invitations for the organization
///
/// GET /organizations/{organization_id}/invitations
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let organization_id = path.organization_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service
        .list_organization_invitations(organization_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Get a single invitation
///
/// GET /invitations/{invitation_id}
pub async fn get_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<InvitationIdPath>,
) -> ApiResult<Json<InvitationResponse>> {
    let invitation_id = path.invitation_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service.get_invitation(invitation_id, auth.user_id).await?;
    Ok(Json(response))
}

/// Accept an invitation
///
/// POST /invitations/{invitation_id}/accept
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<InvitationIdPath>,
) -> ApiResult<Json<InvitationResponse>> {
    let invitation_id = path.invitation_id()?;

    let service = InvitationService::new(state.service_context());
    let response = service
        .accept_invitation(invitation_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Decline an invitation
///
/// POST /invitations/{invitation_id}/decline
pub async fn decline_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<InvitationIdPath>,
) -> ApiResult<NoContent> {
    let invitation_id = path.invitation_id()?;

    let service = InvitationService::new(state.service_context());
    service
        .decline_invitation(invitation_id, auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Cancel a pending invitation
///
/// DELETE /organizations/{organization_id}/invitations/{invitation_id}
pub async fn cancel_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationInvitationPath>,
) -> ApiResult<NoContent> {
    let organization_id = path.organization_id()?;
    let invitation_id = path.invitation_id()?;

    let service = InvitationService::new(state.service_context());
    service
        .cancel_invitation(organization_id, invitation_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
