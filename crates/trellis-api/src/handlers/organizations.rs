//! Organization handlers

use axum::{
    extract::{Path, State},
    Json,
};
use trellis_service::{
    CreateOrganizationRequest, OrganizationResponse, OrganizationService,
    OrganizationWithCountsResponse, TransferOwnershipRequest, UpdateOrganizationRequest,
};

use crate::extractors::{AuthUser, OrganizationIdPath, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a new organization
///
/// POST /organizations
pub async fn create_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateOrganizationRequest>,
) -> ApiResult<Created<Json<OrganizationResponse>>> {
    let service = OrganizationService::new(state.service_context());
    let response = service.create_organization(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Get organization by ID
///
/// GET /organizations/{organization_id}
pub async fn get_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
) -> ApiResult<Json<OrganizationWithCountsResponse>> {
    let organization_id = path.organization_id()?;

    let service = OrganizationService::new(state.service_context());
    let response = service
        .get_organization(organization_id, auth.user_id)
        .await?;
    Ok(Json(response))
}

/// Update organization settings
///
/// PATCH /organizations/{organization_id}
pub async fn update_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateOrganizationRequest>,
) -> ApiResult<Json<OrganizationResponse>> {
    let organization_id = path.organization_id()?;

    let service = OrganizationService::new(state.service_context());
    let response = service
        .update_organization(organization_id, auth.user_id, request)
        .await?;
    Ok(Json(response))
}

/// Transfer organization ownership
///
/// POST /organizations/{organization_id}/transfer-ownership
pub async fn transfer_ownership(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
    ValidatedJson(request): ValidatedJson<TransferOwnershipRequest>,
) -> ApiResult<NoContent> {
    let organization_id = path.organization_id()?;
    let new_owner_id = request
        .user_id
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid user_id format"))?;

    let service = OrganizationService::new(state.service_context());
    service
        .transfer_ownership(organization_id, auth.user_id, new_owner_id)
        .await?;
    Ok(NoContent)
}

/// Delete organization
///
/// DELETE /organizations/{organization_id}
pub async fn delete_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<OrganizationIdPath>,
) -> ApiResult<NoContent> {
    let organization_id = path.organization_id()?;

    let service = OrganizationService::new(state.service_context());
    service
        .delete_organization(organization_id, auth.user_id)
        .await?;
    Ok(NoContent)
}
