//! Authentication handlers
//!
//! Registration, login, token refresh, logout, and the caller's active
//! organization.

use axum::{extract::State, Json};
use trellis_service::{
    ActiveOrganizationResponse, AuthResponse, AuthService, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest, SetActiveOrganizationRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<AuthResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Exchange a refresh token for a new token pair
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(request): Json<RefreshTokenRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Logout (revoke refresh session)
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
    request: Option<Json<LogoutRequest>>,
) -> ApiResult<NoContent> {
    let request = request.map(|Json(r)| r).unwrap_or_default();
    let service = AuthService::new(state.service_context());
    service.logout(auth.user_id, request).await?;
    Ok(NoContent)
}

/// Set the caller's active organization
///
/// POST /auth/set-active-organization
pub async fn set_active_organization(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SetActiveOrganizationRequest>,
) -> ApiResult<NoContent> {
    let organization_id = request
        .organization_id
        .parse()
        .map_err(|_| ApiError::invalid_query("Invalid organization_id format"))?;

    let service = AuthService::new(state.service_context());
    service
        .set_active_organization(auth.user_id, organization_id)
        .await?;
    Ok(NoContent)
}

/// Get the caller's active organization
///
/// GET /auth/active-organization
pub async fn active_organization(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ActiveOrganizationResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.active_organization(auth.user_id).await?;
    Ok(Json(response))
}
