//! Authentication service
//!
//! Handles user registration, login, token refresh, logout, and the
//! caller's active organization.

use tracing::{info, instrument, warn};
use trellis_cache::RefreshTokenData;
use trellis_common::auth::{hash_password, validate_password_strength, verify_password};
use trellis_core::entities::User;
use trellis_core::Snowflake;
use uuid::Uuid;

use crate::dto::requests::{LoginRequest, LogoutRequest, RefreshTokenRequest, RegisterRequest};
use crate::dto::responses::{ActiveOrganizationResponse, AuthResponse, CurrentUserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password).map_err(ServiceError::from)?;

        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(ServiceError::conflict("Email already registered"));
        }

        let password_hash =
            hash_password(&request.password).map_err(|e| ServiceError::internal(e.to_string()))?;

        let user_id = self.ctx.generate_id();
        let user = User::new(user_id, request.username, request.email.to_lowercase());

        self.ctx.user_repo().create(&user, &password_hash).await?;

        info!(user_id = %user_id, "User registered");

        self.issue_session(&user).await
    }

    /// Authenticate with email and password
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&request.email)
            .await?
            .ok_or(ServiceError::App(
                trellis_common::AppError::InvalidCredentials,
            ))?;

        let hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(
                trellis_common::AppError::InvalidCredentials,
            ))?;

        let valid =
            verify_password(&request.password, &hash).map_err(ServiceError::from)?;
        if !valid {
            warn!(user_id = %user.id, "Login failed: bad password");
            return Err(ServiceError::App(
                trellis_common::AppError::InvalidCredentials,
            ));
        }

        info!(user_id = %user.id, "User logged in");

        self.issue_session(&user).await
    }

    /// Exchange a valid refresh token for a fresh token pair
    #[instrument(skip(self, request))]
    pub async fn refresh(&self, request: RefreshTokenRequest) -> ServiceResult<AuthResponse> {
        let claims = self
            .ctx
            .jwt_service()
            .validate_refresh_token(&request.refresh_token)
            .map_err(ServiceError::from)?;

        let user_id = claims.user_id().map_err(ServiceError::from)?;
        let session_id = claims
            .session_id
            .clone()
            .ok_or(ServiceError::App(trellis_common::AppError::InvalidToken))?;

        // The session must still exist in Redis; a revoked session cannot refresh
        let stored = self
            .ctx
            .refresh_token_store()
            .validate(&session_id)
            .await?;
        if stored.is_none_or(|data| data.user_id != user_id) {
            return Err(ServiceError::App(trellis_common::AppError::InvalidToken));
        }

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))?;

        let pair = self
            .ctx
            .jwt_service()
            .refresh_tokens(&request.refresh_token)
            .map_err(ServiceError::from)?;

        // Rotation extends the session TTL
        self.ctx
            .refresh_token_store()
            .store(&session_id, &RefreshTokenData::new(user_id, session_id.clone()))
            .await?;

        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: CurrentUserResponse::from(&user),
        })
    }

    /// Revoke the caller's session(s)
    #[instrument(skip(self, request))]
    pub async fn logout(&self, user_id: Snowflake, request: LogoutRequest) -> ServiceResult<()> {
        if request.all_sessions {
            let count = self
                .ctx
                .refresh_token_store()
                .revoke_all_for_user(user_id)
                .await?;
            info!(user_id = %user_id, sessions = count, "Logged out of all sessions");
            return Ok(());
        }

        if let Some(refresh_token) = request.refresh_token {
            if let Ok(claims) = self.ctx.jwt_service().validate_refresh_token(&refresh_token) {
                if let Some(session_id) = claims.session_id {
                    self.ctx.refresh_token_store().revoke(&session_id).await?;
                }
            }
        }

        info!(user_id = %user_id, "Logged out");
        Ok(())
    }

    /// Set the caller's active organization after a membership check
    #[instrument(skip(self))]
    pub async fn set_active_organization(
        &self,
        user_id: Snowflake,
        organization_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_member(organization_id, user_id)
            .await?;

        self.ctx
            .active_org_store()
            .set(user_id, organization_id)
            .await?;

        info!(user_id = %user_id, organization_id = %organization_id, "Active organization set");
        Ok(())
    }

    /// Get the caller's active organization, if it is still accessible
    #[instrument(skip(self))]
    pub async fn active_organization(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<ActiveOrganizationResponse> {
        let Some(org_id) = self.ctx.active_org_store().get(user_id).await? else {
            return Ok(ActiveOrganizationResponse { organization: None });
        };

        // Membership may have been revoked since the value was written
        if !self.ctx.member_repo().is_member(org_id, user_id).await? {
            self.ctx.active_org_store().clear(user_id).await?;
            return Ok(ActiveOrganizationResponse { organization: None });
        }

        let organization = self.ctx.organization_repo().find_by_id(org_id).await?;
        Ok(ActiveOrganizationResponse {
            organization: organization.map(|org| (&org).into()),
        })
    }

    /// Create a Redis-tracked session and issue a token pair
    async fn issue_session(&self, user: &User) -> ServiceResult<AuthResponse> {
        let session_id = Uuid::new_v4().to_string();

        let pair = self
            .ctx
            .jwt_service()
            .generate_token_pair(user.id, Some(session_id.clone()))
            .map_err(ServiceError::from)?;

        self.ctx
            .refresh_token_store()
            .store(&session_id, &RefreshTokenData::new(user.id, session_id.clone()))
            .await?;

        Ok(AuthResponse {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
            user: CurrentUserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end by tests/integration; unit coverage would need
    // mocked repositories and stores.
}
