//! Service context - dependency container for services
//!
//! Holds all repositories, cache stores, and other dependencies needed by services.

use std::sync::Arc;

use trellis_cache::{ActiveOrganizationStore, RefreshTokenStore, SharedRedisPool};
use trellis_common::auth::JwtService;
use trellis_core::traits::{
    ChangeLogRepository, InvitationRepository, MemberRepository, MilestoneRepository,
    OrganizationRepository, ProjectRepository, TaskRepository, UserRepository,
};
use trellis_core::SnowflakeGenerator;
use trellis_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// It provides access to:
/// - Database repositories
/// - Redis-backed session stores
/// - JWT service for authentication
/// - Snowflake generator for ID generation
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Redis pool
    redis_pool: SharedRedisPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    organization_repo: Arc<dyn OrganizationRepository>,
    member_repo: Arc<dyn MemberRepository>,
    invitation_repo: Arc<dyn InvitationRepository>,
    project_repo: Arc<dyn ProjectRepository>,
    task_repo: Arc<dyn TaskRepository>,
    change_log_repo: Arc<dyn ChangeLogRepository>,
    milestone_repo: Arc<dyn MilestoneRepository>,

    // Session stores
    refresh_token_store: RefreshTokenStore,
    active_org_store: ActiveOrganizationStore,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        redis_pool: SharedRedisPool,
        user_repo: Arc<dyn UserRepository>,
        organization_repo: Arc<dyn OrganizationRepository>,
        member_repo: Arc<dyn MemberRepository>,
        invitation_repo: Arc<dyn InvitationRepository>,
        project_repo: Arc<dyn ProjectRepository>,
        task_repo: Arc<dyn TaskRepository>,
        change_log_repo: Arc<dyn ChangeLogRepository>,
        milestone_repo: Arc<dyn MilestoneRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
    ) -> Self {
        let inner_pool = (*redis_pool).clone();
        let refresh_token_store = RefreshTokenStore::new(inner_pool.clone());
        let active_org_store = ActiveOrganizationStore::new(inner_pool);

        Self {
            pool,
            redis_pool,
            user_repo,
            organization_repo,
            member_repo,
            invitation_repo,
            project_repo,
            task_repo,
            change_log_repo,
            milestone_repo,
            refresh_token_store,
            active_org_store,
            jwt_service,
            snowflake_generator,
        }
    }

    // === Pools ===

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the Redis connection pool
    pub fn redis_pool(&self) -> &SharedRedisPool {
        &self.redis_pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the organization repository
    pub fn organization_repo(&self) -> &dyn OrganizationRepository {
        self.organization_repo.as_ref()
    }

    /// Get the member repository
    pub fn member_repo(&self) -> &dyn MemberRepository {
        self.member_repo.as_ref()
    }

    /// Get the invitation repository
    pub fn invitation_repo(&self) -> &dyn InvitationRepository {
        self.invitation_repo.as_ref()
    }

    /// Get the project repository
    pub fn project_repo(&self) -> &dyn ProjectRepository {
        self.project_repo.as_ref()
    }

    /// Get the task repository
    pub fn task_repo(&self) -> &dyn TaskRepository {
        self.task_repo.as_ref()
    }

    /// Get the change log repository
    pub fn change_log_repo(&self) -> &dyn ChangeLogRepository {
        self.change_log_repo.as_ref()
    }

    /// Get the milestone repository
    pub fn milestone_repo(&self) -> &dyn MilestoneRepository {
        self.milestone_repo.as_ref()
    }

    // === Session stores ===

    /// Get the refresh token store
    pub fn refresh_token_store(&self) -> &RefreshTokenStore {
        &self.refresh_token_store
    }

    /// Get the active organization store
    pub fn active_org_store(&self) -> &ActiveOrganizationStore {
        &self.active_org_store
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> trellis_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("redis_pool", &"SharedRedisPool")
            .field("repositories", &"...")
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    redis_pool: Option<SharedRedisPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    organization_repo: Option<Arc<dyn OrganizationRepository>>,
    member_repo: Option<Arc<dyn MemberRepository>>,
    invitation_repo: Option<Arc<dyn InvitationRepository>>,
    project_repo: Option<Arc<dyn ProjectRepository>>,
    task_repo: Option<Arc<dyn TaskRepository>>,
    change_log_repo: Option<Arc<dyn ChangeLogRepository>>,
    milestone_repo: Option<Arc<dyn MilestoneRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn redis_pool(mut self, redis_pool: SharedRedisPool) -> Self {
        self.redis_pool = Some(redis_pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn organization_repo(mut self, repo: Arc<dyn OrganizationRepository>) -> Self {
        self.organization_repo = Some(repo);
        self
    }

    pub fn member_repo(mut self, repo: Arc<dyn MemberRepository>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    pub fn invitation_repo(mut self, repo: Arc<dyn InvitationRepository>) -> Self {
        self.invitation_repo = Some(repo);
        self
    }

    pub fn project_repo(mut self, repo: Arc<dyn ProjectRepository>) -> Self {
        self.project_repo = Some(repo);
        self
    }

    pub fn task_repo(mut self, repo: Arc<dyn TaskRepository>) -> Self {
        self.task_repo = Some(repo);
        self
    }

    pub fn change_log_repo(mut self, repo: Arc<dyn ChangeLogRepository>) -> Self {
        self.change_log_repo = Some(repo);
        self
    }

    pub fn milestone_repo(mut self, repo: Arc<dyn MilestoneRepository>) -> Self {
        self.milestone_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool
                .ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.redis_pool
                .ok_or_else(|| ServiceError::validation("redis_pool is required"))?,
            self.user_repo
                .ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.organization_repo
                .ok_or_else(|| ServiceError::validation("organization_repo is required"))?,
            self.member_repo
                .ok_or_else(|| ServiceError::validation("member_repo is required"))?,
            self.invitation_repo
                .ok_or_else(|| ServiceError::validation("invitation_repo is required"))?,
            self.project_repo
                .ok_or_else(|| ServiceError::validation("project_repo is required"))?,
            self.task_repo
                .ok_or_else(|| ServiceError::validation("task_repo is required"))?,
            self.change_log_repo
                .ok_or_else(|| ServiceError::validation("change_log_repo is required"))?,
            self.milestone_repo
                .ok_or_else(|| ServiceError::validation("milestone_repo is required"))?,
            self.jwt_service
                .ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
        ))
    }
}
