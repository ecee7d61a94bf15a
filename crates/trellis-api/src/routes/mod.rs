//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::handlers::{
    auth, health, invitations, members, milestones, organizations, projects, tasks, users,
};
use crate::state::AppState;

/// Create the main API router with all routes (excluding health for separate middleware handling)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes (exported separately to bypass rate limiting)
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(organization_routes())
        .merge(invitation_routes())
        .merge(project_routes())
        .merge(task_routes())
        .merge(milestone_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route(
            "/auth/set-active-organization",
            post(auth::set_active_organization),
        )
        .route("/auth/active-organization", get(auth::active_organization))
}

/// User routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/@me", patch(users::update_current_user))
        .route(
            "/users/@me/organizations",
            get(users::get_current_user_organizations),
        )
        .route(
            "/users/@me/invitations",
            get(users::get_current_user_invitations),
        )
        .route("/users/:user_id", get(users::get_user))
}

/// Organization routes
fn organization_routes() -> Router<AppState> {
    Router::new()
        // Organization CRUD
        .route("/organizations", post(organizations::create_organization))
        .route(
            "/organizations/:organization_id",
            get(organizations::get_organization),
        )
        .route(
            "/organizations/:organization_id",
            patch(organizations::update_organization),
        )
        .route(
            "/organizations/:organization_id",
            delete(organizations::delete_organization),
        )
        .route(
            "/organizations/:organization_id/transfer-ownership",
            post(organizations::transfer_ownership),
        )
        // Members
        .route(
            "/organizations/:organization_id/members",
            get(members::list_members),
        )
        .route(
            "/organizations/:organization_id/members/@me",
            delete(members::leave_organization),
        )
        .route(
            "/organizations/:organization_id/members/:user_id",
            get(members::get_member),
        )
        .route(
            "/organizations/:organization_id/members/:user_id",
            patch(members::update_member_role),
        )
        .route(
            "/organizations/:organization_id/members/:user_id",
            delete(members::remove_member),
        )
        // Invitations
        .route(
            "/organizations/:organization_id/invitations",
            post(invitations::create_invitation),
        )
        .route(
            "/organizations/:organization_id/invitations",
            get(invitations::list_invitations),
        )
        .route(
            "/organizations/:organization_id/invitations/:invitation_id",
            delete(invitations::cancel_invitation),
        )
        // Projects
        .route(
            "/organizations/:organization_id/projects",
            post(projects::create_project),
        )
        .route(
            "/organizations/:organization_id/projects",
            get(projects::list_projects),
        )
}

/// Invitation routes (invitee-facing)
fn invitation_routes() -> Router<AppState> {
    Router::new()
        .route("/invitations/:invitation_id", get(invitations::get_invitation))
        .route(
            "/invitations/:invitation_id/accept",
            post(invitations::accept_invitation),
        )
        .route(
            "/invitations/:invitation_id/decline",
            post(invitations::decline_invitation),
        )
}

/// Project routes
fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/projects/:project_id", get(projects::get_project))
        .route("/projects/:project_id", patch(projects::update_project))
        .route("/projects/:project_id", delete(projects::delete_project))
        // Tasks
        .route("/projects/:project_id/tasks", post(tasks::create_task))
        .route("/projects/:project_id/tasks", get(tasks::list_tasks))
        .route(
            "/projects/:project_id/tasks/reorder",
            patch(tasks::reorder_tasks),
        )
        // Milestones
        .route(
            "/projects/:project_id/milestones",
            post(milestones::create_milestone),
        )
        .route(
            "/projects/:project_id/milestones",
            get(milestones::list_milestones),
        )
}

/// Task routes
fn task_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks/:task_id", get(tasks::get_task))
        .route("/tasks/:task_id", patch(tasks::update_task))
        .route("/tasks/:task_id", delete(tasks::delete_task))
        .route("/tasks/:task_id/move", patch(tasks::move_task))
        .route("/tasks/:task_id/changelog", get(tasks::get_change_log))
}

/// Milestone routes
fn milestone_routes() -> Router<AppState> {
    Router::new()
        .route("/milestones/:milestone_id", get(milestones::get_milestone))
        .route(
            "/milestones/:milestone_id",
            patch(milestones::update_milestone),
        )
        .route(
            "/milestones/:milestone_id",
            delete(milestones::delete_milestone),
        )
        .route(
            "/milestones/:milestone_id/tasks",
            get(milestones::list_milestone_tasks),
        )
        .route(
            "/milestones/:milestone_id/tasks/:task_id",
            put(milestones::attach_task),
        )
        .route(
            "/milestones/:milestone_id/tasks/:task_id",
            delete(milestones::detach_task),
        )
}
