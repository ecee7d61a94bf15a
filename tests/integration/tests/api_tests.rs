//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance (with migrations applied)
//! - Running Redis instance
//! - Environment variables: DATABASE_URL, REDIS_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

/// Register a fresh user and return (auth, server-visible email)
async fn register_user(server: &TestServer) -> AuthResponse {
    let request = RegisterRequest::unique();
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Register a user and create an organization they own
async fn register_with_org(server: &TestServer) -> (AuthResponse, OrganizationResponse) {
    let auth = register_user(server).await;
    let request = CreateOrganizationRequest::unique();
    let response = server
        .post_auth("/api/v1/organizations", &auth.access_token, &request)
        .await
        .unwrap();
    let org: OrganizationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (auth, org)
}

/// Create a project inside an organization
async fn create_project(
    server: &TestServer,
    token: &str,
    org_id: &str,
) -> ProjectResponse {
    let request = CreateProjectRequest::unique();
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{org_id}/projects"),
            token,
            &request,
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Create a task inside a project
async fn create_task(
    server: &TestServer,
    token: &str,
    project_id: &str,
    request: &CreateTaskRequest,
) -> TaskResponse {
    let response = server
        .post_auth(&format!("/api/v1/projects/{project_id}/tasks"), token, request)
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

/// Invite `email` into the org and accept as the invitee
async fn invite_and_accept(
    server: &TestServer,
    owner_token: &str,
    org_id: &str,
    invitee: &AuthResponse,
    role: &str,
) {
    let invite = CreateInvitationRequest {
        email: invitee.user.email.clone().unwrap(),
        role: role.to_string(),
    };
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{org_id}/invitations"),
            owner_token,
            &invite,
        )
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &invitee.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());

    // Duplicate email conflicts
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // Login works
    let login = LoginRequest::from_register(&request);
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!auth.access_token.is_empty());

    // Wrong password is unauthorized
    let bad_login = LoginRequest {
        email: request.email.clone(),
        password: "WrongPass123!".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &bad_login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_token_flow() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let response = server
        .post(
            "/api/v1/auth/refresh",
            &json!({ "refresh_token": auth.refresh_token }),
        )
        .await
        .unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);
}

#[tokio::test]
async fn test_protected_route_requires_auth() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/users/@me").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_set_active_organization() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (auth, org) = register_with_org(&server).await;

    let response = server
        .post_auth(
            "/api/v1/auth/set-active-organization",
            &auth.access_token,
            &json!({ "organization_id": org.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // A non-member cannot activate someone else's organization
    let outsider = register_user(&server).await;
    let response = server
        .post_auth(
            "/api/v1/auth/set-active-organization",
            &outsider.access_token,
            &json!({ "organization_id": org.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Organization Tests
// ============================================================================

#[tokio::test]
async fn test_create_organization_duplicate_slug() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = register_user(&server).await;

    let request = CreateOrganizationRequest::unique();
    let response = server
        .post_auth("/api/v1/organizations", &auth.access_token, &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    // Same explicit slug conflicts
    let mut dup = CreateOrganizationRequest::unique();
    dup.slug = request.slug.clone();
    let response = server
        .post_auth("/api/v1/organizations", &auth.access_token, &dup)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_organization_hidden_from_non_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_auth, org) = register_with_org(&server).await;

    let outsider = register_user(&server).await;
    let response = server
        .get_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &outsider.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_member_cannot_update_or_delete_organization() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;

    let member = register_user(&server).await;
    invite_and_accept(&server, &owner.access_token, &org.id, &member, "member").await;

    // Plain members cannot edit the organization
    let response = server
        .patch_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &member.access_token,
            &json!({ "name": "Hostile Rename" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Nor delete it
    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &member.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Nor can an admin delete it; that is owner-only
    let admin = register_user(&server).await;
    invite_and_accept(&server, &owner.access_token, &org.id, &admin, "admin").await;
    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &admin.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_delete_organization_cascades() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;
    let task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Everything inside is gone
    let response = server
        .get_auth(
            &format!("/api/v1/projects/{}", project.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/tasks/{}", task.id), &owner.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_transfer_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;

    let successor = register_user(&server).await;
    invite_and_accept(&server, &owner.access_token, &org.id, &successor, "member").await;

    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/transfer-ownership", org.id),
            &owner.access_token,
            &json!({ "user_id": successor.user.id }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // The new owner can delete; the old one cannot
    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &successor.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

// ============================================================================
// Invitation Tests
// ============================================================================

#[tokio::test]
async fn test_invitation_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let invitee = register_user(&server).await;

    // Members cannot invite
    let plain = register_user(&server).await;
    invite_and_accept(&server, &owner.access_token, &org.id, &plain, "member").await;
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/invitations", org.id),
            &plain.access_token,
            &CreateInvitationRequest {
                email: invitee.user.email.clone().unwrap(),
                role: "member".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // Owner invites
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/invitations", org.id),
            &owner.access_token,
            &CreateInvitationRequest {
                email: invitee.user.email.clone().unwrap(),
                role: "member".to_string(),
            },
        )
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Duplicate pending invitation conflicts
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/invitations", org.id),
            &owner.access_token,
            &CreateInvitationRequest {
                email: invitee.user.email.clone().unwrap(),
                role: "admin".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // The wrong user cannot accept it
    let stranger = register_user(&server).await;
    let response = server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &stranger.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The invitee accepts and becomes a member
    let response = server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &invitee.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/organizations/{}", org.id),
            &invitee.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The invitation was consumed
    let response = server
        .post_auth(
            &format!("/api/v1/invitations/{}/accept", invitation.id),
            &invitee.access_token,
            &json!({}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Re-inviting an existing member conflicts
    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/invitations", org.id),
            &owner.access_token,
            &CreateInvitationRequest {
                email: invitee.user.email.clone().unwrap(),
                role: "member".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_cannot_invite_as_owner_role() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;

    let response = server
        .post_auth(
            &format!("/api/v1/organizations/{}/invitations", org.id),
            &owner.access_token,
            &CreateInvitationRequest {
                email: format!("owner-wannabe{}@example.com", unique_suffix()),
                role: "owner".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_role_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;

    let member = register_user(&server).await;
    invite_and_accept(&server, &owner.access_token, &org.id, &member, "member").await;

    // A plain member cannot change roles
    let response = server
        .patch_auth(
            &format!(
                "/api/v1/organizations/{}/members/{}",
                org.id, owner.user.id
            ),
            &member.access_token,
            &json!({ "role": "member" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The owner promotes the member to admin
    let response = server
        .patch_auth(
            &format!(
                "/api/v1/organizations/{}/members/{}",
                org.id, member.user.id
            ),
            &owner.access_token,
            &json!({ "role": "admin" }),
        )
        .await
        .unwrap();
    let updated: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.role, "admin");

    // Nobody is promoted to owner through role updates
    let response = server
        .patch_auth(
            &format!(
                "/api/v1/organizations/{}/members/{}",
                org.id, member.user.id
            ),
            &owner.access_token,
            &json!({ "role": "owner" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // The admin cannot remove the owner
    let response = server
        .delete_auth(
            &format!(
                "/api/v1/organizations/{}/members/{}",
                org.id, owner.user.id
            ),
            &member.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The owner cannot leave without transferring
    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}/members/@me", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    // The admin can leave
    let response = server
        .delete_auth(
            &format!("/api/v1/organizations/{}/members/@me", org.id),
            &member.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_member_list_pagination_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;

    let response = server
        .get_auth(
            &format!("/api/v1/organizations/{}/members?limit=101", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/organizations/{}/members?limit=0", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/organizations/{}/members?limit=50", org.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Task Tests
// ============================================================================

#[tokio::test]
async fn test_create_task_missing_name_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;

    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/tasks", project.id),
            &owner.access_token,
            &json!({ "description": "no name" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // Empty name fails schema validation too
    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/tasks", project.id),
            &owner.access_token,
            &json!({ "name": "" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_task_positions_are_assigned_in_steps() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;

    let first = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;
    let second = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    assert_eq!(first.status, "BACKLOG");
    assert_eq!(first.position, 1000);
    assert_eq!(second.position, 2000);

    // A different column starts back at the first step
    let other = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::with_status("TODO"),
    )
    .await;
    assert_eq!(other.status, "TODO");
    assert_eq!(other.position, 1000);
}

#[tokio::test]
async fn test_move_task_uses_index_formula() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;
    let task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    // Drop into IN_PROGRESS at index 2 -> position 3000
    let response = server
        .patch_auth(
            &format!("/api/v1/tasks/{}/move", task.id),
            &owner.access_token,
            &json!({ "status": "IN_PROGRESS", "index": 2 }),
        )
        .await
        .unwrap();
    let moved: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(moved.status, "IN_PROGRESS");
    assert_eq!(moved.position, 3000);
}

#[tokio::test]
async fn test_reorder_batch_and_bounds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;

    let a = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;
    let b = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    // Swap the two tasks
    let response = server
        .patch_auth(
            &format!("/api/v1/projects/{}/tasks/reorder", project.id),
            &owner.access_token,
            &json!({
                "tasks": [
                    { "task_id": a.id, "status": "BACKLOG", "position": 2000 },
                    { "task_id": b.id, "status": "BACKLOG", "position": 1000 }
                ]
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/tasks/{}", a.id), &owner.access_token)
        .await
        .unwrap();
    let a_after: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(a_after.position, 2000);

    // Out-of-range positions are rejected
    let response = server
        .patch_auth(
            &format!("/api/v1/projects/{}/tasks/reorder", project.id),
            &owner.access_token,
            &json!({
                "tasks": [
                    { "task_id": a.id, "status": "BACKLOG", "position": 0 }
                ]
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/projects/{}/tasks/reorder", project.id),
            &owner.access_token,
            &json!({
                "tasks": [
                    { "task_id": a.id, "status": "BACKLOG", "position": 1_000_001 }
                ]
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_task_update_records_change_log() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;
    let task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    // Rename and move to DONE in one update
    let response = server
        .patch_auth(
            &format!("/api/v1/tasks/{}", task.id),
            &owner.access_token,
            &json!({ "name": "Shipped", "status": "DONE" }),
        )
        .await
        .unwrap();
    let updated: TaskResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Shipped");
    assert_eq!(updated.status, "DONE");

    let response = server
        .get_auth(
            &format!("/api/v1/tasks/{}/changelog", task.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let entries: Vec<ChangeLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(entries.len(), 2);

    let fields: Vec<&str> = entries.iter().map(|e| e.field_name.as_str()).collect();
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"status"));

    let status_entry = entries.iter().find(|e| e.field_name == "status").unwrap();
    assert_eq!(status_entry.old_value.as_deref(), Some("BACKLOG"));
    assert_eq!(status_entry.new_value.as_deref(), Some("DONE"));
    assert_eq!(status_entry.changed_by, owner.user.id);

    // A no-op update writes nothing new
    let response = server
        .patch_auth(
            &format!("/api/v1/tasks/{}", task.id),
            &owner.access_token,
            &json!({ "name": "Shipped" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/tasks/{}/changelog", task.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let entries: Vec<ChangeLogResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_task_hidden_from_non_members() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;
    let task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    let outsider = register_user(&server).await;
    let response = server
        .get_auth(&format!("/api/v1/tasks/{}", task.id), &outsider.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .patch_auth(
            &format!("/api/v1/tasks/{}", task.id),
            &outsider.access_token,
            &json!({ "name": "Hijacked" }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_task_status_filter() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;

    create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::with_status("TODO"),
    )
    .await;
    create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::with_status("DONE"),
    )
    .await;

    let response = server
        .get_auth(
            &format!("/api/v1/projects/{}/tasks?status=TODO", project.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let tasks: Vec<TaskResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].status, "TODO");

    // Unknown status values are rejected
    let response = server
        .get_auth(
            &format!("/api/v1/projects/{}/tasks?status=SHIPPED", project.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Milestone Tests
// ============================================================================

#[tokio::test]
async fn test_milestone_lifecycle_and_counts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project = create_project(&server, &owner.access_token, &org.id).await;

    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/milestones", project.id),
            &owner.access_token,
            &CreateMilestoneRequest::unique(),
        )
        .await
        .unwrap();
    let milestone: MilestoneResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(milestone.status, "PLANNED");

    let open_task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::with_status("TODO"),
    )
    .await;
    let done_task = create_task(
        &server,
        &owner.access_token,
        &project.id,
        &CreateTaskRequest::with_status("DONE"),
    )
    .await;

    for task_id in [&open_task.id, &done_task.id] {
        let response = server
            .put_auth(
                &format!("/api/v1/milestones/{}/tasks/{}", milestone.id, task_id),
                &owner.access_token,
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
    }

    // Attaching twice conflicts
    let response = server
        .put_auth(
            &format!("/api/v1/milestones/{}/tasks/{}", milestone.id, open_task.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .get_auth(
            &format!("/api/v1/milestones/{}", milestone.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    let with_counts: MilestoneWithCountsResponse =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(with_counts.task_count, 2);
    assert_eq!(with_counts.done_count, 1);

    // Detach one
    let response = server
        .delete_auth(
            &format!("/api/v1/milestones/{}/tasks/{}", milestone.id, done_task.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Status transitions are free-form among the four states
    let response = server
        .patch_auth(
            &format!("/api/v1/milestones/{}", milestone.id),
            &owner.access_token,
            &json!({ "status": "ON_HOLD" }),
        )
        .await
        .unwrap();
    let updated: MilestoneResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.status, "ON_HOLD");
}

#[tokio::test]
async fn test_milestone_rejects_foreign_project_task() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, org) = register_with_org(&server).await;
    let project_a = create_project(&server, &owner.access_token, &org.id).await;
    let project_b = create_project(&server, &owner.access_token, &org.id).await;

    let response = server
        .post_auth(
            &format!("/api/v1/projects/{}/milestones", project_a.id),
            &owner.access_token,
            &CreateMilestoneRequest::unique(),
        )
        .await
        .unwrap();
    let milestone: MilestoneResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let foreign_task = create_task(
        &server,
        &owner.access_token,
        &project_b.id,
        &CreateTaskRequest::unique(),
    )
    .await;

    let response = server
        .put_auth(
            &format!("/api/v1/milestones/{}/tasks/{}", milestone.id, foreign_task.id),
            &owner.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
