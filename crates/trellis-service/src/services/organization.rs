//! Organization service
//!
//! Handles organization creation, management, ownership transfer, and
//! deletion.

use tracing::{info, instrument};
use trellis_core::entities::{MemberRole, OrgMember, Organization};
use trellis_core::value_objects::{slugify, validate_slug, with_random_suffix};
use trellis_core::{DomainError, Permissions, Snowflake};

use crate::dto::mappers::OrganizationWithCounts;
use crate::dto::requests::{CreateOrganizationRequest, UpdateOrganizationRequest};
use crate::dto::responses::{OrganizationResponse, OrganizationWithCountsResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::permission::PermissionService;

/// Organization service
pub struct OrganizationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OrganizationService<'a> {
    /// Create a new OrganizationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a new organization; the creator becomes its owner
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_organization(
        &self,
        creator_id: Snowflake,
        request: CreateOrganizationRequest,
    ) -> ServiceResult<OrganizationResponse> {
        let slug = match request.slug {
            Some(slug) => {
                validate_slug(&slug)
                    .map_err(|e| ServiceError::from(DomainError::InvalidSlug(e.to_string())))?;
                // Explicit slugs conflict hard; no silent rewriting
                if self.ctx.organization_repo().slug_exists(&slug).await? {
                    return Err(ServiceError::from(DomainError::SlugTaken));
                }
                slug
            }
            None => {
                // Derived slugs retry once with a random suffix
                let candidate = slugify(&request.name);
                if self.ctx.organization_repo().slug_exists(&candidate).await? {
                    with_random_suffix(&candidate)
                } else {
                    candidate
                }
            }
        };

        let org_id = self.ctx.generate_id();
        let mut organization = Organization::new(org_id, request.name, slug);
        organization.logo = request.logo;
        organization.metadata = request.metadata;

        self.ctx.organization_repo().create(&organization).await?;

        let owner = OrgMember::new(org_id, creator_id, MemberRole::Owner);
        self.ctx.member_repo().create(&owner).await?;

        // The new organization becomes the creator's active one; failure
        // here is cosmetic and must not fail the creation.
        if let Err(e) = self.ctx.active_org_store().set(creator_id, org_id).await {
            tracing::warn!(error = %e, "Failed to set active organization after create");
        }

        info!(organization_id = %org_id, owner_id = %creator_id, "Organization created");

        Ok(OrganizationResponse::from(&organization))
    }

    /// Get organization with member count (members only)
    #[instrument(skip(self))]
    pub async fn get_organization(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<OrganizationWithCountsResponse> {
        PermissionService::new(self.ctx)
            .require_member(organization_id, user_id)
            .await?;

        let organization = self
            .ctx
            .organization_repo()
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Organization", organization_id.to_string())
            })?;

        let member_count = self
            .ctx
            .organization_repo()
            .member_count(organization_id)
            .await?;

        Ok(OrganizationWithCountsResponse::from(OrganizationWithCounts {
            organization,
            member_count,
        }))
    }

    /// List all organizations the user belongs to
    #[instrument(skip(self))]
    pub async fn get_user_organizations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<OrganizationResponse>> {
        let organizations = self.ctx.organization_repo().find_by_user(user_id).await?;
        Ok(organizations
            .iter()
            .map(OrganizationResponse::from)
            .collect())
    }

    /// Update organization settings
    #[instrument(skip(self, request))]
    pub async fn update_organization(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
        request: UpdateOrganizationRequest,
    ) -> ServiceResult<OrganizationResponse> {
        PermissionService::new(self.ctx)
            .require_permission(organization_id, user_id, Permissions::MANAGE_ORGANIZATION)
            .await?;

        let mut organization = self
            .ctx
            .organization_repo()
            .find_by_id(organization_id)
            .await?
            .ok_or_else(|| {
                ServiceError::not_found("Organization", organization_id.to_string())
            })?;

        let mut changed = false;

        if let Some(name) = request.name {
            organization.set_name(name);
            changed = true;
        }

        if let Some(slug) = request.slug {
            if slug != organization.slug {
                validate_slug(&slug)
                    .map_err(|e| ServiceError::from(DomainError::InvalidSlug(e.to_string())))?;
                organization.set_slug(slug);
                changed = true;
            }
        }

        if let Some(logo) = request.logo {
            organization.set_logo(Some(logo));
            changed = true;
        }

        if let Some(metadata) = request.metadata {
            organization.set_metadata(Some(metadata));
            changed = true;
        }

        if changed {
            self.ctx.organization_repo().update(&organization).await?;
            info!(organization_id = %organization_id, "Organization updated");
        }

        Ok(OrganizationResponse::from(&organization))
    }

    /// Transfer ownership to another member
    #[instrument(skip(self))]
    pub async fn transfer_ownership(
        &self,
        organization_id: Snowflake,
        owner_id: Snowflake,
        new_owner_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_permission(organization_id, owner_id, Permissions::TRANSFER_OWNERSHIP)
            .await?;

        if owner_id == new_owner_id {
            return Err(ServiceError::validation(
                "New owner must be a different member",
            ));
        }

        if !self
            .ctx
            .member_repo()
            .is_member(organization_id, new_owner_id)
            .await?
        {
            return Err(ServiceError::validation(
                "New owner must be an organization member",
            ));
        }

        self.ctx
            .member_repo()
            .transfer_ownership(organization_id, owner_id, new_owner_id)
            .await?;

        info!(
            organization_id = %organization_id,
            old_owner = %owner_id,
            new_owner = %new_owner_id,
            "Organization ownership transferred"
        );

        Ok(())
    }

    /// Delete the organization (owner only; cascades to everything inside)
    #[instrument(skip(self))]
    pub async fn delete_organization(
        &self,
        organization_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<()> {
        PermissionService::new(self.ctx)
            .require_permission(organization_id, user_id, Permissions::DELETE_ORGANIZATION)
            .await?;

        self.ctx.organization_repo().delete(organization_id).await?;

        if let Err(e) = self.ctx.active_org_store().clear(user_id).await {
            tracing::warn!(error = %e, "Failed to clear active organization after delete");
        }

        info!(organization_id = %organization_id, "Organization deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    // Covered end-to-end by tests/integration; unit coverage would need
    // mocked repositories and stores.
}
