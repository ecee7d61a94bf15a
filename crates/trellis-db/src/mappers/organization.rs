//! Organization entity <-> model mapper

use trellis_core::entities::Organization;
use trellis_core::value_objects::Snowflake;

use crate::models::OrganizationModel;

impl From<OrganizationModel> for Organization {
    fn from(model: OrganizationModel) -> Self {
        Organization {
            id: Snowflake::new(model.id),
            name: model.name,
            slug: model.slug,
            logo: model.logo,
            metadata: model.metadata,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
