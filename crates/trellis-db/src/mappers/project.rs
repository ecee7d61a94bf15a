//! Project entity <-> model mapper

use trellis_core::entities::Project;
use trellis_core::value_objects::Snowflake;

use crate::models::ProjectModel;

impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        Project {
            id: Snowflake::new(model.id),
            organization_id: Snowflake::new(model.organization_id),
            name: model.name,
            image: model.image,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
