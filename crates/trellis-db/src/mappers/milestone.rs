//! Milestone entity <-> model mapper

use trellis_core::entities::{Milestone, MilestoneStatus};
use trellis_core::value_objects::Snowflake;

use crate::models::MilestoneModel;

impl From<MilestoneModel> for Milestone {
    fn from(model: MilestoneModel) -> Self {
        Milestone {
            id: Snowflake::new(model.id),
            project_id: Snowflake::new(model.project_id),
            organization_id: Snowflake::new(model.organization_id),
            name: model.name,
            description: model.description,
            target_date: model.target_date,
            status: MilestoneStatus::parse(&model.status).unwrap_or_default(),
            created_by: Snowflake::new(model.created_by),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
