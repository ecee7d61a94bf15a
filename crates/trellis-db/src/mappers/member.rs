//! Member entity <-> model mapper

use trellis_core::entities::{MemberRole, OrgMember};
use trellis_core::value_objects::Snowflake;

use crate::models::MemberModel;

impl From<MemberModel> for OrgMember {
    fn from(model: MemberModel) -> Self {
        OrgMember {
            organization_id: Snowflake::new(model.organization_id),
            user_id: Snowflake::new(model.user_id),
            role: MemberRole::parse(&model.role).unwrap_or(MemberRole::Member),
            joined_at: model.joined_at,
            updated_at: model.updated_at,
        }
    }
}
