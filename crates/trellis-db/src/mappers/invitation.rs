//! Invitation entity <-> model mapper

use trellis_core::entities::{Invitation, MemberRole};
use trellis_core::value_objects::Snowflake;

use crate::models::InvitationModel;

impl From<InvitationModel> for Invitation {
    fn from(model: InvitationModel) -> Self {
        Invitation {
            id: Snowflake::new(model.id),
            organization_id: Snowflake::new(model.organization_id),
            email: model.email,
            role: MemberRole::parse(&model.role).unwrap_or(MemberRole::Member),
            inviter_id: Snowflake::new(model.inviter_id),
            expires_at: model.expires_at,
            created_at: model.created_at,
        }
    }
}
