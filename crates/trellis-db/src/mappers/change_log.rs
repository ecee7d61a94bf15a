//! Change log entity <-> model mapper

use trellis_core::entities::TaskChangeLog;
use trellis_core::value_objects::Snowflake;

use crate::models::ChangeLogModel;

impl From<ChangeLogModel> for TaskChangeLog {
    fn from(model: ChangeLogModel) -> Self {
        TaskChangeLog {
            id: Snowflake::new(model.id),
            task_id: Snowflake::new(model.task_id),
            organization_id: Snowflake::new(model.organization_id),
            field_name: model.field_name,
            old_value: model.old_value,
            new_value: model.new_value,
            changed_by: Snowflake::new(model.changed_by),
            created_at: model.created_at,
        }
    }
}
