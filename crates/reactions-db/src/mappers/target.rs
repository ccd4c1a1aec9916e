use reactions_core::entities::Target;
use reactions_core::value_objects::TargetRef;

use crate::models::TargetModel;

impl From<TargetModel> for Target {
    fn from(model: TargetModel) -> Self {
        Target {
            target: TargetRef::from_stored(model.target_type, model.target_id),
            bundle: model.bundle,
            title: model.title,
            created_at: model.created_at,
        }
    }
}
