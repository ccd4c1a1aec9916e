use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct ReactionTypeModel {
    pub id: i64,
    pub name: String,
    pub uses_animated_icon: bool,
    pub icon_ref: String,
    pub display_weight: i32,
    pub created_at: DateTime<Utc>,
}
