use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct TargetModel {
    pub target_type: String,
    pub target_id: String,
    pub bundle: Option<String>,
    pub title: String,
    pub created_at: DateTime<Utc>,
}
