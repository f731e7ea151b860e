use serde::Serialize;
use chrono::{DateTime, Utc};

#[derive(sqlx::FromRow, Serialize)]
pub struct TaskCategory {
    pub id: i64,
    pub role: String,
    pub name: String,
    pub sort_order: i32,
    pub requires_description: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
