use serde::Serialize;
use chrono::{DateTime, Utc};

/// A single timed work interval. `ended_at = NULL` means the session is
/// open/running; `duration_sec` is populated exactly once, on close.
#[derive(sqlx::FromRow, Serialize)]
pub struct TimeSession {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_sec: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}
