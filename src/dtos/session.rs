use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

#[derive(Deserialize)]
pub struct StartSessionRequest {
    pub category_id: i64,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_sec: Option<i64>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct OpenSessionResponse {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub started_at: DateTime<Utc>,
    pub description: Option<String>,
}

#[derive(Serialize)]
pub struct StopSessionResponse {
    /// False when there was nothing to stop; stopping while idle is a no-op.
    pub stopped: bool,
    pub session: Option<SessionResponse>,
}
