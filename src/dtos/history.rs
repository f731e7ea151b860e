use serde::Serialize;
use chrono::{DateTime, Utc};

use crate::timeline::CategoryTotal;

#[derive(Serialize)]
pub struct WindowTotals {
    pub total_seconds: i64,
    pub by_category: Vec<CategoryTotal>,
}

#[derive(Serialize)]
pub struct HistorySession {
    pub id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    pub duration_sec: i64,
    pub description: Option<String>,
    pub is_running: bool,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub today: WindowTotals,
    pub week: WindowTotals,
    pub recent: Vec<HistorySession>,
}
