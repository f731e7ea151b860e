use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};

use crate::dtos::user::UserLite;
use crate::timeline::Segment;

#[derive(Serialize)]
pub struct CategoryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Serialize)]
pub struct ActiveSessionResponse {
    pub id: i64,
    pub started_at: DateTime<Utc>,
    pub elapsed_sec: i64,
    pub description: Option<String>,
    pub user: UserLite,
    pub category: CategoryRef,
}

#[derive(Serialize)]
pub struct LiveResponse {
    pub total_active: usize,
    pub sessions: Vec<ActiveSessionResponse>,
}

#[derive(Deserialize)]
pub struct WeekQuery {
    pub user_id: i64,
    /// Any date inside the requested week; defaults to the current week.
    pub week: Option<NaiveDate>,
}

/// Visible daily window the calendar clamps segments to when rendering.
#[derive(Serialize)]
pub struct DisplayWindow {
    pub start_min: i64,
    pub end_min: i64,
    pub slot_min: i64,
}

#[derive(Serialize)]
pub struct WeekViewResponse {
    pub user: UserLite,
    pub week_start: NaiveDate,
    pub segments: Vec<Segment>,
    pub display: DisplayWindow,
}
