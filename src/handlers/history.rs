use axum::{extract::State, Json, Extension};
use chrono::{DateTime, TimeZone, Utc};

use crate::state::AppState;
use crate::error::AppError;
use crate::dtos::history::{HistoryResponse, HistorySession, WindowTotals};
use crate::middleware::auth::AuthContext;
use crate::timeline::{effective_seconds, totals_by_category, WeekWindow};

/// Per-user read-side projection: today and current-week totals by category,
/// plus the week's sessions newest first. An open session counts up to `now`.
pub async fn get_history(
    State(AppState { db_pool, config }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<HistoryResponse>, AppError> {
    let now = Utc::now();
    let tz = config.tz_offset;
    let week = WeekWindow::containing(now, tz);

    let local_today = now.with_timezone(&tz).date_naive();
    let today_start = tz
        .from_local_datetime(&local_today.and_hms_opt(0, 0, 0).unwrap())
        .unwrap()
        .with_timezone(&Utc);

    let rows = sqlx::query_as::<_, HistoryRow>(
        r#"SELECT ts.id, ts.category_id, tc.name AS category_name,
                  ts.started_at, ts.ended_at, ts.duration_sec, ts.description
        FROM time_sessions ts
        JOIN task_categories tc ON ts.category_id = tc.id
        WHERE ts.user_id = $1 AND ts.started_at >= $2
        ORDER BY ts.started_at DESC"#,
    )
    .bind(auth.user_id)
    .bind(week.start.with_timezone(&Utc))
    .fetch_all(&db_pool)
    .await?;

    let sessions: Vec<HistorySession> = rows
        .into_iter()
        .map(|r| {
            let duration_sec = effective_seconds(r.started_at, r.ended_at, r.duration_sec, now);
            HistorySession {
                id: r.id,
                category_id: r.category_id,
                category_name: r.category_name,
                started_at: r.started_at,
                ended_at: r.ended_at,
                duration_sec,
                description: r.description,
                is_running: r.ended_at.is_none(),
            }
        })
        .collect();

    let week_totals = window_totals(sessions.iter());
    let today_totals = window_totals(sessions.iter().filter(|s| s.started_at >= today_start));

    Ok(Json(HistoryResponse {
        today: today_totals,
        week: week_totals,
        recent: sessions,
    }))
}

fn window_totals<'a, I>(sessions: I) -> WindowTotals
where
    I: Iterator<Item = &'a HistorySession>,
{
    let entries: Vec<(i64, String, i64)> = sessions
        .map(|s| (s.category_id, s.category_name.clone(), s.duration_sec))
        .collect();

    WindowTotals {
        total_seconds: entries.iter().map(|e| e.2).sum(),
        by_category: totals_by_category(entries),
    }
}

#[derive(sqlx::FromRow)]
struct HistoryRow {
    id: i64,
    category_id: i64,
    category_name: String,
    started_at: DateTime<Utc>,
    ended_at: Option<DateTime<Utc>>,
    duration_sec: Option<i64>,
    description: Option<String>,
}
