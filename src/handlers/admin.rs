use axum::{extract::{Query, State}, Json, Extension};
use chrono::{DateTime, Utc};

use crate::state::AppState;
use crate::error::AppError;
use crate::dtos::admin::{
    ActiveSessionResponse, CategoryRef, DisplayWindow, LiveResponse, WeekQuery, WeekViewResponse,
};
use crate::dtos::user::UserLite;
use crate::middleware::auth::{AuthContext, ROLE_ADMIN};
use crate::timeline::{monday_of, seconds_between, week_segments, SessionSpan, WeekWindow};

/// All currently open sessions across the organization, oldest first.
/// Long-forgotten timers show up here rather than being auto-closed.
pub async fn live_sessions(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<LiveResponse>, AppError> {
    if auth.role != ROLE_ADMIN {
        return Err(AppError::forbidden("Admin access required"));
    }

    let now = Utc::now();

    let rows = sqlx::query_as::<_, LiveRow>(
        r#"SELECT ts.id, ts.started_at, ts.description,
                  u.id AS user_id, u.name AS user_name, u.role AS user_role,
                  tc.id AS category_id, tc.name AS category_name
        FROM time_sessions ts
        JOIN users u ON ts.user_id = u.id
        JOIN task_categories tc ON ts.category_id = tc.id
        WHERE ts.ended_at IS NULL
        ORDER BY ts.started_at ASC"#,
    )
    .fetch_all(&db_pool)
    .await?;

    let sessions: Vec<ActiveSessionResponse> = rows
        .into_iter()
        .map(|r| ActiveSessionResponse {
            id: r.id,
            started_at: r.started_at,
            elapsed_sec: seconds_between(r.started_at, now),
            description: r.description,
            user: UserLite {
                id: r.user_id,
                name: r.user_name,
                role: r.user_role,
            },
            category: CategoryRef {
                id: r.category_id,
                name: r.category_name,
            },
        })
        .collect();

    Ok(Json(LiveResponse {
        total_active: sessions.len(),
        sessions,
    }))
}

/// Calendar segments for one user's ISO week. Sessions are fetched by window
/// overlap and split per day by the segmentation engine; the response carries
/// the configured display window so the client can clamp for rendering.
pub async fn week_view(
    State(AppState { db_pool, config }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<WeekQuery>,
) -> Result<Json<WeekViewResponse>, AppError> {
    if auth.role != ROLE_ADMIN {
        return Err(AppError::forbidden("Admin access required"));
    }

    let user = sqlx::query_as::<_, UserLite>(
        "SELECT id, name, role FROM users WHERE id = $1 AND is_active = TRUE",
    )
    .bind(params.user_id)
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("User not found"))?;

    let now = Utc::now();
    let window = match params.week {
        Some(date) => WeekWindow::for_monday(monday_of(date), config.tz_offset),
        None => WeekWindow::containing(now, config.tz_offset),
    };

    let spans = sqlx::query_as::<_, SessionSpan>(
        r#"SELECT ts.id, ts.category_id, tc.name AS category_name,
                  ts.description, ts.started_at, ts.ended_at
        FROM time_sessions ts
        JOIN task_categories tc ON ts.category_id = tc.id
        WHERE ts.user_id = $1
          AND ts.started_at < $2
          AND (ts.ended_at >= $3 OR ts.ended_at IS NULL)
        ORDER BY ts.started_at ASC"#,
    )
    .bind(user.id)
    .bind(window.end.with_timezone(&Utc))
    .bind(window.start.with_timezone(&Utc))
    .fetch_all(&db_pool)
    .await?;

    let segments = week_segments(&spans, &window, now);

    Ok(Json(WeekViewResponse {
        user,
        week_start: window.monday(),
        segments,
        display: DisplayWindow {
            start_min: config.day_start_min,
            end_min: config.day_end_min,
            slot_min: config.slot_min,
        },
    }))
}

#[derive(sqlx::FromRow)]
struct LiveRow {
    id: i64,
    started_at: DateTime<Utc>,
    description: Option<String>,
    user_id: i64,
    user_name: String,
    user_role: String,
    category_id: i64,
    category_name: String,
}
