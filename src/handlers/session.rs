use axum::{extract::State, Json, Extension};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::state::AppState;
use crate::error::AppError;
use crate::dtos::session::{
    StartSessionRequest, SessionResponse, OpenSessionResponse, StopSessionResponse,
};
use crate::middleware::auth::AuthContext;
use crate::models::category::TaskCategory;
use crate::models::session::TimeSession;
use crate::timeline::seconds_between;

const OPEN_SESSION_INDEX: &str = "one_open_session_per_user";

/// Both intents run the same close-and-reopen transaction; they differ only
/// in their precondition on the currently open session.
enum StartIntent {
    StartNew,
    SwitchTo,
}

pub async fn start_session(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = begin_with_retry(&db_pool, &auth, &req, StartIntent::StartNew).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn switch_session(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<StartSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), AppError> {
    let session = begin_with_retry(&db_pool, &auth, &req, StartIntent::SwitchTo).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn stop_session(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<StopSessionResponse>, AppError> {
    let now = Utc::now();
    let mut tx = db_pool.begin().await?;

    let open = sqlx::query_as::<_, TimeSession>(
        r#"SELECT id, user_id, category_id, started_at, ended_at,
                  duration_sec, description, created_at
        FROM time_sessions
        WHERE user_id = $1 AND ended_at IS NULL
        ORDER BY started_at DESC
        LIMIT 1
        FOR UPDATE"#,
    )
    .bind(auth.user_id)
    .fetch_optional(&mut *tx)
    .await?;

    // Stopping while idle is a no-op, not an error.
    let Some(open) = open else {
        return Ok(Json(StopSessionResponse {
            stopped: false,
            session: None,
        }));
    };

    let duration_sec = seconds_between(open.started_at, now);

    sqlx::query("UPDATE time_sessions SET ended_at = $2, duration_sec = $3 WHERE id = $1")
        .bind(open.id)
        .bind(now)
        .bind(duration_sec)
        .execute(&mut *tx)
        .await?;

    let category_name = sqlx::query_scalar::<_, String>(
        "SELECT name FROM task_categories WHERE id = $1",
    )
    .bind(open.category_id)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        session_id = open.id,
        duration_sec,
        "Session stopped"
    );

    Ok(Json(StopSessionResponse {
        stopped: true,
        session: Some(SessionResponse {
            id: open.id,
            category_id: open.category_id,
            category_name,
            started_at: open.started_at,
            ended_at: Some(now),
            duration_sec: Some(duration_sec),
            description: open.description,
        }),
    }))
}

pub async fn get_current_session(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Option<OpenSessionResponse>>, AppError> {
    let open = sqlx::query_as::<_, OpenJoinedRow>(
        r#"SELECT ts.id, ts.category_id, tc.name AS category_name,
                  ts.started_at, ts.description
        FROM time_sessions ts
        JOIN task_categories tc ON ts.category_id = tc.id
        WHERE ts.user_id = $1 AND ts.ended_at IS NULL
        ORDER BY ts.started_at DESC
        LIMIT 1"#,
    )
    .bind(auth.user_id)
    .fetch_optional(&db_pool)
    .await?;

    Ok(Json(open.map(|s| OpenSessionResponse {
        id: s.id,
        category_id: s.category_id,
        category_name: s.category_name,
        started_at: s.started_at,
        description: s.description,
    })))
}

/// Two concurrent starts can both read "no open session"; the partial unique
/// index rejects the loser, which retries the whole operation once and then
/// surfaces a conflict.
async fn begin_with_retry(
    pool: &PgPool,
    auth: &AuthContext,
    req: &StartSessionRequest,
    intent: StartIntent,
) -> Result<SessionResponse, AppError> {
    match begin_session(pool, auth, req, &intent).await {
        Err(e) if e.is_unique_violation(OPEN_SESSION_INDEX) => {
            tracing::warn!(user_id = auth.user_id, "Concurrent session start, retrying once");
            begin_session(pool, auth, req, &intent).await.map_err(|e| {
                if e.is_unique_violation(OPEN_SESSION_INDEX) {
                    AppError::conflict("Another session was started concurrently, please retry")
                } else {
                    e
                }
            })
        }
        other => other,
    }
}

/// The transactional start/switch protocol: validate the category, close the
/// open session if there is one, create the new row. One atomic unit per
/// user; any error before commit rolls the whole thing back.
async fn begin_session(
    pool: &PgPool,
    auth: &AuthContext,
    req: &StartSessionRequest,
    intent: &StartIntent,
) -> Result<SessionResponse, AppError> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let category = sqlx::query_as::<_, TaskCategory>(
        r#"SELECT id, role, name, sort_order, requires_description, is_active, created_at
        FROM task_categories WHERE id = $1"#,
    )
    .bind(req.category_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| AppError::not_found("Category not found"))?;

    if !category.is_active {
        return Err(AppError::not_found("Category not found"));
    }

    let description = trimmed_description(req.description.as_deref(), category.requires_description)?;

    // Lock the open row so concurrent start/stop for the same user serialize.
    let open = sqlx::query_as::<_, OpenRow>(
        r#"SELECT id, category_id, started_at
        FROM time_sessions
        WHERE user_id = $1 AND ended_at IS NULL
        ORDER BY started_at DESC
        LIMIT 1
        FOR UPDATE"#,
    )
    .bind(auth.user_id)
    .fetch_optional(&mut *tx)
    .await?;

    if matches!(intent, StartIntent::SwitchTo) && open.is_none() {
        return Err(AppError::conflict("No open session to switch from"));
    }

    if let Some(ref open) = open {
        // Re-starting the running category would close and reopen it with a
        // fresh id, losing continuity.
        if open.category_id == category.id {
            return Err(AppError::conflict("This category is already being tracked"));
        }

        sqlx::query("UPDATE time_sessions SET ended_at = $2, duration_sec = $3 WHERE id = $1")
            .bind(open.id)
            .bind(now)
            .bind(seconds_between(open.started_at, now))
            .execute(&mut *tx)
            .await?;
    }

    let inserted = sqlx::query_as::<_, InsertedRow>(
        r#"INSERT INTO time_sessions (user_id, category_id, started_at, description)
        VALUES ($1, $2, $3, $4)
        RETURNING id, started_at"#,
    )
    .bind(auth.user_id)
    .bind(category.id)
    .bind(now)
    .bind(description)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(
        user_id = auth.user_id,
        session_id = inserted.id,
        category = %category.name,
        switched_from = open.map(|o| o.id),
        "Session started"
    );

    Ok(SessionResponse {
        id: inserted.id,
        category_id: category.id,
        category_name: category.name,
        started_at: inserted.started_at,
        ended_at: None,
        duration_sec: None,
        description: description.map(str::to_string),
    })
}

/// Trims the free-text description and blanks it to NULL; categories flagged
/// `requires_description` refuse a missing or whitespace-only value.
fn trimmed_description(
    raw: Option<&str>,
    requires_description: bool,
) -> Result<Option<&str>, AppError> {
    let description = raw.map(str::trim).filter(|d| !d.is_empty());

    if requires_description && description.is_none() {
        return Err(AppError::validation("Description is required for this category"));
    }

    Ok(description)
}

#[derive(sqlx::FromRow)]
struct OpenRow {
    id: i64,
    category_id: i64,
    started_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OpenJoinedRow {
    id: i64,
    category_id: i64,
    category_name: String,
    started_at: DateTime<Utc>,
    description: Option<String>,
}

#[derive(sqlx::FromRow)]
struct InsertedRow {
    id: i64,
    started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_description_fails_when_the_category_demands_one() {
        assert!(matches!(
            trimmed_description(Some(""), true).unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            trimmed_description(Some("   "), true).unwrap_err(),
            AppError::ValidationError(_)
        ));
        assert!(matches!(
            trimmed_description(None, true).unwrap_err(),
            AppError::ValidationError(_)
        ));
    }

    #[test]
    fn description_is_trimmed_before_persisting() {
        assert_eq!(
            trimmed_description(Some("  fix invoice  "), true).unwrap(),
            Some("fix invoice")
        );
    }

    #[test]
    fn optional_description_blanks_to_none() {
        assert_eq!(trimmed_description(None, false).unwrap(), None);
        assert_eq!(trimmed_description(Some("   "), false).unwrap(), None);
    }
}
