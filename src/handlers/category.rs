use axum::{extract::State, Json, Extension};

use crate::state::AppState;
use crate::error::AppError;
use crate::dtos::category::CategoryResponse;
use crate::middleware::auth::AuthContext;

/// The caller's role determines which catalog they see.
pub async fn list_categories(
    State(AppState { db_pool, .. }): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> Result<Json<Vec<CategoryResponse>>, AppError> {
    let categories = sqlx::query_as::<_, CategoryResponse>(
        r#"SELECT id, name, sort_order, requires_description
        FROM task_categories
        WHERE role = $1 AND is_active = TRUE
        ORDER BY sort_order ASC, name ASC"#,
    )
    .bind(&auth.role)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(categories))
}
